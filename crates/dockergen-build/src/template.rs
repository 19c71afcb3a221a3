use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use dockergen_core::BaseFamily;
use regex::Regex;

/// Placeholder tokens understood by the Dockerfile templates.
pub mod token {
    pub const PHP_VERSION: &str = "%%PHP_VERSION%%";
    pub const MEDIAWIKI_MAJOR_VERSION: &str = "%%MEDIAWIKI_MAJOR_VERSION%%";
    pub const MEDIAWIKI_VERSION: &str = "%%MEDIAWIKI_VERSION%%";
    pub const VARIANT: &str = "%%VARIANT%%";
    pub const APCU_VERSION: &str = "%%APCU_VERSION%%";
    pub const LUASANDBOX_VERSION: &str = "%%LUASANDBOX_VERSION%%";
    pub const CMD: &str = "%%CMD%%";
    pub const VARIANT_EXTRAS: &str = "%%VARIANT_EXTRAS%%";
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%%[A-Z0-9_]+%%").expect("Invalid placeholder regex"));

/// Token → replacement pairs for one (branch, variant) render.
///
/// Replacements run in insertion order. Tokens must not occur inside each
/// other's replacement values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `token` to `value`, replacing an earlier value for the same token.
    pub fn insert(&mut self, token: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(t, _)| t == token) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((token.to_owned(), value)),
        }
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }
}

/// Substitute every placeholder of `map` into `template`.
///
/// ```
/// use dockergen_build::template::{PlaceholderMap, render, token};
///
/// let mut map = PlaceholderMap::new();
/// map.insert(token::MEDIAWIKI_VERSION, "1.39.2");
/// assert_eq!(render("ENV MW=%%MEDIAWIKI_VERSION%%", &map), "ENV MW=1.39.2");
/// ```
pub fn render(template: &str, map: &PlaceholderMap) -> String {
    map.iter()
        .fold(template.to_owned(), |text, (token, value)| {
            text.replace(token, value)
        })
}

/// `%%NAME%%` tokens still present in `text`, in order of appearance.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in PLACEHOLDER.find_iter(text) {
        if !found.iter().any(|f| f == m.as_str()) {
            found.push(m.as_str().to_owned());
        }
    }
    found
}

/// Path of the template for `family` under `root`.
pub fn template_path(root: &Path, family: BaseFamily) -> PathBuf {
    root.join(family.template_file())
}

/// Read the template for `family`.
///
/// Read on every call so edits between runs (or during one) are picked up.
pub fn load_template(root: &Path, family: BaseFamily) -> Result<String, TemplateError> {
    let path = template_path(root, family);
    std::fs::read_to_string(&path).map_err(|e| TemplateError::Read { path, source: e })
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read template {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
