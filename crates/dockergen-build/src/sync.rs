use std::path::{Path, PathBuf};

use dockergen_core::{ChangeSet, GenerateConfig, TagList, Variant, VersionsConfig};
use globset::Glob;

use crate::extras::variant_extras;
use crate::template::{
    PlaceholderMap, TemplateError, load_template, render, token, unresolved_placeholders,
};

const DOCKERFILE: &str = "Dockerfile";

/// A Dockerfile whose content changed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedFile {
    pub branch: String,
    pub variant: Variant,
    /// Release the branch resolved to.
    pub version: String,
    pub path: PathBuf,
}

/// Result of one generation pass.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub changes: ChangeSet,
    pub updated: Vec<UpdatedFile>,
}

impl SyncReport {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// `<branch>/<variant>` directories holding updated files, relative to
    /// the project root, in update order without duplicates.
    pub fn changed_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for updated in &self.updated {
            let dir = Path::new(&updated.branch).join(updated.variant.name());
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        dirs
    }
}

/// Regenerates `<root>/<branch>/<variant>/Dockerfile` for every branch directory.
pub struct Synchronizer<'a> {
    root: &'a Path,
    generate: &'a GenerateConfig,
    versions: &'a VersionsConfig,
}

impl<'a> Synchronizer<'a> {
    pub fn new(root: &'a Path, generate: &'a GenerateConfig, versions: &'a VersionsConfig) -> Self {
        Self {
            root,
            generate,
            versions,
        }
    }

    /// Branch directories directly under the root whose names match
    /// `branch_pattern`, sorted by name.
    pub fn discover_branches(&self) -> Result<Vec<String>, SyncError> {
        let matcher = Glob::new(&self.generate.branch_pattern)
            .map_err(|e| SyncError::InvalidPattern {
                pattern: self.generate.branch_pattern.clone(),
                source: e,
            })?
            .compile_matcher();

        let entries = std::fs::read_dir(self.root).map_err(|e| SyncError::ReadDir {
            path: self.root.to_path_buf(),
            source: e,
        })?;

        let mut branches = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SyncError::ReadDir {
                path: self.root.to_path_buf(),
                source: e,
            })?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if matcher.is_match(&name) && entry.path().is_dir() {
                branches.push(name);
            }
        }

        branches.sort();
        tracing::debug!(?branches, "discovered branch directories");
        Ok(branches)
    }

    /// Render every (branch, variant) pair, writing only what changed.
    ///
    /// The first branch without a matching tag aborts the run; files written
    /// for earlier branches stay on disk. `on_update` is called right after
    /// each Dockerfile is written.
    pub fn run(
        &self,
        branches: &[String],
        tags: &TagList,
        mut on_update: impl FnMut(&UpdatedFile),
    ) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::default();

        for branch in branches {
            let version = tags.latest_version(branch)?;

            for variant in &self.generate.variants {
                if let Some(updated) = self.sync_variant(branch, version, variant)? {
                    report.changes.record(version);
                    on_update(&updated);
                    report.updated.push(updated);
                }
            }
        }

        Ok(report)
    }

    /// Placeholder values for one (branch, variant) pair.
    pub fn placeholders(&self, branch: &str, version: &str, variant: &Variant) -> PlaceholderMap {
        let mut map = PlaceholderMap::new();
        map.insert(token::PHP_VERSION, self.versions.php_for(branch))
            .insert(token::MEDIAWIKI_MAJOR_VERSION, branch)
            .insert(token::MEDIAWIKI_VERSION, version)
            .insert(token::VARIANT, variant.name())
            .insert(token::APCU_VERSION, self.versions.apcu.as_str())
            .insert(token::LUASANDBOX_VERSION, self.versions.luasandbox.as_str())
            .insert(token::CMD, variant.command())
            .insert(token::VARIANT_EXTRAS, variant_extras(variant));
        map
    }

    fn sync_variant(
        &self,
        branch: &str,
        version: &str,
        variant: &Variant,
    ) -> Result<Option<UpdatedFile>, SyncError> {
        let variant_dir = self.root.join(branch).join(variant.name());
        std::fs::create_dir_all(&variant_dir).map_err(|e| SyncError::CreateDir {
            path: variant_dir.clone(),
            source: e,
        })?;

        let template = load_template(self.root, variant.base_family())?;
        let rendered = render(&template, &self.placeholders(branch, version, variant));

        let leftover = unresolved_placeholders(&rendered);
        if !leftover.is_empty() {
            return Err(SyncError::UnresolvedPlaceholders {
                branch: branch.to_owned(),
                variant: variant.name().to_owned(),
                tokens: leftover,
            });
        }

        let dockerfile = variant_dir.join(DOCKERFILE);
        let updated = if read_existing(&dockerfile)?.as_deref() == Some(rendered.as_bytes()) {
            tracing::debug!(branch, %variant, "Dockerfile up to date");
            None
        } else {
            std::fs::write(&dockerfile, &rendered).map_err(|e| SyncError::Write {
                path: dockerfile.clone(),
                source: e,
            })?;
            tracing::info!(branch, %variant, version, "wrote Dockerfile");
            Some(UpdatedFile {
                branch: branch.to_owned(),
                variant: variant.clone(),
                version: version.to_owned(),
                path: dockerfile,
            })
        };

        self.copy_entrypoint(&variant_dir)?;
        Ok(updated)
    }

    /// Copy the entrypoint script into `variant_dir`, overwriting it.
    fn copy_entrypoint(&self, variant_dir: &Path) -> Result<(), SyncError> {
        let source = self.root.join(&self.generate.entrypoint);
        let file_name = source
            .file_name()
            .ok_or_else(|| SyncError::InvalidEntrypoint(self.generate.entrypoint.clone()))?;
        let target = variant_dir.join(file_name);

        std::fs::copy(&source, &target).map_err(|e| SyncError::CopyEntrypoint {
            path: source.clone(),
            source: e,
        })?;
        Ok(())
    }
}

/// Current content of `path`, or `None` if it does not exist.
fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, SyncError> {
    match std::fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SyncError::ReadOutput {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("invalid branch pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("failed to list {path}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Resolve(#[from] dockergen_core::Error),

    #[error("unresolved placeholders in {branch}/{variant}: {}", tokens.join(", "))]
    UnresolvedPlaceholders {
        branch: String,
        variant: String,
        tokens: Vec<String>,
    },

    #[error("failed to read {path}")]
    ReadOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("entrypoint {0:?} does not name a file")]
    InvalidEntrypoint(String),

    #[error("failed to copy entrypoint {path}")]
    CopyEntrypoint {
        path: PathBuf,
        source: std::io::Error,
    },
}
