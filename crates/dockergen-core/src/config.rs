use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::variant::Variant;

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "dockergen.toml";

/// dockergen.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockergenConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
    #[serde(default)]
    pub versions: VersionsConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Repository whose tags define the released versions
    #[serde(default = "default_repository")]
    pub repository: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Glob matched against directory names in the project root
    #[serde(default = "default_branch_pattern")]
    pub branch_pattern: String,
    /// Variants generated for every branch, in this order
    #[serde(default = "default_variants")]
    pub variants: Vec<Variant>,
    /// File copied verbatim into every variant directory
    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionsConfig {
    /// PHP version used when a branch has no override
    #[serde(default = "default_php")]
    pub php: String,
    /// Per-branch PHP version, keyed by branch name
    #[serde(default)]
    pub php_overrides: BTreeMap<String, String>,
    #[serde(default = "default_apcu")]
    pub apcu: String,
    #[serde(default = "default_luasandbox")]
    pub luasandbox: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Remote the pull request branch is pushed to
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            repository: default_repository(),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            branch_pattern: default_branch_pattern(),
            variants: default_variants(),
            entrypoint: default_entrypoint(),
        }
    }
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            php: default_php(),
            php_overrides: BTreeMap::new(),
            apcu: default_apcu(),
            luasandbox: default_luasandbox(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
        }
    }
}

impl VersionsConfig {
    /// PHP version for a branch: its override if present, the default otherwise.
    pub fn php_for(&self, branch: &str) -> &str {
        self.php_overrides
            .get(branch)
            .map(String::as_str)
            .unwrap_or(self.php.as_str())
    }
}

impl DockergenConfig {
    /// Load from dockergen.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(config_path: &Path) -> crate::Result<Self> {
        let content =
            std::fs::read_to_string(config_path).map_err(|e| crate::Error::ConfigLoad {
                path: config_path.to_path_buf(),
                source: e,
            })?;
        toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }
}

fn default_repository() -> String {
    "https://github.com/wikimedia/mediawiki.git".to_owned()
}

fn default_branch_pattern() -> String {
    "1.*".to_owned()
}

fn default_variants() -> Vec<Variant> {
    vec![Variant::apache()]
}

fn default_entrypoint() -> String {
    "entrypoint.sh".to_owned()
}

fn default_php() -> String {
    "8.1".to_owned()
}

fn default_apcu() -> String {
    "5.1.23".to_owned()
}

fn default_luasandbox() -> String {
    "4.1.2".to_owned()
}

fn default_remote() -> String {
    "origin".to_owned()
}
