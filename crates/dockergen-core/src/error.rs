use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid variant name {name:?}: {reason}")]
    InvalidVariant { name: String, reason: &'static str },

    // ── Version resolution ──
    #[error("couldn't find release for {branch} (no upstream tag starts with \"{branch}.\")")]
    VersionNotFound { branch: String },
}
