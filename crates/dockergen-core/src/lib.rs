//! Core types and configuration for dockergen.
//!
//! This crate defines the `dockergen.toml` schema ([`DockergenConfig`]),
//! build variants ([`Variant`]), the upstream tag list with its version
//! resolver ([`TagList`]), and the set of versions a run changed
//! ([`ChangeSet`]).

pub mod changes;
pub mod config;
pub mod error;
pub mod tags;
pub mod variant;

pub use changes::ChangeSet;
pub use config::{
    DockergenConfig, GenerateConfig, PublishConfig, UpstreamConfig, VersionsConfig,
};
pub use error::{Error, Result};
pub use tags::TagList;
pub use variant::{BaseFamily, Variant};
