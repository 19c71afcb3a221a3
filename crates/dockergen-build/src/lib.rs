//! Dockerfile generation for every release branch.
//!
//! # Generation pass
//!
//! ```text
//! <root>/
//!   Dockerfile-debian.template   ── variants without the -alpine suffix
//!   Dockerfile-alpine.template   ── *-alpine variants
//!   entrypoint.sh                ── copied into every variant directory
//!   1.39/apache/Dockerfile       ── rendered for branch 1.39, variant apache
//!   1.39/apache/entrypoint.sh
//! ```
//!
//! For each branch directory the newest upstream tag starting with
//! `<branch>.` is resolved, then every variant's template is rendered with
//! that version. A Dockerfile is written only when its content changes;
//! the entrypoint is always re-copied.

pub mod extras;
pub mod sync;
pub mod template;

pub use sync::{SyncError, SyncReport, Synchronizer, UpdatedFile};
pub use template::{PlaceholderMap, render};
