//! External tool operations for dockergen.
//!
//! # Run pipeline
//!
//! ```text
//! dockergen [--commit [--pr]]
//!   1. Fetch tags ── git ls-remote --sort=version:refname --tags <upstream>
//!   2. Generate   ── dockergen-build Synchronizer::run()
//!   3. Stage      ── git add -A -- <branch>/<variant> ...
//!   4. Commit     ── git commit -a -m "Update to <versions>"
//!   5. Push       ── git push -f <remote> <current branch>
//!   6. PR         ── gh pr create --fill
//! ```
//!
//! Every command goes through [`CommandExecutor`] so the whole pipeline can
//! be exercised against mocks.

pub mod client;
pub mod command;
pub mod executor;
pub mod publish;

pub use client::{FetchError, GitClient, PublishError};
pub use command::{CommandError, Tool};
pub use executor::{CommandExecutor, RealExecutor};
pub use publish::{PublishOptions, PublishOutcome};
