use std::path::PathBuf;

use dockergen_core::TagList;

use crate::command::{CommandError, Tool};
use crate::executor::{CommandExecutor, RealExecutor};

/// git / gh operations client, parameterized over the executor for testability.
pub struct GitClient<E: CommandExecutor = RealExecutor> {
    executor: E,
}

impl GitClient<RealExecutor> {
    /// Client running every command inside `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            executor: RealExecutor::new(working_dir),
        }
    }
}

impl<E: CommandExecutor> GitClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Tags ──

    /// Fetch every release tag of `repository`, newest first.
    ///
    /// Called once per run; the resulting [`TagList`] is passed to everything
    /// that resolves versions.
    pub async fn fetch_tags(&self, repository: &str) -> Result<TagList, FetchError> {
        let output = self
            .executor
            .exec(
                Tool::Git,
                &args(["ls-remote", "--sort=version:refname", "--tags", repository]),
            )
            .await
            .map_err(|e| FetchError::LsRemote {
                repository: repository.to_owned(),
                source: e,
            })?;

        let tags = TagList::from_ls_remote(&output);
        tracing::debug!(repository, count = tags.len(), "fetched upstream tags");
        Ok(tags)
    }

    // ── Commit ──

    /// Stage `paths`, new files included (`git add -A -- <paths>`).
    ///
    /// Paths are relative to the working directory. Nothing runs when
    /// `paths` is empty.
    pub async fn stage(&self, paths: &[PathBuf]) -> Result<(), PublishError> {
        if paths.is_empty() {
            return Ok(());
        }

        let mut argv = args(["add", "-A", "--"]);
        argv.extend(paths.iter().map(|p| p.display().to_string()));

        self.executor
            .exec_streaming(Tool::Git, &argv)
            .await
            .map_err(|e| PublishError::Stage { source: e })
    }

    /// Commit every tracked modification (`git commit -a`).
    pub async fn commit_all(&self, message: &str) -> Result<(), PublishError> {
        self.executor
            .exec_streaming(Tool::Git, &args(["commit", "-a", "-m", message]))
            .await
            .map_err(|e| PublishError::Commit { source: e })
    }

    // ── Pull request ──

    pub async fn current_branch(&self) -> Result<String, PublishError> {
        let output = self
            .executor
            .exec(Tool::Git, &args(["branch", "--show-current"]))
            .await
            .map_err(|e| PublishError::CurrentBranch { source: e })?;

        let branch = output.trim();
        if branch.is_empty() {
            return Err(PublishError::NoCurrentBranch);
        }
        Ok(branch.to_owned())
    }

    /// Force-push `branch` to `remote` under the same name.
    pub async fn force_push(&self, remote: &str, branch: &str) -> Result<(), PublishError> {
        self.executor
            .exec_streaming(Tool::Git, &args(["push", "-f", remote, branch]))
            .await
            .map_err(|e| PublishError::Push {
                remote: remote.to_owned(),
                branch: branch.to_owned(),
                source: e,
            })
    }

    /// Open a pull request whose title and body come from the commit.
    pub async fn create_pull_request(&self) -> Result<(), PublishError> {
        self.executor
            .exec_streaming(Tool::Gh, &args(["pr", "create", "--fill"]))
            .await
            .map_err(|e| PublishError::PullRequest { source: e })
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to list tags of {repository}")]
    LsRemote {
        repository: String,
        source: CommandError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to stage generated files")]
    Stage { source: CommandError },

    #[error("failed to create commit")]
    Commit { source: CommandError },

    #[error("failed to determine current git branch")]
    CurrentBranch { source: CommandError },

    #[error("not on a branch (detached HEAD?), cannot push for a pull request")]
    NoCurrentBranch,

    #[error("failed to push {branch} to {remote}")]
    Push {
        remote: String,
        branch: String,
        source: CommandError,
    },

    #[error("failed to create pull request")]
    PullRequest { source: CommandError },
}
