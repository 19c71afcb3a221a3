use std::path::PathBuf;

use dockergen_core::ChangeSet;

use crate::client::{GitClient, PublishError};
use crate::executor::CommandExecutor;

/// What to do with generated changes.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Create a commit when there are changes.
    pub commit: bool,
    /// Also push the current branch and open a pull request.
    pub pull_request: bool,
    /// Remote the branch is pushed to.
    pub remote: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The change set was empty.
    NothingToPublish,
    /// Changes were left in the working tree.
    Uncommitted,
    Committed { message: String },
    PullRequestOpened { message: String, branch: String },
}

impl<E: CommandExecutor> GitClient<E> {
    /// Commit, push and open a pull request for `changes`, as far as
    /// `options` asks.
    ///
    /// `paths` are staged before the commit so generated files that git
    /// does not track yet are part of it.
    ///
    /// A pull request is only opened on top of the commit created here, so
    /// `pull_request` without `commit` publishes nothing. Failures leave any
    /// already created commit in place.
    pub async fn publish(
        &self,
        changes: &ChangeSet,
        paths: &[PathBuf],
        options: &PublishOptions,
    ) -> Result<PublishOutcome, PublishError> {
        if changes.is_empty() {
            return Ok(PublishOutcome::NothingToPublish);
        }
        if !options.commit {
            return Ok(PublishOutcome::Uncommitted);
        }

        let message = changes.commit_message();
        self.stage(paths).await?;
        self.commit_all(&message).await?;
        tracing::info!(%message, "created commit");

        if !options.pull_request {
            return Ok(PublishOutcome::Committed { message });
        }

        let branch = self.current_branch().await?;
        self.force_push(&options.remote, &branch).await?;
        self.create_pull_request().await?;
        tracing::info!(%branch, "opened pull request");

        Ok(PublishOutcome::PullRequestOpened { message, branch })
    }
}
