use std::path::PathBuf;

use dockergen_core::ChangeSet;
use dockergen_git::client::{FetchError, GitClient, PublishError};
use dockergen_git::command::{CommandError, Tool};
use dockergen_git::executor::CommandExecutor;
use dockergen_git::publish::{PublishOptions, PublishOutcome};
use mockall::{Sequence, mock};

mock! {
    Executor {}

    impl CommandExecutor for Executor {
        async fn exec(&self, tool: Tool, args: &[String]) -> Result<String, CommandError>;
        async fn exec_streaming(&self, tool: Tool, args: &[String]) -> Result<(), CommandError>;
    }
}

fn failed(tool: Tool, stderr: &str) -> CommandError {
    CommandError::CommandFailed {
        tool,
        args: vec![],
        stderr: stderr.to_owned(),
    }
}

fn argv(args: &[String], expected: &[&str]) -> bool {
    args.len() == expected.len() && args.iter().zip(expected).all(|(a, e)| a == e)
}

fn dirs(paths: &[&str]) -> Vec<PathBuf> {
    paths.iter().map(PathBuf::from).collect()
}

fn options(commit: bool, pull_request: bool) -> PublishOptions {
    PublishOptions {
        commit,
        pull_request,
        remote: "origin".to_owned(),
    }
}

const LS_REMOTE: &str = "\
a1\trefs/tags/1.38.5
a2\trefs/tags/1.38.5^{}
b1\trefs/tags/1.39.1
b2\trefs/tags/1.39.1^{}
c1\trefs/tags/1.39.2
c2\trefs/tags/1.39.2^{}
";

// ── Tag Fetch Tests ──

#[tokio::test]
async fn fetch_tags_runs_sorted_ls_remote() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|tool, args| {
            *tool == Tool::Git
                && argv(
                    args,
                    &[
                        "ls-remote",
                        "--sort=version:refname",
                        "--tags",
                        "https://github.com/wikimedia/mediawiki.git",
                    ],
                )
        })
        .times(1)
        .returning(|_, _| Ok(LS_REMOTE.to_owned()));

    let client = GitClient::with_executor(mock);
    let tags = client
        .fetch_tags("https://github.com/wikimedia/mediawiki.git")
        .await
        .unwrap();

    assert_eq!(tags.as_slice(), ["1.39.2", "1.39.1", "1.38.5"]);
    assert_eq!(tags.latest_version("1.39").unwrap(), "1.39.2");
}

#[tokio::test]
async fn fetch_tags_failure_propagates() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .returning(|_, _| Err(failed(Tool::Git, "Could not resolve host")));

    let client = GitClient::with_executor(mock);
    let result = client.fetch_tags("https://example.invalid/repo.git").await;

    assert!(matches!(
        result,
        Err(FetchError::LsRemote { ref repository, .. }) if repository == "https://example.invalid/repo.git"
    ));
}

#[tokio::test]
async fn fetch_tags_git_missing() {
    let mut mock = MockExecutor::new();

    mock.expect_exec().returning(|tool, _| {
        Err(CommandError::NotFound {
            tool,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    });

    let client = GitClient::with_executor(mock);
    let err = client.fetch_tags("repo").await.unwrap_err();

    let source = std::error::Error::source(&err).unwrap().to_string();
    assert!(source.contains("git CLI not found"), "got: {source}");
}

// ── Branch Tests ──

#[tokio::test]
async fn current_branch_trims_output() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|tool, args| *tool == Tool::Git && argv(args, &["branch", "--show-current"]))
        .returning(|_, _| Ok("update-1.39\n".to_owned()));

    let client = GitClient::with_executor(mock);
    assert_eq!(client.current_branch().await.unwrap(), "update-1.39");
}

#[tokio::test]
async fn current_branch_detached_head() {
    let mut mock = MockExecutor::new();

    mock.expect_exec().returning(|_, _| Ok("\n".to_owned()));

    let client = GitClient::with_executor(mock);
    let result = client.current_branch().await;

    assert!(matches!(result, Err(PublishError::NoCurrentBranch)));
}

// ── Publish Tests ──

#[tokio::test]
async fn publish_nothing_when_no_changes() {
    let mock = MockExecutor::new();

    let client = GitClient::with_executor(mock);
    let outcome = client
        .publish(&ChangeSet::new(), &dirs(&["1.39/apache"]), &options(true, true))
        .await
        .unwrap();

    assert_eq!(outcome, PublishOutcome::NothingToPublish);
}

#[tokio::test]
async fn publish_without_commit_runs_no_commands() {
    let mock = MockExecutor::new();
    let changes: ChangeSet = ["1.39.2"].into_iter().collect();

    let client = GitClient::with_executor(mock);
    let outcome = client
        .publish(&changes, &dirs(&["1.39/apache"]), &options(false, false))
        .await
        .unwrap();

    assert_eq!(outcome, PublishOutcome::Uncommitted);
}

#[tokio::test]
async fn publish_pr_without_commit_is_ignored() {
    let mock = MockExecutor::new();
    let changes: ChangeSet = ["1.39.2"].into_iter().collect();

    let client = GitClient::with_executor(mock);
    let outcome = client
        .publish(&changes, &dirs(&["1.39/apache"]), &options(false, true))
        .await
        .unwrap();

    assert_eq!(outcome, PublishOutcome::Uncommitted);
}

#[tokio::test]
async fn publish_commit_lists_versions_without_push() {
    let mut mock = MockExecutor::new();
    let mut seq = Sequence::new();
    let changes: ChangeSet = ["1.39.5", "1.40.1"].into_iter().collect();

    mock.expect_exec_streaming()
        .withf(|tool, args| {
            *tool == Tool::Git && argv(args, &["add", "-A", "--", "1.39/apache", "1.40/apache"])
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    mock.expect_exec_streaming()
        .withf(|tool, args| {
            *tool == Tool::Git && argv(args, &["commit", "-a", "-m", "Update to 1.40.1 / 1.39.5"])
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    let client = GitClient::with_executor(mock);
    let outcome = client
        .publish(
            &changes,
            &dirs(&["1.39/apache", "1.40/apache"]),
            &options(true, false),
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PublishOutcome::Committed {
            message: "Update to 1.40.1 / 1.39.5".to_owned()
        }
    );
}

#[tokio::test]
async fn publish_pull_request_pushes_current_branch() {
    let mut mock = MockExecutor::new();
    let mut seq = Sequence::new();
    let changes: ChangeSet = ["1.41.0"].into_iter().collect();

    mock.expect_exec_streaming()
        .withf(|tool, args| *tool == Tool::Git && argv(args, &["add", "-A", "--", "1.41/apache"]))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    mock.expect_exec_streaming()
        .withf(|tool, args| *tool == Tool::Git && args.first().is_some_and(|a| a == "commit"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    mock.expect_exec()
        .withf(|tool, args| *tool == Tool::Git && argv(args, &["branch", "--show-current"]))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok("bump\n".to_owned()));

    mock.expect_exec_streaming()
        .withf(|tool, args| *tool == Tool::Git && argv(args, &["push", "-f", "origin", "bump"]))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    mock.expect_exec_streaming()
        .withf(|tool, args| *tool == Tool::Gh && argv(args, &["pr", "create", "--fill"]))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    let client = GitClient::with_executor(mock);
    let outcome = client
        .publish(&changes, &dirs(&["1.41/apache"]), &options(true, true))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PublishOutcome::PullRequestOpened {
            message: "Update to 1.41.0".to_owned(),
            branch: "bump".to_owned(),
        }
    );
}

#[tokio::test]
async fn publish_commit_failure_stops_pipeline() {
    let mut mock = MockExecutor::new();
    let changes: ChangeSet = ["1.41.0"].into_iter().collect();

    mock.expect_exec_streaming()
        .withf(|_, args| args.first().is_some_and(|a| a == "add"))
        .times(1)
        .returning(|_, _| Ok(()));

    mock.expect_exec_streaming()
        .withf(|_, args| args.first().is_some_and(|a| a == "commit"))
        .times(1)
        .returning(|_, _| Err(failed(Tool::Git, "nothing to commit")));

    let client = GitClient::with_executor(mock);
    let result = client
        .publish(&changes, &dirs(&["1.41/apache"]), &options(true, true))
        .await;

    assert!(matches!(result, Err(PublishError::Commit { .. })));
}

#[tokio::test]
async fn publish_push_failure_reports_branch() {
    let mut mock = MockExecutor::new();
    let changes: ChangeSet = ["1.41.0"].into_iter().collect();

    mock.expect_exec_streaming()
        .withf(|_, args| args.first().is_some_and(|a| a == "add" || a == "commit"))
        .returning(|_, _| Ok(()));

    mock.expect_exec()
        .returning(|_, _| Ok("bump\n".to_owned()));

    mock.expect_exec_streaming()
        .withf(|_, args| args.first().is_some_and(|a| a == "push"))
        .returning(|_, _| Err(failed(Tool::Git, "rejected")));

    let client = GitClient::with_executor(mock);
    let result = client
        .publish(&changes, &dirs(&["1.41/apache"]), &options(true, true))
        .await;

    assert!(matches!(
        result,
        Err(PublishError::Push { ref branch, .. }) if branch == "bump"
    ));
}

#[tokio::test]
async fn publish_stage_failure_skips_commit() {
    let mut mock = MockExecutor::new();
    let changes: ChangeSet = ["1.40.0"].into_iter().collect();

    mock.expect_exec_streaming()
        .withf(|_, args| args.first().is_some_and(|a| a == "add"))
        .times(1)
        .returning(|_, _| Err(failed(Tool::Git, "pathspec did not match")));

    let client = GitClient::with_executor(mock);
    let result = client
        .publish(&changes, &dirs(&["1.40/apache"]), &options(true, false))
        .await;

    assert!(matches!(result, Err(PublishError::Stage { .. })));
}

#[tokio::test]
async fn stage_without_paths_runs_nothing() {
    let mock = MockExecutor::new();

    let client = GitClient::with_executor(mock);
    client.stage(&[]).await.unwrap();
}
