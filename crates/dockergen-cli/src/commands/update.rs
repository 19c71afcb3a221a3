use dockergen_build::Synchronizer;
use dockergen_core::DockergenConfig;
use dockergen_git::{GitClient, PublishOptions, PublishOutcome};
use std::path::PathBuf;

pub struct UpdateArgs {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub commit: bool,
    pub pull_request: bool,
}

/// Regenerate every branch's Dockerfiles, then commit / open a PR if asked.
pub async fn update(args: UpdateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => DockergenConfig::load_from(path)?,
        None => DockergenConfig::load(&args.root)?,
    };

    let sync = Synchronizer::new(&args.root, &config.generate, &config.versions);
    let branches = sync.discover_branches()?;
    if branches.is_empty() {
        tracing::warn!(
            pattern = %config.generate.branch_pattern,
            "no branch directories found"
        );
        println!("No changes");
        return Ok(());
    }

    // Fetched once; every branch resolves against the same list.
    let client = GitClient::new(&args.root);
    tracing::info!(repository = %config.upstream.repository, "fetching release tags");
    let tags = client.fetch_tags(&config.upstream.repository).await?;

    let report = sync.run(&branches, &tags, |updated| {
        println!("Updated {}/{}", updated.branch, updated.variant);
    })?;

    if !report.has_changes() {
        println!("No changes");
        return Ok(());
    }

    let options = PublishOptions {
        commit: args.commit,
        pull_request: args.pull_request,
        remote: config.publish.remote.clone(),
    };

    match client
        .publish(&report.changes, &report.changed_dirs(), &options)
        .await?
    {
        PublishOutcome::NothingToPublish | PublishOutcome::Uncommitted => {}
        PublishOutcome::Committed { message } => println!("Committed: {message}"),
        PublishOutcome::PullRequestOpened { message, branch } => {
            println!("Committed: {message}");
            println!("Opened pull request from {branch}");
        }
    }

    Ok(())
}
