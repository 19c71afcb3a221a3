mod commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "dockergen",
    about = "Update Dockerfiles for every MediaWiki release branch"
)]
#[command(version)]
struct Cli {
    /// Create Git commit if there are changes
    #[arg(long)]
    commit: bool,
    /// Open a pull request with the changes
    #[arg(long, requires = "commit")]
    pr: bool,
    /// Directory holding the templates and branch directories
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Config file (default: <root>/dockergen.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    commands::update(commands::UpdateArgs {
        root: cli.root,
        config: cli.config,
        commit: cli.commit,
        pull_request: cli.pr,
    })
    .await
}
