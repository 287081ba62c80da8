use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyliner::config::{verbose_enabled, HookConfig};
use skyliner::dry_run::DryRunTransport;
use skyliner::error::format_error;
use skyliner::Hook;
use skyliner_git::{GitCli, GitConfig};
use skyliner_sync::{DeliveryTransport, HttpDeliveryClient};

const VERBOSE_FILTER: &str = "info,skyliner=debug,skyliner_core=debug,skyliner_git=debug,skyliner_sync=debug";

#[derive(Parser)]
#[command(
    name = "skyliner-hook",
    version,
    about = "Git post-receive hook that reports pushed commits to Skyliner"
)]
struct Cli {
    /// Repository to read config and history from
    #[arg(long, env = "GIT_DIR")]
    git_dir: Option<PathBuf>,
    /// Log request and response bodies
    #[arg(short, long)]
    verbose: bool,
    /// Print payloads to stdout instead of sending them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{}", format_error(&err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let git = GitCli::new(cli.git_dir);
    let git_config = GitConfig::load(&git).context("reading git config")?;

    init_logging(cli.verbose || verbose_enabled(&git_config));

    let config = HookConfig::from_git_config(&git_config)?;
    tracing::debug!(
        "reporting {} to {}",
        config.delivery.repo_name,
        config.delivery.server
    );
    let transport: Box<dyn DeliveryTransport> = if cli.dry_run {
        Box::new(DryRunTransport::new(std::io::stdout()))
    } else {
        Box::new(HttpDeliveryClient::new(config.delivery.clone()))
    };

    let hook = Hook::new(&git, transport.as_ref()).with_extraction(config.extraction);
    hook.run(std::io::stdin().lock()).await;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
