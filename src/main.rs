mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use url_aggregator::service;
use url_aggregator::ui::Output;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command).await {
        Output::new().error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Init { local } => service::init::initialize(local),
        Commands::Search {
            query,
            runs,
            keep_partial,
            rank,
            json,
            local,
            global,
        } => {
            service::search::search(service::search::SearchOptions {
                query,
                runs,
                keep_partial,
                rank,
                json,
                force_local: local,
                force_global: global,
            })
            .await
        }
        Commands::Check {
            urls,
            json,
            local,
            global,
        } => {
            service::check::check(service::check::CheckOptions {
                urls,
                json,
                force_local: local,
                force_global: global,
            })
            .await
        }
        Commands::Rank {
            urls,
            json,
            local,
            global,
        } => {
            service::rank::rank(service::rank::RankOptions {
                urls,
                json,
                force_local: local,
                force_global: global,
            })
            .await
        }
    }
}
