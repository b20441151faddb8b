use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "url-aggregator")]
#[command(about = "Aggregate, deduplicate and verify web URLs suggested by LLM search", long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Write a config template (optional, defaults apply without one)")]
    Init {
        /// Initialize in local directory (./.url-aggregator) instead of global (~/.url-aggregator)
        #[arg(short, long)]
        local: bool,
    },

    #[command(about = "Sample URLs for a query, keep one per host and check they are online")]
    Search {
        query: String,

        /// Number of sampling runs (default from config, 5)
        #[arg(short = 'n', long)]
        runs: Option<usize>,

        /// Keep results from successful runs when a run fails
        #[arg(long)]
        keep_partial: bool,

        /// Ask the model to pick the most important websites afterwards
        #[arg(short, long)]
        rank: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Use local config (./.url-aggregator)
        #[arg(short, long)]
        local: bool,

        /// Use global config (~/.url-aggregator)
        #[arg(short, long)]
        global: bool,
    },

    #[command(about = "Check whether URLs are online (HEAD, falling back to GET)")]
    Check {
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Use local config (./.url-aggregator)
        #[arg(short, long)]
        local: bool,

        /// Use global config (~/.url-aggregator)
        #[arg(short, long)]
        global: bool,
    },

    #[command(about = "Ask the model to pick the most important websites from a URL list")]
    Rank {
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Use local config (./.url-aggregator)
        #[arg(short, long)]
        local: bool,

        /// Use global config (~/.url-aggregator)
        #[arg(short, long)]
        global: bool,
    },
}
