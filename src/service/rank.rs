use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::context::AggregatorContext;
use crate::pipeline;
use crate::ui::Output;

pub struct RankOptions {
    pub urls: Vec<String>,
    pub json: bool,
    pub force_local: bool,
    pub force_global: bool,
}

pub async fn rank(options: RankOptions) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(options.force_local, options.force_global)?;
    let ctx = AggregatorContext::from_env(config)?;

    output.status("Ranking", &format!("{} URLs", options.urls.len()));
    let report = pipeline::rank_relevant(
        ctx.structured(),
        &options.urls,
        ctx.config().ranker.restrict_to_input,
    )
    .await
    .context("Ranking failed")?;

    if report.outside_input > 0 {
        output.warning(&format!(
            "{} ranked URLs were not in the input",
            report.outside_input
        ));
    }

    if options.json {
        return output.json(&report);
    }

    eprintln!();
    if report.entries.is_empty() {
        output.info("Ranker returned no websites");
    } else {
        output.website_entries(&report.entries);
    }

    Ok(())
}
