use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::AppConfig;
use crate::context::AggregatorContext;
use crate::pipeline::{self, SampleOptions, SearchReport};
use crate::ui::Output;
use crate::WebsiteEntry;

pub struct SearchOptions {
    pub query: String,
    /// 覆盖配置中的 `sampling.num_runs`
    pub runs: Option<usize>,
    pub keep_partial: bool,
    pub rank: bool,
    pub json: bool,
    pub force_local: bool,
    pub force_global: bool,
}

#[derive(Serialize)]
struct SearchJson<'a> {
    query: &'a str,
    #[serde(flatten)]
    report: &'a SearchReport,
    online: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ranked: Option<&'a [WebsiteEntry]>,
}

pub async fn search(options: SearchOptions) -> Result<()> {
    let SearchOptions {
        query,
        runs,
        keep_partial,
        rank,
        json,
        force_local,
        force_global,
    } = options;
    let output = Output::new();

    let config = AppConfig::load_with_scope(force_local, force_global)?;
    let sample_options = SampleOptions {
        num_runs: runs.unwrap_or(config.sampling.num_runs),
        keep_partial: keep_partial || config.sampling.keep_partial,
    };
    let ctx = AggregatorContext::from_env(config)?;

    output.status(
        "Sampling",
        &format!("{} runs for \"{}\"", sample_options.num_runs, query),
    );
    let report = pipeline::run_search(&ctx, &query, sample_options)
        .await
        .context("URL search failed")?;

    output.sample_summary(&report.sample);
    output.status(
        "Deduplicated",
        &format!("{} URLs by host", report.normalized.len()),
    );
    output.liveness_summary(&report.liveness);

    let online = report.online_urls();

    let ranked = if rank && !online.is_empty() {
        output.status("Ranking", &format!("{} URLs", online.len()));
        let ranked = pipeline::rank_relevant(
            ctx.structured(),
            &online,
            ctx.config().ranker.restrict_to_input,
        )
        .await
        .context("Ranking failed")?;
        if ranked.outside_input > 0 {
            output.warning(&format!(
                "{} ranked URLs were not among the checked URLs",
                ranked.outside_input
            ));
        }
        Some(ranked.entries)
    } else {
        None
    };

    if json {
        return output.json(&SearchJson {
            query: &query,
            report: &report,
            online,
            ranked: ranked.as_deref(),
        });
    }

    eprintln!();
    if online.is_empty() {
        output.info("No online URLs found");
        output.note("Try more runs with -n/--runs");
        return Ok(());
    }

    match ranked {
        Some(entries) => output.website_entries(&entries),
        None => output.url_list(&online),
    }

    Ok(())
}
