mod liveness;
mod normalize;
mod rank;
mod sample;
mod types;

pub use liveness::LivenessChecker;
pub use normalize::prefer_https;
pub use rank::rank_relevant;
pub use sample::{sample_urls, strip_trailing_separator, SampleOptions};
pub use types::{
    LivenessReport, ProbeMethod, ProbeOutcome, ProbeResult, RankReport, SampleReport,
    SearchReport,
};

use crate::context::AggregatorContext;
use crate::error::Result;

/// 采样 → 按 host 去重 → 存活检测
pub async fn run_search(
    ctx: &AggregatorContext,
    query: &str,
    options: SampleOptions,
) -> Result<SearchReport> {
    let sample = sample_urls(ctx.search(), ctx.structured(), query, options).await?;

    let normalized = prefer_https(&sample.urls);
    tracing::info!(
        "{} URLs after preferring https ({} sampled)",
        normalized.len(),
        sample.urls.len()
    );

    let liveness = ctx.liveness().check(&normalized).await;

    Ok(SearchReport {
        sample,
        normalized,
        liveness,
    })
}
