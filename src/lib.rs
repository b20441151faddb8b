//! # url-aggregator
//!
//! 对同一个自然语言请求多次调用搜索增强模型，用结构化输出从回答中抽取 URL，
//! 按 host 去重（优先 https）并做存活检测，最后可选地让模型挑出最相关的少数网站。
//!
//! ```no_run
//! # async fn example() -> url_aggregator::Result<()> {
//! use url_aggregator::{AggregatorContext, AppConfig};
//!
//! let ctx = AggregatorContext::from_env(AppConfig::default())?;
//! let urls = url_aggregator::search_for_web_urls(&ctx, "rust web frameworks", 5).await?;
//! let top = url_aggregator::get_top_relevant_websites(&ctx, &urls).await?;
//! for site in &top {
//!     println!("{}: {}", site.name, site.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod service;
pub mod ui;

pub use aggregator_types::{UrlList, WebsiteEntry, WebsiteList};
pub use config::{AppConfig, Credentials};
pub use context::AggregatorContext;
pub use error::{AggregatorError, Result};

use pipeline::SampleOptions;

/// 采样 `num_runs` 次，按 host 去重后返回当前在线的 URL
///
/// 是否保留部分采样结果由 `sampling.keep_partial` 配置决定。
pub async fn search_for_web_urls(
    ctx: &AggregatorContext,
    query: &str,
    num_runs: usize,
) -> Result<Vec<String>> {
    let options = SampleOptions {
        num_runs,
        keep_partial: ctx.config().sampling.keep_partial,
    };
    let report = pipeline::run_search(ctx, query, options).await?;
    Ok(report.online_urls())
}

/// 让模型从给定 URL 中挑出最重要的一小部分
pub async fn get_top_relevant_websites(
    ctx: &AggregatorContext,
    website_urls: &[String],
) -> Result<Vec<WebsiteEntry>> {
    let report = pipeline::rank_relevant(
        ctx.structured(),
        website_urls,
        ctx.config().ranker.restrict_to_input,
    )
    .await?;
    Ok(report.entries)
}
