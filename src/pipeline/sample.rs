use std::collections::HashSet;

use aggregator_types::UrlList;

use crate::error::{AggregatorError, Result};
use crate::llm::{complete_structured, SearchProvider, StructuredProvider};

use super::types::SampleReport;

/// 重复采样参数
#[derive(Debug, Clone, Copy)]
pub struct SampleOptions {
    pub num_runs: usize,
    /// 单次失败时跳过该次采样而不是整体失败
    pub keep_partial: bool,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            num_runs: 5,
            keep_partial: false,
        }
    }
}

/// 去掉末尾的单个 `/`
pub fn strip_trailing_separator(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// 对同一查询执行 `num_runs` 次「搜索 → 抽取 URL」，合并去重
///
/// 各次采样严格串行。默认任何一次失败都会使整个采样失败且不返回部分结果；
/// 设置 `keep_partial` 后失败的采样被跳过，只有全部失败时才返回最后一个错误。
pub async fn sample_urls(
    search: &dyn SearchProvider,
    structured: &dyn StructuredProvider,
    query: &str,
    options: SampleOptions,
) -> Result<SampleReport> {
    let mut report = SampleReport {
        runs_requested: options.num_runs,
        ..SampleReport::default()
    };
    let mut seen: HashSet<String> = HashSet::new();
    let mut last_error: Option<AggregatorError> = None;

    for run in 0..options.num_runs {
        tracing::debug!("Sampling run {}/{}", run + 1, options.num_runs);

        let urls = match sample_once(search, structured, query).await {
            Ok(urls) => urls,
            Err(e) if options.keep_partial => {
                tracing::warn!("Sampling run {} failed: {}", run + 1, e);
                report.runs_failed += 1;
                last_error = Some(e);
                continue;
            }
            Err(e) => return Err(e),
        };

        report.runs_completed += 1;
        for url in urls {
            let url = strip_trailing_separator(&url).to_string();
            if seen.insert(url.clone()) {
                report.urls.push(url);
            }
        }
    }

    if report.runs_completed == 0 {
        if let Some(e) = last_error {
            return Err(e);
        }
    }

    tracing::info!(
        "Sampled {} distinct URLs from {}/{} runs",
        report.urls.len(),
        report.runs_completed,
        report.runs_requested
    );

    Ok(report)
}

async fn sample_once(
    search: &dyn SearchProvider,
    structured: &dyn StructuredProvider,
    query: &str,
) -> Result<Vec<String>> {
    let answer = search.complete_text(query).await?;
    let list: UrlList = complete_structured(structured, &answer, None, 0.0).await?;
    Ok(list.urls)
}
