use std::collections::HashSet;

use aggregator_types::WebsiteList;

use crate::error::Result;
use crate::llm::{complete_structured, StructuredProvider};

use super::sample::strip_trailing_separator;
use super::types::RankReport;

const RANK_INSTRUCTION: &str =
    "Select the most important websites from this JSON. Return a short list.";

/// 让结构化模型从 URL 列表中挑出最重要的一小部分，并为每个网站命名
///
/// URL 列表以紧凑 JSON 数组作为 user 消息发送，temperature 为 0。模型返回的 url
/// 不保证是输入的子集：不在输入中的条目总会被计数，`restrict_to_input` 时被丢弃。
pub async fn rank_relevant(
    structured: &dyn StructuredProvider,
    urls: &[String],
    restrict_to_input: bool,
) -> Result<RankReport> {
    if urls.is_empty() {
        return Ok(RankReport::default());
    }

    let payload = serde_json::to_string(urls)?;

    let list: WebsiteList =
        complete_structured(structured, &payload, Some(RANK_INSTRUCTION), 0.0).await?;

    let known: HashSet<&str> = urls.iter().map(|u| strip_trailing_separator(u)).collect();
    let mut entries = Vec::with_capacity(list.websites_list.len());
    let mut outside_input = 0usize;

    for entry in list.websites_list {
        if known.contains(strip_trailing_separator(&entry.url)) {
            entries.push(entry);
            continue;
        }
        outside_input += 1;
        tracing::debug!("  Outside input: {} ({})", entry.url, entry.name);
        if !restrict_to_input {
            entries.push(entry);
        }
    }

    if outside_input > 0 {
        tracing::warn!(
            "Ranker returned {} URLs that were not in its input",
            outside_input
        );
    }

    tracing::info!("Ranker kept {} of {} URLs", entries.len(), urls.len());

    Ok(RankReport {
        entries,
        outside_input,
    })
}
