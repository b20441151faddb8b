use serde::Serialize;

use aggregator_types::WebsiteEntry;

/// 重复采样结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct SampleReport {
    /// 去重后的 URL，按首次出现顺序
    pub urls: Vec<String>,
    pub runs_requested: usize,
    pub runs_completed: usize,
    pub runs_failed: usize,
}

/// 产生最终状态码的探测方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMethod {
    Head,
    Get,
}

/// 单个 URL 的探测结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// 状态码在接受列表中
    Online { status: u16, method: ProbeMethod },
    /// 有响应，但状态码不被接受
    Rejected { status: u16, method: ProbeMethod },
    /// HEAD 与 GET 都没能拿到响应
    Unreachable,
}

impl ProbeOutcome {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub url: String,
    pub outcome: ProbeOutcome,
}

/// 存活检测报告，顺序与输入一致
#[derive(Debug, Clone, Default, Serialize)]
pub struct LivenessReport {
    pub results: Vec<ProbeResult>,
}

impl LivenessReport {
    pub fn online_urls(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.outcome.is_online())
            .map(|r| r.url.clone())
            .collect()
    }

    pub fn online_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_online()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, ProbeOutcome::Rejected { .. }))
            .count()
    }

    pub fn unreachable_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == ProbeOutcome::Unreachable)
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.len() - self.online_count()
    }
}

/// 排序结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankReport {
    pub entries: Vec<WebsiteEntry>,
    /// 模型返回的、不在输入中的条目数
    pub outside_input: usize,
}

/// 一次完整搜索（采样 → 规范化 → 存活检测）的各阶段结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchReport {
    pub sample: SampleReport,
    pub normalized: Vec<String>,
    pub liveness: LivenessReport,
}

impl SearchReport {
    pub fn online_urls(&self) -> Vec<String> {
        self.liveness.online_urls()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str, outcome: ProbeOutcome) -> ProbeResult {
        ProbeResult {
            url: url.to_string(),
            outcome,
        }
    }

    #[test]
    fn test_liveness_report_counts() {
        let report = LivenessReport {
            results: vec![
                result(
                    "https://a.com",
                    ProbeOutcome::Online {
                        status: 200,
                        method: ProbeMethod::Head,
                    },
                ),
                result(
                    "https://b.com",
                    ProbeOutcome::Rejected {
                        status: 404,
                        method: ProbeMethod::Head,
                    },
                ),
                result("https://c.com", ProbeOutcome::Unreachable),
                result(
                    "https://d.com",
                    ProbeOutcome::Online {
                        status: 403,
                        method: ProbeMethod::Get,
                    },
                ),
            ],
        };

        assert_eq!(report.online_urls(), vec!["https://a.com", "https://d.com"]);
        assert_eq!(report.online_count(), 2);
        assert_eq!(report.rejected_count(), 1);
        assert_eq!(report.unreachable_count(), 1);
        assert_eq!(report.failure_count(), 2);
    }

    #[test]
    fn test_probe_outcome_json() {
        let online = ProbeOutcome::Online {
            status: 200,
            method: ProbeMethod::Get,
        };
        assert_eq!(
            serde_json::to_value(online).unwrap(),
            serde_json::json!({"state": "online", "status": 200, "method": "get"})
        );
        assert_eq!(
            serde_json::to_value(ProbeOutcome::Unreachable).unwrap(),
            serde_json::json!({"state": "unreachable"})
        );
    }
}
