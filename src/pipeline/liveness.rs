use futures::stream::{self, StreamExt};
use reqwest::{redirect, Client};
use std::time::Duration;

use crate::config::LivenessConfig;
use crate::error::Result;

use super::types::{LivenessReport, ProbeMethod, ProbeOutcome, ProbeResult};

/// URL 存活检测
///
/// 先发 HEAD（不跟随重定向）；HEAD 请求本身失败时退回一次 GET（最多跟随 10 次
/// 重定向）。两者共用同一个超时。只看状态码，响应体直接丢弃。
pub struct LivenessChecker {
    head_client: Client,
    get_client: Client,
    accept_status: Vec<u16>,
    concurrency: usize,
}

impl LivenessChecker {
    pub fn new(timeout: Duration, accept_status: Vec<u16>, concurrency: usize) -> Result<Self> {
        let head_client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;
        let get_client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            head_client,
            get_client,
            accept_status,
            concurrency: concurrency.max(1),
        })
    }

    pub fn from_config(config: &LivenessConfig) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.timeout_secs),
            config.accept_status.clone(),
            config.concurrency,
        )
    }

    /// 探测单个 URL
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.head_client.head(url).send().await {
            Ok(response) => self.classify(response.status().as_u16(), ProbeMethod::Head),
            Err(e) => {
                tracing::debug!("HEAD {} failed, falling back to GET: {}", url, e);
                match self.get_client.get(url).send().await {
                    Ok(response) => self.classify(response.status().as_u16(), ProbeMethod::Get),
                    Err(e) => {
                        tracing::debug!("GET {} failed: {}", url, e);
                        ProbeOutcome::Unreachable
                    }
                }
            }
        }
    }

    /// 探测全部 URL，报告顺序与输入一致
    pub async fn check(&self, urls: &[String]) -> LivenessReport {
        let results: Vec<ProbeResult> = stream::iter(urls)
            .map(|url| async move {
                let outcome = self.probe(url).await;
                if !outcome.is_online() {
                    tracing::debug!("Dropping {}: {:?}", url, outcome);
                }
                ProbeResult {
                    url: url.clone(),
                    outcome,
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let report = LivenessReport { results };
        tracing::info!(
            "Liveness: {} online, {} rejected, {} unreachable",
            report.online_count(),
            report.rejected_count(),
            report.unreachable_count()
        );
        report
    }

    /// 只返回在线的 URL
    pub async fn filter_online(&self, urls: &[String]) -> Vec<String> {
        self.check(urls).await.online_urls()
    }

    fn classify(&self, status: u16, method: ProbeMethod) -> ProbeOutcome {
        if self.accept_status.contains(&status) {
            ProbeOutcome::Online { status, method }
        } else {
            ProbeOutcome::Rejected { status, method }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> LivenessChecker {
        LivenessChecker::from_config(&LivenessConfig::default()).unwrap()
    }

    #[test]
    fn test_default_accepts_200_and_403() {
        let c = checker();
        assert!(c.classify(200, ProbeMethod::Head).is_online());
        assert!(c.classify(403, ProbeMethod::Get).is_online());
        assert_eq!(
            c.classify(404, ProbeMethod::Head),
            ProbeOutcome::Rejected {
                status: 404,
                method: ProbeMethod::Head
            }
        );
        assert!(!c.classify(301, ProbeMethod::Head).is_online());
        assert!(!c.classify(500, ProbeMethod::Get).is_online());
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let c = LivenessChecker::new(Duration::from_secs(1), vec![200], 0).unwrap();
        assert_eq!(c.concurrency, 1);
    }

    #[tokio::test]
    async fn test_invalid_url_is_unreachable() {
        let c = checker();
        assert_eq!(c.probe("not a url").await, ProbeOutcome::Unreachable);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let report = checker().check(&[]).await;
        assert!(report.results.is_empty());
    }
}
