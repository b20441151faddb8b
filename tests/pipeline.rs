//! 端到端流水线测试：脚本化的补全后端 + 本地模拟站点

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url_aggregator::llm::{SearchProvider, StructuredPrompt, StructuredProvider};
use url_aggregator::pipeline::{run_search, SampleOptions};
use url_aggregator::{AggregatorContext, AggregatorError, AppConfig, Result};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct EchoSearch;

#[async_trait]
impl SearchProvider for EchoSearch {
    async fn complete_text(&self, query: &str) -> Result<String> {
        Ok(format!("Some sites about {query}"))
    }
}

/// 按顺序返回预置的 JSON；耗尽后报错
struct ScriptedStructured {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<StructuredPrompt>>,
}

impl ScriptedStructured {
    fn new<I: IntoIterator<Item = String>>(replies: I) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<StructuredPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredProvider for ScriptedStructured {
    async fn complete_json(&self, prompt: &StructuredPrompt) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(AggregatorError::EmptyResponse("scripted"))
    }
}

fn url_list(urls: &[String]) -> String {
    serde_json::json!({ "urls": urls }).to_string()
}

async fn mount_head(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn context(structured: Arc<ScriptedStructured>) -> AggregatorContext {
    AggregatorContext::with_providers(AppConfig::default(), Arc::new(EchoSearch), structured)
        .unwrap()
}

#[tokio::test]
async fn test_search_merges_runs_and_drops_offline_sites() {
    let server = MockServer::start().await;
    mount_head(&server, "/alive", 200).await;
    mount_head(&server, "/members", 403).await;
    mount_head(&server, "/gone", 404).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let base = server.uri();
    let structured = ScriptedStructured::new([
        url_list(&[format!("{base}/alive/"), format!("{base}/gone")]),
        url_list(&[format!("{base}/alive"), format!("{base}/members")]),
    ]);
    let ctx = context(structured.clone());

    let urls = url_aggregator::search_for_web_urls(&ctx, "rust tooling", 2)
        .await
        .unwrap();

    assert_eq!(urls, vec![format!("{base}/alive"), format!("{base}/members")]);

    let prompts = structured.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts.iter().all(|p| p.schema_name == "UrlList"));
    assert!(prompts.iter().all(|p| p.user == "Some sites about rust tooling"));
}

#[tokio::test]
async fn test_run_search_reports_each_stage() {
    let server = MockServer::start().await;
    mount_head(&server, "/docs", 200).await;

    let base = server.uri();
    let structured = ScriptedStructured::new([url_list(&[
        format!("{base}/docs"),
        "http://127.0.0.1:1/x".to_string(),
        "https://127.0.0.1:1/x".to_string(),
        "ftp://127.0.0.1:1/file".to_string(),
    ])]);
    let ctx = context(structured);

    let report = run_search(
        &ctx,
        "docs",
        SampleOptions {
            num_runs: 1,
            keep_partial: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(report.sample.urls.len(), 4);
    assert_eq!(report.sample.runs_completed, 1);
    assert_eq!(
        report.normalized,
        vec![format!("{base}/docs"), "https://127.0.0.1:1/x".to_string()]
    );
    assert_eq!(report.liveness.results.len(), 2);
    assert_eq!(report.online_urls(), vec![format!("{base}/docs")]);
}

#[tokio::test]
async fn test_failed_run_aborts_search_by_default() {
    let structured = ScriptedStructured::new([url_list(&["https://a.com".to_string()])]);
    let ctx = context(structured);

    let err = url_aggregator::search_for_web_urls(&ctx, "q", 2)
        .await
        .unwrap_err();

    assert!(matches!(err, AggregatorError::EmptyResponse(_)));
}

#[tokio::test]
async fn test_zero_runs_probe_nothing() {
    let structured = ScriptedStructured::new([]);
    let ctx = context(structured.clone());

    let urls = url_aggregator::search_for_web_urls(&ctx, "q", 0).await.unwrap();

    assert!(urls.is_empty());
    assert!(structured.prompts().is_empty());
}

#[tokio::test]
async fn test_top_relevant_websites_uses_ranker_instruction() {
    let structured = ScriptedStructured::new([serde_json::json!({
        "websites_list": [
            {"name": "Rust", "url": "https://www.rust-lang.org"},
            {"name": "Elsewhere", "url": "https://elsewhere.dev"}
        ]
    })
    .to_string()]);
    let ctx = context(structured.clone());

    let input = vec![
        "https://www.rust-lang.org".to_string(),
        "https://crates.io".to_string(),
    ];
    let top = url_aggregator::get_top_relevant_websites(&ctx, &input)
        .await
        .unwrap();

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "Rust");

    let prompts = structured.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].schema_name, "WebsiteList");
    assert_eq!(
        prompts[0].user,
        r#"["https://www.rust-lang.org","https://crates.io"]"#
    );
    assert!(prompts[0].system.is_some());
}

#[tokio::test]
async fn test_restricted_ranker_drops_unknown_sites() {
    let structured = ScriptedStructured::new([serde_json::json!({
        "websites_list": [
            {"name": "Elsewhere", "url": "https://elsewhere.dev"},
            {"name": "Crates", "url": "https://crates.io/"}
        ]
    })
    .to_string()]);
    let mut config = AppConfig::default();
    config.ranker.restrict_to_input = true;
    let ctx = AggregatorContext::with_providers(config, Arc::new(EchoSearch), structured).unwrap();

    let top = url_aggregator::get_top_relevant_websites(&ctx, &["https://crates.io".to_string()])
        .await
        .unwrap();

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "Crates");
}
