use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{AppConfig, Credentials};
use crate::error::{AggregatorError, Result};

use super::provider::{SearchProvider, StructuredPrompt, StructuredProvider};

/// OpenAI 兼容的 chat/completions 客户端
///
/// 同一个实现既用作搜索增强补全，也用作结构化补全，区别只在于请求是否带
/// `response_format`。
pub struct ChatClient {
    client: Client,
    provider: &'static str,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl ChatClient {
    /// `timeout_secs` 为 0 时不设置请求超时
    pub fn new(
        provider: &'static str,
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder.build()?;

        tracing::debug!(
            "Created {} chat client: model={}, base_url={}",
            provider,
            model,
            base_url
        );

        Ok(Self {
            client,
            provider,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 搜索增强模型客户端
    pub fn for_search(config: &AppConfig, credentials: &Credentials) -> Result<Self> {
        Self::new(
            "search",
            &config.search.base_url,
            &config.search.model,
            &credentials.search_api_key,
            config.request_timeout_secs,
        )
    }

    /// 结构化输出模型客户端
    pub fn for_structured(config: &AppConfig, credentials: &Credentials) -> Result<Self> {
        Self::new(
            "structured",
            &config.structured.base_url,
            &config.structured.model,
            &credentials.structured_api_key,
            config.request_timeout_secs,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send(&self, request: &ChatRequest<'_>) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("{} API error ({}): {}", self.provider, status, body);
            return Err(AggregatorError::Api {
                provider: self.provider,
                status,
                body,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(AggregatorError::EmptyResponse(self.provider))
    }
}

#[async_trait]
impl SearchProvider for ChatClient {
    async fn complete_text(&self, query: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: query.to_string(),
            }],
            temperature: None,
            response_format: None,
        };

        let text = self.send(&request).await?;
        tracing::debug!("Search model answer: {}", text);
        Ok(text)
    }
}

#[async_trait]
impl StructuredProvider for ChatClient {
    async fn complete_json(&self, prompt: &StructuredPrompt) -> Result<String> {
        let mut messages = vec![ChatMessage {
            role: "user",
            content: prompt.user.clone(),
        }];
        if let Some(system) = &prompt.system {
            messages.push(ChatMessage {
                role: "system",
                content: system.clone(),
            });
        }

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: Some(prompt.temperature),
            response_format: Some(ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: prompt.schema_name.clone(),
                    strict: true,
                    schema: prompt.schema.clone(),
                },
            }),
        };

        self.send(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o",
            messages: vec![
                ChatMessage {
                    role: "user",
                    content: "hi".into(),
                },
                ChatMessage {
                    role: "system",
                    content: "be brief".into(),
                },
            ],
            temperature: Some(0.0),
            response_format: Some(ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "UrlList".into(),
                    strict: true,
                    schema: serde_json::json!({"type": "object"}),
                },
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][0]["content"], "hi");
        assert_eq!(value["messages"][1]["role"], "system");
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(value["response_format"]["json_schema"]["name"], "UrlList");
        assert_eq!(value["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn test_text_request_omits_optional_fields() {
        let request = ChatRequest {
            model: "sonar-reasoning",
            messages: vec![ChatMessage {
                role: "user",
                content: "query".into(),
            }],
            temperature: None,
            response_format: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("temperature"));
        assert!(!obj.contains_key("response_format"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ChatClient::new("search", "http://localhost:1234/", "m", "k", 0).unwrap();
        assert_eq!(client.base_url, "http://localhost:1234");
        assert_eq!(client.model(), "m");
    }
}
