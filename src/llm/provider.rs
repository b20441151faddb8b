//! 补全能力抽象
//!
//! 流水线只依赖这两个 trait：一个返回自由文本的搜索增强补全，
//! 一个按给定 schema 约束输出的结构化补全。任何兼容 JSON Schema 的后端都可以实现。

use aggregator_types::StructuredOutput;
use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AggregatorError, Result};

/// 搜索增强补全：单条 user 消息进，原始文本出
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn complete_text(&self, query: &str) -> Result<String>;
}

/// 一次结构化补全请求
#[derive(Debug, Clone)]
pub struct StructuredPrompt {
    pub user: String,
    /// 跟在 user 消息之后发送
    pub system: Option<String>,
    pub schema_name: String,
    pub schema: Value,
    pub temperature: f32,
}

/// 结构化补全：返回符合 schema 的 JSON 文本
#[async_trait]
pub trait StructuredProvider: Send + Sync {
    async fn complete_json(&self, prompt: &StructuredPrompt) -> Result<String>;
}

/// 发送 prompt 与目标类型的 schema，解码为 `T`
pub async fn complete_structured<T: StructuredOutput>(
    provider: &dyn StructuredProvider,
    prompt_text: &str,
    system_instruction: Option<&str>,
    temperature: f32,
) -> Result<T> {
    let prompt = StructuredPrompt {
        user: prompt_text.to_string(),
        system: system_instruction.map(str::to_string),
        schema_name: T::output_name(),
        schema: T::strict_schema()?,
        temperature,
    };

    let raw = provider.complete_json(&prompt).await?;
    tracing::debug!("Structured output ({}): {}", prompt.schema_name, raw);

    serde_json::from_str(&raw).map_err(|source| AggregatorError::Decode {
        schema: prompt.schema_name,
        source,
    })
}
