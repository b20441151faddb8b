//! 库层错误类型
//!
//! 服务层与 CLI 统一使用 `anyhow`，这里的错误只描述流水线本身可能出现的失败。
//! 错误信息中不会出现 API key。

/// 流水线错误
#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    /// 启动时缺少凭据环境变量
    #[error("missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    /// 配置无效
    #[error("config error: {0}")]
    Config(String),

    /// 请求未能完成（DNS、连接、TLS、超时等）
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 服务端返回非 2xx 状态
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// 响应中没有任何 choice
    #[error("{0} response has no choices")]
    EmptyResponse(&'static str),

    /// 请求内容或 schema 无法序列化
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// 结构化输出无法解码为目标类型
    #[error("failed to decode {schema} from structured output: {source}")]
    Decode {
        schema: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
