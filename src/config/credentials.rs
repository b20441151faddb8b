use std::fmt;

use crate::config::AppConfig;
use crate::error::{AggregatorError, Result};

/// 两个补全服务的 API key
///
/// 启动时从环境变量读取一次，之后只读。`Debug` 输出不包含 key 本身。
#[derive(Clone)]
pub struct Credentials {
    pub search_api_key: String,
    pub structured_api_key: String,
}

impl Credentials {
    /// 从配置中指定的环境变量读取凭据，缺失或为空即报错
    pub fn from_env(config: &AppConfig) -> Result<Self> {
        Self::from_lookup(config, |name| std::env::var(name).ok())
    }

    fn from_lookup<F>(config: &AppConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AggregatorError::MissingCredential(name.to_string()))
        };

        Ok(Self {
            search_api_key: read(&config.search.api_key_env)?,
            structured_api_key: read(&config.structured.api_key_env)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("search_api_key", &"<redacted>")
            .field("structured_api_key", &"<redacted>")
            .finish()
    }
}
