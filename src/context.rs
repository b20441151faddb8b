use std::sync::Arc;

use crate::config::{AppConfig, Credentials};
use crate::error::Result;
use crate::llm::{ChatClient, SearchProvider, StructuredProvider};
use crate::pipeline::LivenessChecker;

/// 进程级共享对象
///
/// 启动时构建一次：校验过的配置、两个补全服务句柄和存活检测客户端。构建后只读，
/// 显式传给每个阶段。
pub struct AggregatorContext {
    config: AppConfig,
    search: Arc<dyn SearchProvider>,
    structured: Arc<dyn StructuredProvider>,
    liveness: LivenessChecker,
}

impl AggregatorContext {
    /// 从环境变量读取凭据并创建 OpenAI 兼容客户端；缺少凭据立即失败
    pub fn from_env(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let credentials = Credentials::from_env(&config)?;

        let search = ChatClient::for_search(&config, &credentials)?;
        let structured = ChatClient::for_structured(&config, &credentials)?;

        Self::with_providers(config, Arc::new(search), Arc::new(structured))
    }

    /// 使用自定义的补全后端
    pub fn with_providers(
        config: AppConfig,
        search: Arc<dyn SearchProvider>,
        structured: Arc<dyn StructuredProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let liveness = LivenessChecker::from_config(&config.liveness)?;

        Ok(Self {
            config,
            search,
            structured,
            liveness,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn search(&self) -> &dyn SearchProvider {
        self.search.as_ref()
    }

    pub fn structured(&self) -> &dyn StructuredProvider {
        self.structured.as_ref()
    }

    pub fn liveness(&self) -> &LivenessChecker {
        &self.liveness
    }
}
