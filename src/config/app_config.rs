use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AggregatorError;

const CONFIG_DIR_NAME: &str = ".url-aggregator";
const CONFIG_FILE_NAME: &str = "config.toml";

/// 配置作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    Auto,
    Local,
    Global,
}

/// 搜索增强模型（返回自由文本）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchProviderConfig {
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    #[serde(default = "default_search_model")]
    pub model: String,

    /// 存放 API key 的环境变量名
    #[serde(default = "default_search_api_key_env")]
    pub api_key_env: String,
}

impl Default for SearchProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            model: default_search_model(),
            api_key_env: default_search_api_key_env(),
        }
    }
}

fn default_search_base_url() -> String {
    "https://api.perplexity.ai".to_string()
}

fn default_search_model() -> String {
    "sonar-reasoning".to_string()
}

fn default_search_api_key_env() -> String {
    "PERPLEXITY_API_KEY".to_string()
}

/// 结构化输出模型（URL 抽取与排序）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StructuredProviderConfig {
    #[serde(default = "default_structured_base_url")]
    pub base_url: String,

    #[serde(default = "default_structured_model")]
    pub model: String,

    #[serde(default = "default_structured_api_key_env")]
    pub api_key_env: String,
}

impl Default for StructuredProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_structured_base_url(),
            model: default_structured_model(),
            api_key_env: default_structured_api_key_env(),
        }
    }
}

fn default_structured_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_structured_model() -> String {
    "gpt-4o".to_string()
}

fn default_structured_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

/// 重复采样配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SamplingConfig {
    /// 同一查询的采样次数（默认: 5）
    #[serde(default = "default_num_runs")]
    pub num_runs: usize,

    /// 单次采样失败时保留已完成的结果而不是整体失败（默认: false）
    #[serde(default)]
    pub keep_partial: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            num_runs: default_num_runs(),
            keep_partial: false,
        }
    }
}

fn default_num_runs() -> usize {
    5
}

/// 存活检测配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LivenessConfig {
    /// 单次 HEAD/GET 超时秒数（默认: 5）
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,

    /// 视为在线的状态码（默认: [200, 403]）
    #[serde(default = "default_accept_status")]
    pub accept_status: Vec<u16>,

    /// 同时探测的 URL 数（默认: 1，即逐个探测）
    #[serde(default = "default_probe_concurrency")]
    pub concurrency: usize,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_probe_timeout_secs(),
            accept_status: default_accept_status(),
            concurrency: default_probe_concurrency(),
        }
    }
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_accept_status() -> Vec<u16> {
    vec![200, 403]
}

fn default_probe_concurrency() -> usize {
    1
}

/// 排序配置
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RankerConfig {
    /// 丢弃模型返回的、不在输入中的 URL（默认: false）
    #[serde(default)]
    pub restrict_to_input: bool,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchProviderConfig,

    #[serde(default)]
    pub structured: StructuredProviderConfig,

    /// 补全请求超时秒数，0 表示不限（默认: 120）
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub sampling: SamplingConfig,

    #[serde(default)]
    pub liveness: LivenessConfig,

    #[serde(default)]
    pub ranker: RankerConfig,
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchProviderConfig::default(),
            structured: StructuredProviderConfig::default(),
            request_timeout_secs: default_request_timeout_secs(),
            sampling: SamplingConfig::default(),
            liveness: LivenessConfig::default(),
            ranker: RankerConfig::default(),
        }
    }
}

impl AppConfig {
    /// 全局配置目录：~/.url-aggregator/
    pub fn global_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    /// 本地配置目录：./.url-aggregator/
    pub fn local_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    /// 检查本地配置是否存在
    /// 注意：如果当前目录是用户主目录，则不认为是本地配置
    pub fn has_local_config() -> bool {
        let current_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(_) => return false,
        };

        if let Some(home) = dirs::home_dir() {
            let current_canonical = current_dir.canonicalize().unwrap_or(current_dir.clone());
            let home_canonical = home.canonicalize().unwrap_or(home);

            if current_canonical == home_canonical {
                return false;
            }
        }

        Self::local_dir().join(CONFIG_FILE_NAME).exists()
    }

    /// 验证作用域标志（不能同时指定 local 和 global）
    pub fn validate_scope_flags(local: bool, global: bool) -> Result<()> {
        if local && global {
            anyhow::bail!("Cannot specify both --local and --global, please choose one");
        }
        Ok(())
    }

    /// 获取当前作用域名称，返回 "local" 或 "global"
    pub fn get_scope_name(force_local: bool, force_global: bool) -> &'static str {
        if force_local {
            "local"
        } else if force_global {
            "global"
        } else if Self::has_local_config() {
            "local"
        } else {
            "global"
        }
    }

    /// 根据 local 标志获取配置目录
    pub fn get_config_dir(local: bool) -> PathBuf {
        if local {
            Self::local_dir()
        } else {
            Self::global_dir()
        }
    }

    /// 加载配置：根据 local/global 标志或优先级加载
    /// - local = true: 强制使用本地配置
    /// - global = true: 强制使用全局配置
    /// - 两者都为 false: 优先本地配置，其次全局配置，最后默认配置
    pub fn load_with_scope(force_local: bool, force_global: bool) -> Result<Self> {
        Self::validate_scope_flags(force_local, force_global)?;

        let scope = if force_local {
            ConfigScope::Local
        } else if force_global {
            ConfigScope::Global
        } else {
            ConfigScope::Auto
        };

        let path = match scope {
            ConfigScope::Auto if Self::has_local_config() => Self::local_dir(),
            ConfigScope::Auto | ConfigScope::Global => Self::global_dir(),
            ConfigScope::Local => Self::local_dir(),
        }
        .join(CONFIG_FILE_NAME);

        let config = Self::load_from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    /// 从指定路径加载配置文件，文件不存在时使用默认配置
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        tracing::debug!("Loaded app config from: {}", path.display());
        tracing::debug!("Search model: {}", config.search.model);
        tracing::debug!("Structured model: {}", config.structured.model);

        Ok(config)
    }

    /// 校验取值范围
    pub fn validate(&self) -> std::result::Result<(), AggregatorError> {
        if self.search.base_url.trim().is_empty() || self.search.model.trim().is_empty() {
            return Err(AggregatorError::Config(
                "search.base_url and search.model must not be empty".into(),
            ));
        }
        if self.structured.base_url.trim().is_empty() || self.structured.model.trim().is_empty()
        {
            return Err(AggregatorError::Config(
                "structured.base_url and structured.model must not be empty".into(),
            ));
        }
        if self.liveness.timeout_secs == 0 {
            return Err(AggregatorError::Config(
                "liveness.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.liveness.concurrency == 0 {
            return Err(AggregatorError::Config(
                "liveness.concurrency must be greater than 0".into(),
            ));
        }
        if self.liveness.accept_status.is_empty() {
            return Err(AggregatorError::Config(
                "liveness.accept_status must list at least one status code".into(),
            ));
        }
        Ok(())
    }

    /// 配置文件模板（`init` 命令写入）
    pub fn template() -> &'static str {
        r#"# url-aggregator 配置文件
# API key 从环境变量读取，这里只填变量名

# 补全请求超时秒数，0 表示不限
request_timeout_secs = 120

[search]
base_url = "https://api.perplexity.ai"
model = "sonar-reasoning"
api_key_env = "PERPLEXITY_API_KEY"

[structured]
base_url = "https://api.openai.com/v1"
model = "gpt-4o"
api_key_env = "OPENAI_API_KEY"

[sampling]
num_runs = 5
keep_partial = false

[liveness]
timeout_secs = 5
accept_status = [200, 403]
concurrency = 1

[ranker]
restrict_to_input = false
"#
    }
}
