use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 从模型回答中抽取出的 URL 列表（结构化输出的目标形状）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UrlList {
    pub urls: Vec<String>,
}

/// 排序阶段返回的单个网站
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WebsiteEntry {
    /// The name of the website.
    pub name: String,
    /// The url of the website.
    pub url: String,
}

/// 排序阶段的结构化输出
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WebsiteList {
    /// A short list.
    pub websites_list: Vec<WebsiteEntry>,
}
