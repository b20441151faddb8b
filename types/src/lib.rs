//! url-aggregator 的共享数据结构
//!
//! 只包含模型结构化输出所需的数据形状与 schema 生成，不依赖任何网络或运行时。

mod models;
mod schema;

pub use models::{UrlList, WebsiteEntry, WebsiteList};
pub use schema::StructuredOutput;
