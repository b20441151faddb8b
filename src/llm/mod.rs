pub mod client;
pub mod provider;

pub use client::ChatClient;
pub use provider::{complete_structured, SearchProvider, StructuredPrompt, StructuredProvider};
