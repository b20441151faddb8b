mod app_config;
mod credentials;

pub use app_config::{
    AppConfig, ConfigScope, LivenessConfig, RankerConfig, SamplingConfig, SearchProviderConfig,
    StructuredProviderConfig,
};
pub use credentials::Credentials;
