use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::ui::Output;

/// 写入配置模板（已存在则保留）
/// local: true 表示在本地目录初始化，false 表示在全局目录初始化
pub fn initialize(local: bool) -> Result<()> {
    let output = Output::new();
    let config_dir = AppConfig::get_config_dir(local);
    let config_path = config_dir.join("config.toml");
    let scope = AppConfig::get_scope_name(local, !local);

    std::fs::create_dir_all(&config_dir).with_context(|| {
        format!(
            "Failed to create config directory: {}",
            config_dir.display()
        )
    })?;

    if config_path.exists() {
        output.resource_action("Found", "config", &config_path);
    } else {
        std::fs::write(&config_path, AppConfig::template()).with_context(|| {
            format!("Failed to write config file: {}", config_path.display())
        })?;
        output.resource_action("Creating", "config", &config_path);
    }

    // 确认写入的（或已有的）配置可以解析
    let config = AppConfig::load_from_path(&config_path)?;
    config.validate()?;

    output.note(&format!(
        "Set {} and {} in your environment",
        config.search.api_key_env, config.structured.api_key_env
    ));
    output.finish("initialization", scope);

    Ok(())
}
