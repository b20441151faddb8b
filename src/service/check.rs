use anyhow::Result;

use crate::config::AppConfig;
use crate::pipeline::LivenessChecker;
use crate::ui::Output;

pub struct CheckOptions {
    pub urls: Vec<String>,
    pub json: bool,
    pub force_local: bool,
    pub force_global: bool,
}

/// 只做存活检测，不需要任何凭据
pub async fn check(options: CheckOptions) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(options.force_local, options.force_global)?;
    let checker = LivenessChecker::from_config(&config.liveness)?;

    output.status(
        "Checking",
        &format!(
            "{} URLs (timeout {}s)",
            options.urls.len(),
            config.liveness.timeout_secs
        ),
    );
    let report = checker.check(&options.urls).await;

    if options.json {
        return output.json(&report);
    }

    output.liveness_summary(&report);
    eprintln!();
    output.probe_results(&report);

    Ok(())
}
