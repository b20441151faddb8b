use console::Style;
use serde::Serialize;
use std::path::Path;

use crate::pipeline::{LivenessReport, ProbeMethod, ProbeOutcome, SampleReport};
use crate::WebsiteEntry;

/// 命令行输出格式化工具
/// 提供统一的 Cargo 风格输出：状态行写 stderr，结果写 stdout
pub struct Output {
    green: Style,
    bold: Style,
    dim: Style,
}

impl Output {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// 显示状态消息（如 "Sampling 5 runs" 等）
    /// 格式: "    Sampling 5 runs"（动词右对齐到 12 字符）
    pub fn status(&self, action: &str, target: &str) {
        eprintln!("{:>12} {}", self.green.apply_to(action), target);
    }

    /// 显示创建/查找资源消息
    /// 格式: "    Creating config at /path/to/config"
    pub fn resource_action(&self, action: &str, resource: &str, path: &Path) {
        eprintln!(
            "{:>12} {} at {}",
            self.green.apply_to(action),
            resource,
            path.display()
        );
    }

    /// 显示完成消息
    /// 格式: "    Finished action for scope"
    /// 自动在前面添加空行
    pub fn finish(&self, action: &str, scope: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {} for {} scope",
            self.green.apply_to("Finished"),
            action,
            scope
        );
    }

    /// 显示统计信息
    /// 格式: "             3 online, 1 rejected"
    pub fn stats(&self, items: &[(&str, usize)]) {
        let parts: Vec<String> = items
            .iter()
            .map(|(name, count)| format!("{} {}", count, name))
            .collect();
        eprintln!("{:>12} {}", "", self.dim.apply_to(parts.join(", ")));
    }

    /// 采样阶段汇总
    pub fn sample_summary(&self, report: &SampleReport) {
        self.status(
            "Sampled",
            &format!(
                "{} distinct URLs from {}/{} runs",
                report.urls.len(),
                report.runs_completed,
                report.runs_requested
            ),
        );
        if report.runs_failed > 0 {
            self.warning(&format!("{} sampling runs failed", report.runs_failed));
        }
    }

    /// 存活检测汇总
    pub fn liveness_summary(&self, report: &LivenessReport) {
        self.status("Checked", &format!("{} URLs", report.results.len()));
        self.stats(&[
            ("online", report.online_count()),
            ("rejected", report.rejected_count()),
            ("unreachable", report.unreachable_count()),
        ]);
    }

    /// URL 列表
    /// 格式: "[1/3] https://example.com"
    pub fn url_list(&self, urls: &[String]) {
        let total = urls.len();
        for (i, url) in urls.iter().enumerate() {
            println!(
                "[{}] {}",
                self.dim.apply_to(format!("{}/{}", i + 1, total)),
                url
            );
        }
    }

    /// 每个 URL 的探测结论
    /// 格式: "[1/3] 200 HEAD https://example.com"
    pub fn probe_results(&self, report: &LivenessReport) {
        let total = report.results.len();
        for (i, result) in report.results.iter().enumerate() {
            let label = match result.outcome {
                ProbeOutcome::Online { status, method } => self
                    .green
                    .apply_to(format!("{} {}", status, method_name(method)))
                    .to_string(),
                ProbeOutcome::Rejected { status, method } => Style::new()
                    .yellow()
                    .apply_to(format!("{} {}", status, method_name(method)))
                    .to_string(),
                ProbeOutcome::Unreachable => {
                    Style::new().red().apply_to("unreachable").to_string()
                }
            };
            println!(
                "[{}] {} {}",
                self.dim.apply_to(format!("{}/{}", i + 1, total)),
                label,
                result.url
            );
        }
    }

    /// 排序后的网站列表
    /// 格式: "[1/3] Name"
    ///       "      https://example.com"
    pub fn website_entries(&self, entries: &[WebsiteEntry]) {
        let total = entries.len();
        for (i, entry) in entries.iter().enumerate() {
            let index_part = format!("{}/{}", i + 1, total);
            println!(
                "[{}] {}",
                self.dim.apply_to(&index_part),
                self.bold.apply_to(&entry.name)
            );
            println!("{}{}", " ".repeat(index_part.len() + 3), entry.url);
        }
    }

    /// 以 JSON 输出结果（stdout）
    pub fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// 显示注意事项（右对齐）
    pub fn note(&self, message: &str) {
        eprintln!("{:>12} {}", self.dim.apply_to("Note"), message);
    }

    /// 显示警告（黄色，右对齐）
    pub fn warning(&self, message: &str) {
        eprintln!(
            "{:>12} {}",
            Style::new().yellow().bold().apply_to("Warning"),
            message
        );
    }

    /// 显示错误（红色，右对齐）
    pub fn error(&self, message: &str) {
        eprintln!(
            "{:>12} {}",
            Style::new().red().bold().apply_to("Error"),
            message
        );
    }

    /// 显示提示消息（标准输出，右对齐）
    pub fn info(&self, message: &str) {
        println!("{:>12} {}", "", message);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

fn method_name(method: ProbeMethod) -> &'static str {
    match method {
        ProbeMethod::Head => "HEAD",
        ProbeMethod::Get => "GET",
    }
}
