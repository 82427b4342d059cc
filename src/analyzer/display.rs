//! Display formatting for detection results.

use colored::*;

use crate::analyzer::{Category, DetectionResult};

/// Display mode for detection output
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode {
    /// Compact summary (default)
    Summary,
    /// Summary plus per-record evidence breakdown
    Detailed,
    /// JSON output
    Json,
}

/// Render a detection result, returning the output string
pub fn render_result(result: &DetectionResult, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Summary => render_summary(result, false),
        DisplayMode::Detailed => render_summary(result, true),
        DisplayMode::Json => {
            serde_json::to_string_pretty(result).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
        }
    }
}

fn render_summary(result: &DetectionResult, detailed: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} {}\n",
        "▶".bright_blue(),
        "FRAMEWORK DETECTION".bright_white().bold()
    ));
    output.push_str(&format!("{}\n", "─".repeat(50).dimmed()));

    output.push_str(&format!(
        "{} Project Type: {}\n",
        "│".dimmed(),
        format!("{:?}", result.project_type).yellow()
    ));
    output.push_str(&format!(
        "{} Architecture: {}\n",
        "│".dimmed(),
        format!("{:?}", result.architecture).green()
    ));
    output.push_str(&format!(
        "{} Confidence: {:.0}%\n",
        "│".dimmed(),
        result.confidence * 100.0
    ));

    if result.frameworks.is_empty() {
        output.push_str(&format!(
            "{} {}\n",
            "│".dimmed(),
            "No frameworks detected".dimmed()
        ));
    } else {
        output.push_str(&format!("{}\n", "│".dimmed()));
        for framework in &result.frameworks {
            let version = if framework.version == "unknown" {
                String::new()
            } else {
                format!(" v{}", framework.version)
            };
            output.push_str(&format!(
                "{} {} {}{} ({}, {:.0}%)\n",
                "│".dimmed(),
                category_marker(framework.category),
                framework.name.as_str().magenta(),
                version.blue(),
                format!("{:?}", framework.category).dimmed(),
                framework.confidence * 100.0
            ));
        }
    }

    let tools = &result.build_tools;
    let tool_lines: Vec<(&str, &Option<String>)> = vec![
        ("Bundler", &tools.bundler),
        ("Transpiler", &tools.transpiler),
        ("Task Runner", &tools.task_runner),
        ("Package Manager", &tools.package_manager),
    ];
    if tool_lines.iter().any(|(_, v)| v.is_some()) {
        output.push_str(&format!("{}\n", "│".dimmed()));
        for (label, value) in tool_lines {
            if let Some(value) = value {
                output.push_str(&format!(
                    "{} {}: {}\n",
                    "│".dimmed(),
                    label,
                    value.cyan()
                ));
            }
        }
    }

    if detailed {
        output.push_str(&format!("{}\n", "│".dimmed()));
        let evidence = &result.evidence;
        output.push_str(&format!(
            "{} Evidence: {} dependencies, {} config files, {} file patterns\n",
            "│".dimmed(),
            evidence.manifest.dependencies.len() + evidence.manifest.dev_dependencies.len(),
            evidence.config_files.found.len(),
            evidence.file_patterns.patterns.len()
        ));
        if !evidence.config_files.found.is_empty() {
            output.push_str(&format!(
                "{}   config: {}\n",
                "│".dimmed(),
                evidence.config_files.found.join(", ").dimmed()
            ));
        }
        if !evidence.file_patterns.extensions.is_empty() {
            output.push_str(&format!(
                "{}   extensions: {}\n",
                "│".dimmed(),
                evidence.file_patterns.extensions.join(", ").dimmed()
            ));
        }
    }

    output.push_str(&format!("{}\n", "─".repeat(50).dimmed()));
    output
}

fn category_marker(category: Category) -> &'static str {
    match category {
        Category::Frontend => "🎨",
        Category::Backend | Category::WebFramework => "⚙",
        Category::Mobile => "📱",
        Category::Desktop => "🖥",
        Category::MetaFramework => "🧩",
        Category::BuildTool => "🔧",
        Category::Testing => "🧪",
        Category::Utility => "📦",
    }
}
