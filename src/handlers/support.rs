use colored::*;

use crate::analyzer::RuleSet;

/// List the frameworks and ecosystems the active rule tables cover
pub fn handle_support(detailed: bool) -> crate::Result<String> {
    let rules = RuleSet::builtin()?;
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} {}\n",
        "▶".bright_blue(),
        "SUPPORTED FRAMEWORKS".bright_white().bold()
    ));
    output.push_str(&format!("{}\n", "─".repeat(50).dimmed()));

    let sections: [(&str, Vec<String>); 6] = [
        (
            "Node manifests",
            rules.manifest_rules.keys().map(|k| k.to_string()).collect(),
        ),
        (
            "Python",
            rules.python_rules.keys().map(|k| k.to_string()).collect(),
        ),
        (
            "Rust",
            rules.rust_rules.keys().map(|k| k.to_string()).collect(),
        ),
        (
            ".NET",
            rules.dotnet_rules.keys().map(|k| k.to_string()).collect(),
        ),
        ("Go", rules.go_rules.keys().map(|k| k.to_string()).collect()),
        (
            "Java",
            rules.java_rules.keys().map(|k| k.to_string()).collect(),
        ),
    ];

    for (label, frameworks) in sections {
        if detailed {
            output.push_str(&format!("{} {}:\n", "│".dimmed(), label.yellow()));
            for framework in frameworks {
                output.push_str(&format!("{}   {}\n", "│".dimmed(), framework.magenta()));
            }
        } else {
            output.push_str(&format!(
                "{} {}: {}\n",
                "│".dimmed(),
                label.yellow(),
                frameworks.join(", ")
            ));
        }
    }

    output.push_str(&format!(
        "{} Marker files: {}\n",
        "│".dimmed(),
        rules.config_file_rules.len()
    ));
    output.push_str(&format!(
        "{} File patterns: {}\n",
        "│".dimmed(),
        rules.file_pattern_rules.len()
    ));
    output.push_str(&format!("{}\n", "─".repeat(50).dimmed()));

    println!("{output}");
    Ok(output)
}
