//! Rust ecosystem detection (`Cargo.toml`).

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::analyzer::detectors::{Detector, PartialResult, max_confidence, sort_by_confidence};
use crate::analyzer::rules::RuleSet;
use crate::analyzer::{
    Architecture, BuildToolsInfo, Category, ConfigFileEvidence, Evidence, FilePatternEvidence,
    FrameworkId, FrameworkRecord,
};

/// Detects Rust frameworks from `Cargo.toml` and the `tauri.conf.json`
/// secondary marker.
///
/// The manifest is matched by substring containment against the raw text;
/// the TOML grammar is deliberately not parsed.
pub struct RustDetector {
    rules: Arc<RuleSet>,
}

impl RustDetector {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn analyze_cargo_toml(&self, content: &str) -> Vec<FrameworkRecord> {
        let mut frameworks = Vec::new();
        for (id, rule) in &self.rules.rust_rules {
            if rule.dependencies.iter().any(|dep| content.contains(dep.as_str())) {
                frameworks.push(FrameworkRecord::unversioned(
                    *id,
                    rule.confidence,
                    rule.category,
                ));
            }
        }
        frameworks
    }
}

impl Detector for RustDetector {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn weight(&self) -> f32 {
        0.9
    }

    fn detect(&self, project_path: &Path) -> PartialResult {
        let mut frameworks: Vec<FrameworkRecord> = Vec::new();
        let mut found_configs = Vec::new();

        let cargo_toml = project_path.join("Cargo.toml");
        if let Ok(content) = fs::read_to_string(&cargo_toml) {
            found_configs.push("Cargo.toml".to_string());
            frameworks.extend(self.analyze_cargo_toml(&content));
        }

        if project_path.join("tauri.conf.json").is_file() {
            found_configs.push("tauri.conf.json".to_string());
            frameworks.push(FrameworkRecord::unversioned(
                FrameworkId::Tauri,
                0.9,
                Category::Desktop,
            ));
        }

        if found_configs.is_empty() {
            return PartialResult::empty();
        }

        sort_by_confidence(&mut frameworks);
        let confidence = max_confidence(&frameworks);
        let attributed: Vec<FrameworkId> = frameworks.iter().map(|f| f.name).collect();
        let architecture = if frameworks.iter().any(|f| f.category == Category::Backend) {
            Architecture::Api
        } else {
            Architecture::Unknown
        };

        PartialResult {
            frameworks,
            architecture,
            build_tools: BuildToolsInfo {
                task_runner: Some("cargo".to_string()),
                package_manager: Some("cargo".to_string()),
                ..BuildToolsInfo::default()
            },
            confidence,
            evidence: Evidence {
                config_files: ConfigFileEvidence {
                    found: found_configs,
                    frameworks: attributed,
                },
                file_patterns: FilePatternEvidence {
                    extensions: vec![".rs".to_string()],
                    ..FilePatternEvidence::default()
                },
                ..Evidence::default()
            },
        }
    }
}
