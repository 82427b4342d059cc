//! Java/JVM ecosystem detection (`pom.xml`, `build.gradle`).

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::analyzer::detectors::{Detector, PartialResult, max_confidence, sort_by_confidence};
use crate::analyzer::rules::RuleSet;
use crate::analyzer::{
    Architecture, BuildToolsInfo, Category, ConfigFileEvidence, Evidence, FilePatternEvidence,
    FrameworkId, FrameworkRecord,
};

/// Detects JVM frameworks from Maven and Gradle build files plus the
/// Android manifest marker under `app/src/main`.
///
/// Build files are matched by substring containment against the raw text;
/// neither the POM XML nor the Gradle DSL is parsed.
pub struct JavaDetector {
    rules: Arc<RuleSet>,
}

impl JavaDetector {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn analyze_build_file(&self, content: &str) -> Vec<FrameworkRecord> {
        let mut frameworks = Vec::new();
        for (id, rule) in &self.rules.java_rules {
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

impl Detector for JavaDetector {
    fn name(&self) -> &'static str {
        "java"
    }

    fn weight(&self) -> f32 {
        0.9
    }

    fn detect(&self, project_path: &Path) -> PartialResult {
        let mut frameworks: Vec<FrameworkRecord> = Vec::new();
        let mut found_configs = Vec::new();

        let has_pom = project_path.join("pom.xml").is_file();
        if has_pom {
            if let Ok(content) = fs::read_to_string(project_path.join("pom.xml")) {
                found_configs.push("pom.xml".to_string());
                frameworks.extend(self.analyze_build_file(&content));
            }
        }

        let has_gradle = project_path.join("build.gradle").is_file();
        if has_gradle {
            if let Ok(content) = fs::read_to_string(project_path.join("build.gradle")) {
                found_configs.push("build.gradle".to_string());
                frameworks.extend(self.analyze_build_file(&content));
                frameworks.push(FrameworkRecord::unversioned(
                    FrameworkId::Gradle,
                    0.9,
                    Category::BuildTool,
                ));
            }
        }

        // Android projects keep their manifest below app/src/main
        if project_path
            .join("app")
            .join("src")
            .join("main")
            .join("AndroidManifest.xml")
            .is_file()
        {
            found_configs.push("AndroidManifest.xml".to_string());
            frameworks.push(FrameworkRecord::unversioned(
                FrameworkId::Android,
                0.9,
                Category::Mobile,
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

        let build_runner = if has_pom {
            Some("maven".to_string())
        } else if has_gradle {
            Some("gradle".to_string())
        } else {
            None
        };

        PartialResult {
            frameworks,
            architecture,
            build_tools: BuildToolsInfo {
                task_runner: build_runner.clone(),
                package_manager: build_runner,
                ..BuildToolsInfo::default()
            },
            confidence,
            evidence: Evidence {
                config_files: ConfigFileEvidence {
                    found: found_configs,
                    frameworks: attributed,
                },
                file_patterns: FilePatternEvidence {
                    extensions: vec![".java".to_string(), ".kt".to_string()],
                    ..FilePatternEvidence::default()
                },
                ..Evidence::default()
            },
        }
    }
}
