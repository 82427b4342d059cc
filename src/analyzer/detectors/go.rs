//! Go ecosystem detection (`go.mod`).

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::analyzer::detectors::{Detector, PartialResult, max_confidence, sort_by_confidence};
use crate::analyzer::rules::RuleSet;
use crate::analyzer::{
    Architecture, BuildToolsInfo, Category, ConfigFileEvidence, Evidence, FilePatternEvidence,
    FrameworkId, FrameworkRecord,
};

/// Detects Go frameworks from module requirements in `go.mod`.
///
/// The module file is matched by substring containment against the raw
/// text, not by parsing the module grammar.
pub struct GoDetector {
    rules: Arc<RuleSet>,
}

impl GoDetector {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn analyze_go_mod(&self, content: &str) -> Vec<FrameworkRecord> {
        let mut frameworks = Vec::new();
        for (id, rule) in &self.rules.go_rules {
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

impl Detector for GoDetector {
    fn name(&self) -> &'static str {
        "go"
    }

    fn weight(&self) -> f32 {
        0.9
    }

    fn detect(&self, project_path: &Path) -> PartialResult {
        let go_mod = project_path.join("go.mod");
        let content = match fs::read_to_string(&go_mod) {
            Ok(content) => content,
            Err(_) => return PartialResult::empty(),
        };

        let mut frameworks = self.analyze_go_mod(&content);
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
                task_runner: Some("go".to_string()),
                package_manager: Some("go".to_string()),
                ..BuildToolsInfo::default()
            },
            confidence,
            evidence: Evidence {
                config_files: ConfigFileEvidence {
                    found: vec!["go.mod".to_string()],
                    frameworks: attributed,
                },
                file_patterns: FilePatternEvidence {
                    extensions: vec![".go".to_string()],
                    ..FilePatternEvidence::default()
                },
                ..Evidence::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> GoDetector {
        GoDetector::new(Arc::new(RuleSet::builtin().unwrap()))
    }

    #[test]
    fn detects_gin_backend() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("go.mod"),
            "module example.com/api\n\ngo 1.22\n\nrequire github.com/gin-gonic/gin v1.9.1\n",
        )
        .unwrap();

        let partial = detector().detect(dir.path());
        let gin = partial
            .frameworks
            .iter()
            .find(|f| f.name == FrameworkId::Gin)
            .expect("gin record");
        assert_eq!(gin.category, Category::Backend);
        assert_eq!(partial.architecture, Architecture::Api);
        assert_eq!(partial.build_tools.task_runner.as_deref(), Some("go"));
    }

    #[test]
    fn detects_cobra_cli() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("go.mod"),
            "module example.com/tool\n\nrequire github.com/spf13/cobra v1.8.0\n",
        )
        .unwrap();

        let partial = detector().detect(dir.path());
        assert!(partial.frameworks.iter().any(|f| f.name == FrameworkId::Cobra));
        assert_eq!(partial.architecture, Architecture::Unknown);
    }

    #[test]
    fn missing_go_mod_yields_empty_partial() {
        let dir = tempfile::tempdir().unwrap();
        let partial = detector().detect(dir.path());
        assert!(partial.frameworks.is_empty());
        assert!(partial.build_tools.task_runner.is_none());
    }
}
