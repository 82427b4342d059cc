//! Python ecosystem detection (`requirements.txt`, `pyproject.toml`).

use std::fs;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::detectors::{Detector, PartialResult, max_confidence, sort_by_confidence};
use crate::analyzer::rules::RuleSet;
use crate::analyzer::{
    Architecture, BuildToolsInfo, Category, ConfigFileEvidence, Evidence, FilePatternEvidence,
    FrameworkId, FrameworkRecord,
};

/// Requirement manifests checked at the project root
const REQUIREMENT_FILES: [&str; 4] = ["requirements.txt", "pyproject.toml", "setup.py", "Pipfile"];

static PINNED_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"==([0-9][0-9a-zA-Z.]*)").expect("valid version regex")
});

/// Detects Python frameworks from requirement manifests and secondary
/// markers (`manage.py`, notebook files).
///
/// Manifests are matched by case-insensitive substring containment, not by
/// parsing the requirement grammar.
pub struct PythonDetector {
    rules: Arc<RuleSet>,
}

impl PythonDetector {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn analyze_requirements(&self, content: &str, pinned: bool) -> Vec<FrameworkRecord> {
        let haystack = content.to_lowercase();
        let mut frameworks = Vec::new();

        for (id, rule) in &self.rules.python_rules {
            for dep in &rule.dependencies {
                if haystack.contains(&dep.to_lowercase()) {
                    let version = if pinned {
                        extract_pinned_version(content, dep)
                    } else {
                        "unknown".to_string()
                    };
                    frameworks.push(FrameworkRecord {
                        name: *id,
                        version,
                        confidence: rule.confidence,
                        category: rule.category,
                    });
                    break;
                }
            }
        }

        frameworks
    }
}

impl Detector for PythonDetector {
    fn name(&self) -> &'static str {
        "python"
    }

    fn weight(&self) -> f32 {
        0.9
    }

    fn detect(&self, project_path: &Path) -> PartialResult {
        let entries = match fs::read_dir(project_path) {
            Ok(entries) => entries,
            Err(_) => return PartialResult::empty(),
        };

        let mut frameworks: Vec<FrameworkRecord> = Vec::new();
        let mut found_configs = Vec::new();

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };

            if REQUIREMENT_FILES.contains(&name) {
                found_configs.push(name.to_string());
                if name == "requirements.txt" || name == "pyproject.toml" {
                    if let Ok(content) = fs::read_to_string(entry.path()) {
                        frameworks
                            .extend(self.analyze_requirements(&content, name == "requirements.txt"));
                    }
                }
            } else if name == "manage.py" {
                frameworks.push(FrameworkRecord::unversioned(
                    FrameworkId::Django,
                    0.9,
                    Category::Backend,
                ));
            } else if name.ends_with(".ipynb") {
                frameworks.push(FrameworkRecord::unversioned(
                    FrameworkId::Jupyter,
                    0.8,
                    Category::Utility,
                ));
            }
        }

        if frameworks.is_empty() && found_configs.is_empty() {
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
                task_runner: Some("pip".to_string()),
                package_manager: Some("pip".to_string()),
                ..BuildToolsInfo::default()
            },
            confidence,
            evidence: Evidence {
                config_files: ConfigFileEvidence {
                    found: found_configs,
                    frameworks: attributed,
                },
                file_patterns: FilePatternEvidence {
                    extensions: vec![".py".to_string()],
                    ..FilePatternEvidence::default()
                },
                ..Evidence::default()
            },
        }
    }
}

fn extract_pinned_version(content: &str, dependency: &str) -> String {
    let needle = dependency.to_lowercase();
    for line in content.lines() {
        if line.to_lowercase().contains(&needle) {
            if let Some(captures) = PINNED_VERSION.captures(line) {
                return captures[1].to_string();
            }
        }
    }
    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PythonDetector {
        PythonDetector::new(Arc::new(RuleSet::builtin().unwrap()))
    }

    #[test]
    fn detects_django_with_pinned_version() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("requirements.txt"),
            "Django==4.2.0\npsycopg2==2.9.5\n",
        )
        .unwrap();

        let partial = detector().detect(dir.path());
        let django = partial
            .frameworks
            .iter()
            .find(|f| f.name == FrameworkId::Django)
            .expect("django record");
        assert_eq!(django.version, "4.2.0");
        assert!(django.confidence > 0.9);
        assert_eq!(partial.architecture, Architecture::Api);
        assert_eq!(partial.build_tools.package_manager.as_deref(), Some("pip"));
    }

    #[test]
    fn manage_py_marks_django() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("manage.py"), "").unwrap();

        let partial = detector().detect(dir.path());
        assert!(partial.frameworks.iter().any(|f| f.name == FrameworkId::Django));
    }

    #[test]
    fn notebooks_mark_jupyter() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("analysis.ipynb"), "{}").unwrap();

        let partial = detector().detect(dir.path());
        let jupyter = partial
            .frameworks
            .iter()
            .find(|f| f.name == FrameworkId::Jupyter)
            .expect("jupyter record");
        assert!((jupyter.confidence - 0.8).abs() < 1e-6);
        assert_eq!(partial.architecture, Architecture::Unknown);
    }

    #[test]
    fn pyproject_matches_without_pinned_versions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("pyproject.toml"),
            "[project]\ndependencies = [\"fastapi\", \"uvicorn\"]\n",
        )
        .unwrap();

        let partial = detector().detect(dir.path());
        let fastapi = partial
            .frameworks
            .iter()
            .find(|f| f.name == FrameworkId::FastApi)
            .expect("fastapi record");
        assert_eq!(fastapi.version, "unknown");
    }

    #[test]
    fn no_python_evidence_yields_empty_partial() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.go"), "package main\n").unwrap();

        let partial = detector().detect(dir.path());
        assert!(partial.frameworks.is_empty());
        assert_eq!(partial.confidence, 0.0);
        assert!(partial.build_tools.package_manager.is_none());
    }
}
