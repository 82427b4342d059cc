//! Marker config file detection.
//!
//! A shallow, top-level-only listing: nested config files carry far less
//! signal than root-level markers and are left to the pattern scan.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::analyzer::detectors::{Detector, PartialResult, max_confidence, sort_by_confidence};
use crate::analyzer::rules::RuleSet;
use crate::analyzer::{ConfigFileEvidence, Evidence, FrameworkRecord};

/// Detects frameworks from marker filenames at the project root, such as
/// `angular.json` or `vue.config.js`.
pub struct ConfigFileDetector {
    rules: Arc<RuleSet>,
}

impl ConfigFileDetector {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }
}

impl Detector for ConfigFileDetector {
    fn name(&self) -> &'static str {
        "config-files"
    }

    fn weight(&self) -> f32 {
        0.8
    }

    fn detect(&self, project_path: &Path) -> PartialResult {
        let entries = match fs::read_dir(project_path) {
            Ok(entries) => entries,
            Err(_) => return PartialResult::empty(),
        };

        let mut frameworks: Vec<FrameworkRecord> = Vec::new();
        let mut found = Vec::new();
        let mut attributed = Vec::new();

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some(rule) = self.rules.config_file_rules.get(name) {
                found.push(name.to_string());
                attributed.push(rule.framework);
                frameworks.push(FrameworkRecord::unversioned(
                    rule.framework,
                    rule.confidence,
                    rule.framework.category(),
                ));
            }
        }

        sort_by_confidence(&mut frameworks);
        let confidence = max_confidence(&frameworks);

        PartialResult {
            confidence,
            frameworks,
            evidence: Evidence {
                config_files: ConfigFileEvidence {
                    found,
                    frameworks: attributed,
                },
                ..Evidence::default()
            },
            ..PartialResult::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Category, FrameworkId};

    fn detector() -> ConfigFileDetector {
        ConfigFileDetector::new(Arc::new(RuleSet::builtin().unwrap()))
    }

    #[test]
    fn detects_marker_files_at_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("angular.json"), "{}").unwrap();
        fs::write(dir.path().join("vite.config.ts"), "").unwrap();

        let partial = detector().detect(dir.path());
        assert!(partial.frameworks.iter().any(|f| f.name == FrameworkId::Angular));
        assert!(partial.frameworks.iter().any(|f| f.name == FrameworkId::Vite));
        assert!(partial.evidence.config_files.found.contains(&"angular.json".to_string()));
    }

    #[test]
    fn listing_is_shallow() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("packages").join("web");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("angular.json"), "{}").unwrap();

        let partial = detector().detect(dir.path());
        assert!(partial.frameworks.is_empty());
    }

    #[test]
    fn marker_category_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tauri.conf.json"), "{}").unwrap();

        let partial = detector().detect(dir.path());
        let tauri = partial
            .frameworks
            .iter()
            .find(|f| f.name == FrameworkId::Tauri)
            .expect("tauri record");
        assert_eq!(tauri.category, Category::Desktop);
        assert_eq!(tauri.version, "unknown");
    }

    #[test]
    fn missing_directory_degrades_to_empty() {
        let partial = detector().detect(Path::new("/nonexistent/for/sure"));
        assert!(partial.frameworks.is_empty());
        assert_eq!(partial.confidence, 0.0);
    }
}
