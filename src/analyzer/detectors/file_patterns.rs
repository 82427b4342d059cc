//! Source-file naming pattern detection.
//!
//! A depth-limited recursive scan: naming conventions two levels below the
//! root are still meaningful, anything deeper is noise for classification.

use std::path::Path;
use std::sync::Arc;

use walkdir::WalkDir;

use crate::analyzer::detectors::{
    Detector, PartialResult, matches_pattern, max_confidence, sort_by_confidence,
};
use crate::analyzer::rules::RuleSet;
use crate::analyzer::{Evidence, FilePatternEvidence, FrameworkRecord};

/// How many directory levels below the project root the scan descends
const MAX_SCAN_DEPTH: usize = 3;

/// Name of the dependency cache directory excluded from the scan
const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Detects frameworks from file extensions and naming patterns, e.g.
/// `*.vue` or `*.component.ts`.
pub struct FilePatternDetector {
    rules: Arc<RuleSet>,
}

impl FilePatternDetector {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }
}

impl Detector for FilePatternDetector {
    fn name(&self) -> &'static str {
        "file-patterns"
    }

    fn weight(&self) -> f32 {
        0.6
    }

    fn detect(&self, project_path: &Path) -> PartialResult {
        let mut frameworks: Vec<FrameworkRecord> = Vec::new();
        let mut extensions: Vec<String> = Vec::new();
        let mut patterns: Vec<String> = Vec::new();
        let mut attributed = Vec::new();

        let walker = WalkDir::new(project_path)
            .max_depth(MAX_SCAN_DEPTH)
            .into_iter()
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                entry.depth() == 0 || (!name.starts_with('.') && name != DEPENDENCY_CACHE_DIR)
            });

        for entry in walker {
            // permission errors on a sub-directory are expected, skip them
            let Ok(entry) = entry else { continue };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };

            if let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) {
                let dotted = format!(".{ext}");
                if !extensions.contains(&dotted) {
                    extensions.push(dotted);
                }
            }

            for (pattern, rule) in &self.rules.file_pattern_rules {
                if !matches_pattern(file_name, pattern) {
                    continue;
                }
                if !patterns.contains(pattern) {
                    patterns.push(pattern.clone());
                }
                attributed.push(rule.framework);

                match frameworks.iter_mut().find(|f| f.name == rule.framework) {
                    Some(existing) => {
                        existing.confidence = existing.confidence.max(rule.confidence);
                    }
                    None => frameworks.push(FrameworkRecord::unversioned(
                        rule.framework,
                        rule.confidence,
                        rule.framework.category(),
                    )),
                }
            }
        }

        sort_by_confidence(&mut frameworks);
        let confidence = max_confidence(&frameworks);

        PartialResult {
            confidence,
            frameworks,
            evidence: Evidence {
                file_patterns: FilePatternEvidence {
                    extensions,
                    patterns,
                    frameworks: attributed,
                },
                ..Evidence::default()
            },
            ..PartialResult::default()
        }
    }
}
