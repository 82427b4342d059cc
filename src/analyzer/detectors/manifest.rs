//! Node-style manifest detection (`package.json`).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::analyzer::detectors::{Detector, PartialResult, max_confidence, sort_by_confidence};
use crate::analyzer::rules::RuleSet;
use crate::analyzer::{
    Architecture, BuildToolsInfo, Evidence, FrameworkId, FrameworkRecord, ManifestEvidence,
};

/// Detects frameworks declared in a `package.json` manifest.
///
/// Each rule is scored by the share of its listed dependencies that are
/// actually present, scaled by the rule's base confidence. Build tools are
/// derived from fixed dependency-to-tool tables.
pub struct ManifestDetector {
    rules: Arc<RuleSet>,
}

impl ManifestDetector {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn analyze_frameworks(&self, dependencies: &BTreeMap<String, String>) -> Vec<FrameworkRecord> {
        let mut frameworks = Vec::new();

        for (id, rule) in &self.rules.manifest_rules {
            let mut matches = 0usize;
            let mut total_checks = 0usize;

            for dep in rule.dependencies.iter().chain(&rule.dev_dependencies) {
                total_checks += 1;
                if dependencies.contains_key(dep) {
                    matches += 1;
                }
            }

            if matches > 0 && total_checks > 0 {
                let confidence = (matches as f32 / total_checks as f32) * rule.confidence;
                frameworks.push(FrameworkRecord {
                    name: *id,
                    version: extract_version(dependencies, rule.dependencies.iter().chain(&rule.dev_dependencies)),
                    confidence,
                    category: rule.category,
                });
            }
        }

        sort_by_confidence(&mut frameworks);
        frameworks
    }

    fn analyze_build_tools(
        &self,
        manifest: &Value,
        dependencies: &BTreeMap<String, String>,
    ) -> BuildToolsInfo {
        BuildToolsInfo {
            bundler: lookup_tool(&self.rules.build_tool_mappings.bundlers, dependencies),
            transpiler: lookup_tool(&self.rules.build_tool_mappings.transpilers, dependencies),
            task_runner: detect_task_runner(manifest),
            package_manager: detect_package_manager(manifest),
        }
    }
}

impl Detector for ManifestDetector {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn weight(&self) -> f32 {
        0.9
    }

    fn detect(&self, project_path: &Path) -> PartialResult {
        let manifest_path = project_path.join("package.json");
        let content = match fs::read_to_string(&manifest_path) {
            Ok(content) => content,
            Err(_) => return PartialResult::empty(),
        };
        let manifest: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("unparsable {}: {}", manifest_path.display(), e);
                return PartialResult::empty();
            }
        };

        // devDependencies shadow dependencies on a name clash, matching how
        // package managers treat the merged view
        let mut dependencies = string_map(manifest.get("dependencies"));
        dependencies.extend(string_map(manifest.get("devDependencies")));

        let frameworks = self.analyze_frameworks(&dependencies);
        let build_tools = self.analyze_build_tools(&manifest, &dependencies);
        let architecture = guess_architecture(&frameworks);
        let confidence = manifest_confidence(&frameworks);

        let evidence = Evidence {
            manifest: ManifestEvidence {
                dependencies: key_names(manifest.get("dependencies")),
                dev_dependencies: key_names(manifest.get("devDependencies")),
                scripts: key_names(manifest.get("scripts")),
            },
            ..Evidence::default()
        };

        PartialResult {
            frameworks,
            architecture,
            build_tools,
            confidence,
            evidence,
        }
    }
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

fn key_names(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_object)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

fn extract_version<'a>(
    dependencies: &BTreeMap<String, String>,
    candidates: impl Iterator<Item = &'a String>,
) -> String {
    for dep in candidates {
        if let Some(version) = dependencies.get(dep) {
            return version.trim_start_matches(['^', '~']).to_string();
        }
    }
    "unknown".to_string()
}

fn lookup_tool(
    mappings: &BTreeMap<String, Vec<String>>,
    dependencies: &BTreeMap<String, String>,
) -> Option<String> {
    for (tool, deps) in mappings {
        if deps.iter().any(|dep| dependencies.contains_key(dep)) {
            return Some(tool.clone());
        }
    }
    None
}

fn detect_task_runner(manifest: &Value) -> Option<String> {
    if manifest.get("workspaces").is_some() {
        return Some("yarn".to_string());
    }
    if manifest
        .get("engines")
        .and_then(|e| e.get("pnpm"))
        .is_some()
    {
        return Some("pnpm".to_string());
    }
    Some("npm".to_string())
}

fn detect_package_manager(manifest: &Value) -> Option<String> {
    manifest
        .get("packageManager")
        .and_then(Value::as_str)
        .map(|pm| pm.split('@').next().unwrap_or(pm).to_string())
}

/// Architecture guess from the strongest framework signal
fn guess_architecture(frameworks: &[FrameworkRecord]) -> Architecture {
    let primary = frameworks.iter().find(|f| f.confidence > 0.8);
    match primary.map(|f| f.name) {
        Some(FrameworkId::NextJs | FrameworkId::Nuxt | FrameworkId::Remix) => Architecture::Ssr,
        Some(FrameworkId::Gatsby) => Architecture::Ssg,
        Some(FrameworkId::React | FrameworkId::Vue | FrameworkId::Angular) => Architecture::Spa,
        Some(FrameworkId::Express | FrameworkId::Fastify | FrameworkId::NestJs) => {
            Architecture::Api
        }
        _ => Architecture::Unknown,
    }
}

/// Highest confidence weighted against the mean, favoring a strong primary
/// signal over a crowd of weak ones
fn manifest_confidence(frameworks: &[FrameworkRecord]) -> f32 {
    if frameworks.is_empty() {
        return 0.0;
    }
    let max = max_confidence(frameworks);
    let mean = frameworks.iter().map(|f| f.confidence).sum::<f32>() / frameworks.len() as f32;
    max * 0.7 + mean * 0.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Category;
    use std::io::Write;

    fn detector() -> ManifestDetector {
        ManifestDetector::new(Arc::new(RuleSet::builtin().unwrap()))
    }

    fn write_manifest(dir: &Path, content: &str) {
        let mut file = fs::File::create(dir.join("package.json")).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn detects_react_with_version() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"{ "dependencies": { "react": "^18.2.0", "react-dom": "^18.2.0" } }"#,
        );

        let partial = detector().detect(dir.path());
        let react = partial
            .frameworks
            .iter()
            .find(|f| f.name == FrameworkId::React)
            .expect("react record");
        assert_eq!(react.version, "18.2.0");
        assert_eq!(react.category, Category::Frontend);
        assert!((react.confidence - 0.9).abs() < 1e-6);
        assert_eq!(partial.architecture, Architecture::Spa);
    }

    #[test]
    fn partial_rule_matches_scale_confidence() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"{ "dependencies": { "@angular/core": "^16.0.0" } }"#,
        );

        let partial = detector().detect(dir.path());
        let angular = partial
            .frameworks
            .iter()
            .find(|f| f.name == FrameworkId::Angular)
            .expect("angular record");
        // one of two rule dependencies present
        assert!((angular.confidence - 0.475).abs() < 1e-6);
    }

    #[test]
    fn derives_build_tools() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"{
                "packageManager": "pnpm@9.1.0",
                "dependencies": { "react": "^18.2.0" },
                "devDependencies": { "vite": "^5.0.0", "typescript": "^5.4.0" }
            }"#,
        );

        let partial = detector().detect(dir.path());
        assert_eq!(partial.build_tools.bundler.as_deref(), Some("vite"));
        assert_eq!(partial.build_tools.transpiler.as_deref(), Some("typescript"));
        assert_eq!(partial.build_tools.task_runner.as_deref(), Some("npm"));
        assert_eq!(partial.build_tools.package_manager.as_deref(), Some("pnpm"));
    }

    #[test]
    fn workspaces_imply_yarn() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), r#"{ "workspaces": ["packages/*"] }"#);

        let partial = detector().detect(dir.path());
        assert_eq!(partial.build_tools.task_runner.as_deref(), Some("yarn"));
        assert!(partial.frameworks.is_empty());
    }

    #[test]
    fn invalid_manifest_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "{ invalid json }");

        let partial = detector().detect(dir.path());
        assert!(partial.frameworks.is_empty());
        assert_eq!(partial.confidence, 0.0);
    }

    #[test]
    fn missing_manifest_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let partial = detector().detect(dir.path());
        assert!(partial.frameworks.is_empty());
        assert_eq!(partial.confidence, 0.0);
    }

    #[test]
    fn records_raw_evidence() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"{
                "dependencies": { "react": "^18.2.0" },
                "devDependencies": { "jest": "^29.0.0" },
                "scripts": { "build": "tsc", "test": "jest" }
            }"#,
        );

        let partial = detector().detect(dir.path());
        assert!(partial.evidence.manifest.dependencies.contains(&"react".to_string()));
        assert!(partial.evidence.manifest.dev_dependencies.contains(&"jest".to_string()));
        assert!(partial.evidence.manifest.scripts.contains(&"build".to_string()));
    }
}
