//! .NET ecosystem detection (`*.csproj`).

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::analyzer::detectors::{Detector, PartialResult, max_confidence, sort_by_confidence};
use crate::analyzer::rules::RuleSet;
use crate::analyzer::{
    Architecture, BuildToolsInfo, Category, ConfigFileEvidence, Evidence, FilePatternEvidence,
    FrameworkId, FrameworkRecord,
};

/// Detects .NET frameworks from `PackageReference` names in project files.
///
/// Project files are matched by substring containment against the raw XML
/// text, not by parsing the XML grammar.
pub struct DotNetDetector {
    rules: Arc<RuleSet>,
}

impl DotNetDetector {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    fn analyze_csproj(&self, content: &str) -> Vec<FrameworkRecord> {
        let mut frameworks = Vec::new();
        for (id, rule) in &self.rules.dotnet_rules {
            if rule.dependencies.iter().any(|package| content.contains(package.as_str())) {
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

impl Detector for DotNetDetector {
    fn name(&self) -> &'static str {
        "dotnet"
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
            if name.ends_with(".csproj") {
                if let Ok(content) = fs::read_to_string(entry.path()) {
                    found_configs.push(name.to_string());
                    frameworks.extend(self.analyze_csproj(&content));
                }
            }
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
                task_runner: Some("dotnet".to_string()),
                package_manager: Some("nuget".to_string()),
                ..BuildToolsInfo::default()
            },
            confidence,
            evidence: Evidence {
                config_files: ConfigFileEvidence {
                    found: found_configs,
                    frameworks: attributed,
                },
                file_patterns: FilePatternEvidence {
                    extensions: vec![".cs".to_string(), ".razor".to_string()],
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

    fn detector() -> DotNetDetector {
        DotNetDetector::new(Arc::new(RuleSet::builtin().unwrap()))
    }

    #[test]
    fn detects_aspnet_core_backend() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("WebApp.csproj"),
            r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <ItemGroup>
    <PackageReference Include="Microsoft.AspNetCore.OpenApi" Version="8.0.0" />
  </ItemGroup>
</Project>"#,
        )
        .unwrap();

        let partial = detector().detect(dir.path());
        let aspnet = partial
            .frameworks
            .iter()
            .find(|f| f.name == FrameworkId::AspNetCore)
            .expect("aspnet-core record");
        assert_eq!(aspnet.category, Category::Backend);
        assert_eq!(partial.architecture, Architecture::Api);
        assert_eq!(partial.build_tools.package_manager.as_deref(), Some("nuget"));
    }

    #[test]
    fn detects_maui_mobile_project() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("MauiApp.csproj"),
            r#"<Project><ItemGroup><PackageReference Include="Microsoft.Maui.Controls" /></ItemGroup></Project>"#,
        )
        .unwrap();

        let partial = detector().detect(dir.path());
        let maui = partial
            .frameworks
            .iter()
            .find(|f| f.name == FrameworkId::Maui)
            .expect("maui record");
        assert_eq!(maui.category, Category::Mobile);
        assert_eq!(partial.architecture, Architecture::Unknown);
    }

    #[test]
    fn no_project_file_yields_empty_partial() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Program.cs"), "// nothing").unwrap();

        let partial = detector().detect(dir.path());
        assert!(partial.frameworks.is_empty());
        assert!(partial.build_tools.task_runner.is_none());
    }
}
