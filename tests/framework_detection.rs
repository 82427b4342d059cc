use std::fs;
use std::path::Path;

use stackscope::analyzer::{
    Architecture, Category, DetectionOptions, FrameworkDetectionEngine, FrameworkId, ProjectType,
    detect_frameworks, detect_frameworks_with_options,
};

fn engine() -> FrameworkDetectionEngine {
    FrameworkDetectionEngine::new().expect("builtin rules load")
}

#[test]
fn react_vite_project_classifies_as_frontend() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
            "name": "web-app",
            "dependencies": { "react": "^18.2.0", "react-dom": "^18.2.0" },
            "devDependencies": { "vite": "^5.0.0" }
        }"#,
    )
    .unwrap();

    let result = detect_frameworks(dir.path()).unwrap();

    let react = result
        .frameworks
        .iter()
        .find(|f| f.name == FrameworkId::React)
        .expect("react detected");
    assert_eq!(react.category, Category::Frontend);
    assert_eq!(react.version, "18.2.0");

    let vite = result
        .frameworks
        .iter()
        .find(|f| f.name == FrameworkId::Vite)
        .expect("vite detected");
    assert_eq!(vite.category, Category::BuildTool);

    assert_eq!(result.project_type, ProjectType::Frontend);
    assert_eq!(result.architecture, Architecture::Spa);
    assert_eq!(result.build_tools.bundler.as_deref(), Some("vite"));
    assert!(result.confidence > 0.0 && result.confidence <= 1.0);
}

#[test]
fn tauri_project_classifies_as_desktop() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Cargo.toml"),
        "[package]\nname = \"shell\"\n\n[dependencies]\ntauri = \"2\"\nserde = \"1\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("tauri.conf.json"), "{}").unwrap();

    let result = detect_frameworks(dir.path()).unwrap();

    let tauri = result
        .frameworks
        .iter()
        .find(|f| f.name == FrameworkId::Tauri)
        .expect("tauri detected");
    assert_eq!(tauri.category, Category::Desktop);
    assert_eq!(result.project_type, ProjectType::Desktop);
}

#[test]
fn django_project_classifies_as_backend() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("requirements.txt"),
        "Django==4.2.0\npsycopg2==2.9.5\n",
    )
    .unwrap();
    fs::write(dir.path().join("manage.py"), "#!/usr/bin/env python\n").unwrap();

    let result = detect_frameworks(dir.path()).unwrap();

    let django = result
        .frameworks
        .iter()
        .find(|f| f.name == FrameworkId::Django)
        .expect("django detected");
    assert!(django.confidence > 0.9);
    assert_eq!(django.version, "4.2.0");
    assert_eq!(result.project_type, ProjectType::Backend);
    assert_eq!(result.architecture, Architecture::Api);
    assert_eq!(result.build_tools.package_manager.as_deref(), Some("pip"));
}

#[test]
fn corrupt_manifest_alone_yields_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{ invalid json }").unwrap();
    fs::write(dir.path().join("README.md"), "# nothing to see\n").unwrap();

    let result = detect_frameworks(dir.path()).unwrap();

    assert!(result.frameworks.is_empty());
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.project_type, ProjectType::Unknown);
}

#[test]
fn inaccessible_path_is_the_only_error() {
    let missing = Path::new("/definitely/not/a/real/project/path");
    assert!(detect_frameworks(missing).is_err());
}

#[test]
fn detection_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
            "dependencies": { "next": "^14.0.0", "react": "^18.2.0" },
            "devDependencies": { "typescript": "^5.4.0" }
        }"#,
    )
    .unwrap();
    fs::write(dir.path().join("next.config.js"), "module.exports = {}\n").unwrap();

    let first = detect_frameworks(dir.path()).unwrap();
    let second = detect_frameworks(dir.path()).unwrap();

    let tuples = |r: &stackscope::DetectionResult| {
        let mut t: Vec<(FrameworkId, String, Category)> = r
            .frameworks
            .iter()
            .map(|f| (f.name, f.version.clone(), f.category))
            .collect();
        t.sort();
        t
    };
    assert_eq!(tuples(&first), tuples(&second));
    assert_eq!(first.project_type, second.project_type);
    assert_eq!(first.architecture, second.architecture);
}

#[test]
fn cross_detector_merge_keeps_max_confidence_and_known_version() {
    let dir = tempfile::tempdir().unwrap();
    // Manifest attributes a version to nextjs at 0.95; the marker config
    // file attributes it version "unknown" at 0.9
    fs::write(
        dir.path().join("package.json"),
        r#"{ "dependencies": { "next": "^14.1.0", "react": "^18.2.0" } }"#,
    )
    .unwrap();
    fs::write(dir.path().join("next.config.js"), "module.exports = {}\n").unwrap();

    let result = detect_frameworks(dir.path()).unwrap();
    let next = result
        .frameworks
        .iter()
        .find(|f| f.name == FrameworkId::NextJs)
        .expect("nextjs detected");
    assert!((next.confidence - 0.95).abs() < 1e-6);
    assert_eq!(next.version, "14.1.0");
    assert_eq!(result.project_type, ProjectType::Fullstack);
    assert_eq!(result.architecture, Architecture::Ssr);
}

#[test]
fn min_confidence_filters_output_but_not_overall_confidence() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
            "dependencies": { "react": "^18.2.0" },
            "devDependencies": { "jest": "^29.0.0" }
        }"#,
    )
    .unwrap();

    let unfiltered = detect_frameworks(dir.path()).unwrap();
    assert!(unfiltered.frameworks.iter().any(|f| f.name == FrameworkId::Jest));

    let filtered = detect_frameworks_with_options(
        dir.path(),
        &DetectionOptions {
            min_confidence: Some(0.8),
        },
    )
    .unwrap();

    assert!(filtered.frameworks.iter().any(|f| f.name == FrameworkId::React));
    assert!(!filtered.frameworks.iter().any(|f| f.name == FrameworkId::Jest));
    // overall confidence is computed before the filter
    assert!((filtered.confidence - unfiltered.confidence).abs() < 1e-6);
}

#[test]
fn express_backend_gets_api_architecture() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "dependencies": { "express": "^4.18.0", "cors": "^2.8.5" } }"#,
    )
    .unwrap();

    let result = detect_frameworks(dir.path()).unwrap();
    assert_eq!(result.project_type, ProjectType::Backend);
    assert_eq!(result.architecture, Architecture::Api);
}

#[test]
fn fullstack_combination_of_frontend_and_backend() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "dependencies": { "react": "^18.2.0", "react-dom": "^18.2.0", "express": "^4.18.0" } }"#,
    )
    .unwrap();

    let result = detect_frameworks(dir.path()).unwrap();
    assert_eq!(result.project_type, ProjectType::Fullstack);
}

#[test]
fn jupyter_notebooks_classify_as_data_science() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("requirements.txt"),
        "jupyter==1.0.0\nnumpy==1.24.0\npandas==2.0.0\n",
    )
    .unwrap();

    let result = detect_frameworks(dir.path()).unwrap();
    assert_eq!(result.project_type, ProjectType::DataScience);
    assert!(result.has_framework(FrameworkId::Jupyter));
    assert!(result.has_framework(FrameworkId::Numpy));
}

#[test]
fn go_cli_project_classifies_as_cli() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("go.mod"),
        "module example.com/tool\n\ngo 1.22\n\nrequire github.com/spf13/cobra v1.8.0\n",
    )
    .unwrap();

    let result = detect_frameworks(dir.path()).unwrap();
    assert_eq!(result.project_type, ProjectType::Cli);
    assert_eq!(result.build_tools.task_runner.as_deref(), Some("go"));
}

#[test]
fn spring_boot_maven_project() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("pom.xml"),
        r#"<project>
  <dependencies>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter-web</artifactId>
    </dependency>
  </dependencies>
</project>"#,
    )
    .unwrap();

    let result = detect_frameworks(dir.path()).unwrap();
    assert!(result.has_framework(FrameworkId::SpringBoot));
    assert_eq!(result.project_type, ProjectType::Backend);
    assert_eq!(result.build_tools.task_runner.as_deref(), Some("maven"));
}

#[test]
fn evidence_is_merged_across_detectors_without_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "dependencies": { "vue": "^3.4.0" }, "scripts": { "dev": "vite" } }"#,
    )
    .unwrap();
    fs::write(dir.path().join("vue.config.js"), "").unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("App.vue"), "<template/>").unwrap();

    let result = detect_frameworks(dir.path()).unwrap();

    assert!(result.evidence.manifest.dependencies.contains(&"vue".to_string()));
    assert!(result
        .evidence
        .config_files
        .found
        .contains(&"vue.config.js".to_string()));
    assert!(result
        .evidence
        .file_patterns
        .extensions
        .contains(&".vue".to_string()));

    // each list is a set
    let mut found = result.evidence.config_files.found.clone();
    found.dedup();
    assert_eq!(found, result.evidence.config_files.found);

    let vue = result
        .frameworks
        .iter()
        .find(|f| f.name == FrameworkId::Vue)
        .expect("vue detected");
    assert!((vue.confidence - 0.9).abs() < 1e-6);
    assert_eq!(vue.version, "3.4.0");
}

#[test]
fn primary_framework_helpers() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "dependencies": { "react": "^18.2.0" }, "devDependencies": { "jest": "^29.0.0" } }"#,
    )
    .unwrap();

    let result = engine()
        .detect_frameworks(dir.path(), &DetectionOptions::default())
        .unwrap();

    let primary = result.primary_framework().expect("primary framework");
    assert_eq!(primary.name, FrameworkId::React);
    assert!(result.has_framework(FrameworkId::Jest));
    assert!(!result.has_framework(FrameworkId::Vue));

    let testing = result.frameworks_by_category(Category::Testing);
    assert_eq!(testing.len(), 1);
    assert_eq!(testing[0].name, FrameworkId::Jest);
}

#[test]
fn empty_directory_yields_unknown_project() {
    let dir = tempfile::tempdir().unwrap();
    let result = detect_frameworks(dir.path()).unwrap();
    assert!(result.frameworks.is_empty());
    assert_eq!(result.project_type, ProjectType::Unknown);
    assert_eq!(result.architecture, Architecture::Unknown);
    assert!(result.primary_framework().is_none());
}
