//! # Analyzer Module
//!
//! This module provides project analysis capabilities for detecting:
//! - Frameworks and libraries across multiple ecosystems
//! - Build tools (bundler, transpiler, task runner, package manager)
//! - Coarse project type and architecture classification
//!
//! Detection is driven by a set of independent heuristic detectors, each
//! examining one evidence source (dependency manifests, marker config files,
//! source-file naming patterns, per-ecosystem manifests). Their partial
//! findings are merged into a single ranked, deduplicated [`DetectionResult`].

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{DetectionError, Result};

pub mod consolidator;
pub mod detectors;
pub mod display;
pub mod rules;

pub use rules::RuleSet;

use detectors::{
    Detector, PartialResult, config_files::ConfigFileDetector, dotnet::DotNetDetector,
    file_patterns::FilePatternDetector, go::GoDetector, java::JavaDetector,
    manifest::ManifestDetector, python::PythonDetector, rust::RustDetector,
};

/// Identifier of a framework, library, or tool known to the rule tables.
///
/// This is a closed enumeration: rule data naming a framework outside this
/// set is rejected when the rule tables are loaded, since that indicates a
/// skew between rule data and code rather than a normal "no evidence" case.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum FrameworkId {
    // Frontend
    React,
    Vue,
    Angular,
    Svelte,
    Solid,
    Preact,
    Yew,
    Leptos,

    // Meta frameworks
    #[serde(rename = "nextjs")]
    NextJs,
    Nuxt,
    #[serde(rename = "sveltekit")]
    SvelteKit,
    Gatsby,
    Remix,

    // Backend JavaScript
    Express,
    Fastify,
    #[serde(rename = "nestjs")]
    NestJs,
    Koa,
    Hapi,

    // Backend Python
    Django,
    Flask,
    #[serde(rename = "fastapi")]
    FastApi,
    Tornado,
    Streamlit,

    // Data science
    Jupyter,
    Numpy,
    Pandas,

    // Backend Rust
    ActixWeb,
    Rocket,
    Axum,
    Warp,
    Tide,
    Bevy,
    Tauri,

    // .NET
    #[serde(rename = "aspnet-core")]
    AspNetCore,
    BlazorServer,
    BlazorWasm,
    Maui,
    Avalonia,

    // Go
    Gin,
    Echo,
    Fiber,
    Beego,
    Cobra,

    // Java
    SpringBoot,
    SpringMvc,
    Quarkus,
    Micronaut,
    Android,

    // Mobile
    ReactNative,
    Expo,
    Ionic,

    // Desktop
    Electron,

    // Build tools
    Vite,
    Webpack,
    Rollup,
    Parcel,
    Gradle,

    // Testing
    Jest,
    Vitest,
    Cypress,
    Playwright,
}

impl FrameworkId {
    /// The kebab-case name used in rule tables and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkId::React => "react",
            FrameworkId::Vue => "vue",
            FrameworkId::Angular => "angular",
            FrameworkId::Svelte => "svelte",
            FrameworkId::Solid => "solid",
            FrameworkId::Preact => "preact",
            FrameworkId::Yew => "yew",
            FrameworkId::Leptos => "leptos",
            FrameworkId::NextJs => "nextjs",
            FrameworkId::Nuxt => "nuxt",
            FrameworkId::SvelteKit => "sveltekit",
            FrameworkId::Gatsby => "gatsby",
            FrameworkId::Remix => "remix",
            FrameworkId::Express => "express",
            FrameworkId::Fastify => "fastify",
            FrameworkId::NestJs => "nestjs",
            FrameworkId::Koa => "koa",
            FrameworkId::Hapi => "hapi",
            FrameworkId::Django => "django",
            FrameworkId::Flask => "flask",
            FrameworkId::FastApi => "fastapi",
            FrameworkId::Tornado => "tornado",
            FrameworkId::Streamlit => "streamlit",
            FrameworkId::Jupyter => "jupyter",
            FrameworkId::Numpy => "numpy",
            FrameworkId::Pandas => "pandas",
            FrameworkId::ActixWeb => "actix-web",
            FrameworkId::Rocket => "rocket",
            FrameworkId::Axum => "axum",
            FrameworkId::Warp => "warp",
            FrameworkId::Tide => "tide",
            FrameworkId::Bevy => "bevy",
            FrameworkId::Tauri => "tauri",
            FrameworkId::AspNetCore => "aspnet-core",
            FrameworkId::BlazorServer => "blazor-server",
            FrameworkId::BlazorWasm => "blazor-wasm",
            FrameworkId::Maui => "maui",
            FrameworkId::Avalonia => "avalonia",
            FrameworkId::Gin => "gin",
            FrameworkId::Echo => "echo",
            FrameworkId::Fiber => "fiber",
            FrameworkId::Beego => "beego",
            FrameworkId::Cobra => "cobra",
            FrameworkId::SpringBoot => "spring-boot",
            FrameworkId::SpringMvc => "spring-mvc",
            FrameworkId::Quarkus => "quarkus",
            FrameworkId::Micronaut => "micronaut",
            FrameworkId::Android => "android",
            FrameworkId::ReactNative => "react-native",
            FrameworkId::Expo => "expo",
            FrameworkId::Ionic => "ionic",
            FrameworkId::Electron => "electron",
            FrameworkId::Vite => "vite",
            FrameworkId::Webpack => "webpack",
            FrameworkId::Rollup => "rollup",
            FrameworkId::Parcel => "parcel",
            FrameworkId::Gradle => "gradle",
            FrameworkId::Jest => "jest",
            FrameworkId::Vitest => "vitest",
            FrameworkId::Cypress => "cypress",
            FrameworkId::Playwright => "playwright",
        }
    }

    /// Canonical category for this framework, used where a rule entry does
    /// not carry its own category (config-file and file-pattern rules).
    pub fn category(&self) -> Category {
        use FrameworkId::*;
        match self {
            React | Vue | Angular | Svelte | Solid | Preact | Yew | Leptos | BlazorWasm => {
                Category::Frontend
            }
            NextJs | Nuxt | SvelteKit | Gatsby | Remix => Category::MetaFramework,
            Express | Fastify | NestJs | Koa | Hapi | Django | Flask | FastApi | Tornado
            | ActixWeb | Rocket | Axum | Warp | Tide | AspNetCore | Gin | Echo | Fiber
            | Beego | SpringBoot | SpringMvc | Quarkus | Micronaut => Category::Backend,
            BlazorServer | Streamlit => Category::WebFramework,
            ReactNative | Expo | Ionic | Android | Maui => Category::Mobile,
            Tauri | Electron | Avalonia => Category::Desktop,
            Vite | Webpack | Rollup | Parcel | Gradle => Category::BuildTool,
            Jest | Vitest | Cypress | Playwright => Category::Testing,
            Jupyter | Numpy | Pandas | Bevy | Cobra => Category::Utility,
        }
    }
}

impl std::fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories of detected frameworks
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Frontend,
    Backend,
    WebFramework,
    Mobile,
    Desktop,
    MetaFramework,
    BuildTool,
    Testing,
    Utility,
}

/// Coarse project classification derived from the merged framework set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Frontend,
    Backend,
    Fullstack,
    Mobile,
    Desktop,
    Library,
    DataScience,
    Cli,
    GameEngine,
    Unknown,
}

/// Coarse architecture classification
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Architecture {
    Spa,
    Ssr,
    Ssg,
    Api,
    #[default]
    Unknown,
}

/// A single detected framework with its supporting confidence.
///
/// Identity is the `name`; at most one record per name survives
/// consolidation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameworkRecord {
    pub name: FrameworkId,
    /// Version string as found in the manifest, or `"unknown"`
    pub version: String,
    /// How strongly the evidence supports this framework, in `[0, 1]`
    pub confidence: f32,
    pub category: Category,
}

impl FrameworkRecord {
    /// Record with no version information
    pub fn unversioned(name: FrameworkId, confidence: f32, category: Category) -> Self {
        Self {
            name,
            version: "unknown".to_string(),
            confidence,
            category,
        }
    }
}

/// Build tooling detected for the project.
///
/// Sourced wholesale from the single most confident detector, never merged
/// field-by-field across detectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BuildToolsInfo {
    pub bundler: Option<String>,
    pub transpiler: Option<String>,
    pub task_runner: Option<String>,
    pub package_manager: Option<String>,
}

/// Raw dependency/script names observed in a Node-style manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ManifestEvidence {
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub scripts: Vec<String>,
}

/// Marker config files found at the project root
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigFileEvidence {
    pub found: Vec<String>,
    pub frameworks: Vec<FrameworkId>,
}

/// File extensions and naming patterns observed during the source scan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilePatternEvidence {
    pub extensions: Vec<String>,
    pub patterns: Vec<String>,
    pub frameworks: Vec<FrameworkId>,
}

/// All raw signals the detectors observed, retained for diagnostics.
///
/// Every list is treated as a set: order-insignificant and deduplicated
/// after consolidation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Evidence {
    pub manifest: ManifestEvidence,
    pub config_files: ConfigFileEvidence,
    pub file_patterns: FilePatternEvidence,
}

/// The consolidated outcome of a detection run.
///
/// Immutable once returned; a fresh value is produced on every
/// [`FrameworkDetectionEngine::detect_frameworks`] call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionResult {
    /// Deduplicated by name, sorted by confidence descending
    pub frameworks: Vec<FrameworkRecord>,
    pub project_type: ProjectType,
    pub architecture: Architecture,
    pub build_tools: BuildToolsInfo,
    /// Confidence-weighted aggregate over all merged records, in `[0, 1]`
    pub confidence: f32,
    pub evidence: Evidence,
}

impl DetectionResult {
    /// The first record with confidence above 0.7, falling back to the
    /// highest-ranked record when none clears the bar.
    pub fn primary_framework(&self) -> Option<&FrameworkRecord> {
        self.frameworks
            .iter()
            .find(|f| f.confidence > 0.7)
            .or_else(|| self.frameworks.first())
    }

    /// Whether a specific framework was detected at any confidence
    pub fn has_framework(&self, id: FrameworkId) -> bool {
        self.frameworks.iter().any(|f| f.name == id)
    }

    /// All detected frameworks in the given category, ranked
    pub fn frameworks_by_category(&self, category: Category) -> Vec<&FrameworkRecord> {
        self.frameworks
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }
}

/// Options accepted by a detection run
#[derive(Debug, Clone, Default)]
pub struct DetectionOptions {
    /// Drop records below this confidence from the final list. The overall
    /// result confidence is computed before this filter is applied.
    pub min_confidence: Option<f32>,
}

/// The multi-strategy framework detection engine.
///
/// Holds the immutable rule tables and a fixed-order slice of detector
/// strategies. Detectors are pure over `(project_path, rules)` and run
/// concurrently; the consolidation step is commutative over the merge rules,
/// so execution order never changes the final result.
pub struct FrameworkDetectionEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl FrameworkDetectionEngine {
    /// Build an engine over the built-in rule tables.
    ///
    /// Fails if the embedded rule data is malformed or names a framework
    /// outside the [`FrameworkId`] enumeration.
    pub fn new() -> Result<Self> {
        Ok(Self::with_rules(RuleSet::builtin()?))
    }

    /// Build an engine over caller-supplied rule tables
    pub fn with_rules(rules: RuleSet) -> Self {
        let rules = Arc::new(rules);
        let detectors: Vec<Box<dyn Detector>> = vec![
            Box::new(ManifestDetector::new(Arc::clone(&rules))),
            Box::new(ConfigFileDetector::new(Arc::clone(&rules))),
            Box::new(FilePatternDetector::new(Arc::clone(&rules))),
            Box::new(PythonDetector::new(Arc::clone(&rules))),
            Box::new(RustDetector::new(Arc::clone(&rules))),
            Box::new(DotNetDetector::new(Arc::clone(&rules))),
            Box::new(GoDetector::new(Arc::clone(&rules))),
            Box::new(JavaDetector::new(rules)),
        ];
        Self { detectors }
    }

    /// Run every detector against `path` and consolidate their findings.
    ///
    /// Errors only when the project path itself cannot be accessed; any
    /// failure inside a single detector degrades that detector's
    /// contribution to empty instead of aborting the run.
    pub fn detect_frameworks(
        &self,
        path: &Path,
        options: &DetectionOptions,
    ) -> Result<DetectionResult> {
        fs::metadata(path).map_err(|source| DetectionError::PathAccess {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("detecting frameworks in {}", path.display());

        let partials: Vec<PartialResult> = self
            .detectors
            .par_iter()
            .map(|detector| {
                let partial = detector.detect(path);
                log::debug!(
                    "{}: {} framework(s), confidence {:.2}",
                    detector.name(),
                    partial.frameworks.len(),
                    partial.confidence
                );
                partial
            })
            .collect();

        let mut result = consolidator::consolidate(&partials);

        if let Some(min) = options.min_confidence {
            result.frameworks.retain(|f| f.confidence >= min);
        }

        log::info!(
            "detected {} framework(s), project type {:?}",
            result.frameworks.len(),
            result.project_type
        );
        Ok(result)
    }
}

/// Detects the frameworks used under a project directory.
///
/// # Arguments
/// * `path` - The root directory of the project to analyze
///
/// # Returns
/// A consolidated [`DetectionResult`], or an error when the path is not
/// accessible at all.
///
/// # Examples
/// ```no_run
/// use stackscope::analyzer::detect_frameworks;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = detect_frameworks(Path::new("./my-project"))?;
/// println!("Project type: {:?}", result.project_type);
/// # Ok(())
/// # }
/// ```
pub fn detect_frameworks(path: &Path) -> Result<DetectionResult> {
    detect_frameworks_with_options(path, &DetectionOptions::default())
}

/// Detects frameworks with custom options
pub fn detect_frameworks_with_options(
    path: &Path,
    options: &DetectionOptions,
) -> Result<DetectionResult> {
    FrameworkDetectionEngine::new()?.detect_frameworks(path, options)
}
