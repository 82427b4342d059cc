//! Consolidation of detector partial results.
//!
//! Merging is commutative and associative over its rules (max-confidence
//! upsert, set-union evidence), so the order detectors ran in never changes
//! the outcome. The one exception is the tie-break when two partials report
//! the same internal confidence: the earlier detector in declaration order
//! supplies build tools and architecture.

use std::collections::BTreeMap;

use crate::analyzer::detectors::{PartialResult, sort_by_confidence};
use crate::analyzer::{
    Architecture, BuildToolsInfo, Category, DetectionResult, Evidence, FrameworkId,
    FrameworkRecord, ProjectType,
};

/// Merge all partial results into one ranked, deduplicated result.
pub fn consolidate(partials: &[PartialResult]) -> DetectionResult {
    let mut merged: BTreeMap<FrameworkId, FrameworkRecord> = BTreeMap::new();

    for partial in partials {
        for record in &partial.frameworks {
            match merged.get_mut(&record.name) {
                Some(existing) => {
                    existing.confidence = existing.confidence.max(record.confidence);
                    if existing.version == "unknown" && record.version != "unknown" {
                        existing.version = record.version.clone();
                    }
                }
                None => {
                    merged.insert(record.name, record.clone());
                }
            }
        }
    }

    let mut frameworks: Vec<FrameworkRecord> = merged.into_values().collect();
    sort_by_confidence(&mut frameworks);

    let (architecture, build_tools) = best_partial(partials)
        .map(|p| (p.architecture, p.build_tools.clone()))
        .unwrap_or((Architecture::Unknown, BuildToolsInfo::default()));

    DetectionResult {
        project_type: derive_project_type(&frameworks),
        architecture,
        build_tools,
        confidence: overall_confidence(&frameworks),
        evidence: merge_evidence(partials),
        frameworks,
    }
}

/// The partial with the highest internal confidence; earlier partials win
/// ties.
fn best_partial(partials: &[PartialResult]) -> Option<&PartialResult> {
    partials.iter().fold(None, |best, partial| match best {
        Some(current) if partial.confidence > current.confidence => Some(partial),
        None => Some(partial),
        _ => best,
    })
}

/// Confidence-weighted average, weighting each record by its own
/// confidence: `Σ(c²) / Σ(c)`. Favors high-confidence records over a plain
/// arithmetic mean.
fn overall_confidence(frameworks: &[FrameworkRecord]) -> f32 {
    if frameworks.is_empty() {
        return 0.0;
    }
    let total: f32 = frameworks.iter().map(|f| f.confidence).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let weighted: f32 = frameworks.iter().map(|f| f.confidence * f.confidence).sum();
    weighted / total
}

/// Fixed-priority project classification over the merged framework set.
/// First match wins.
fn derive_project_type(frameworks: &[FrameworkRecord]) -> ProjectType {
    if frameworks.is_empty() {
        return ProjectType::Unknown;
    }

    let has = |id: FrameworkId| frameworks.iter().any(|f| f.name == id);

    if has(FrameworkId::Jupyter) {
        return ProjectType::DataScience;
    }
    if has(FrameworkId::Android) {
        return ProjectType::Mobile;
    }
    if has(FrameworkId::Tauri) {
        return ProjectType::Desktop;
    }
    if has(FrameworkId::Bevy) {
        return ProjectType::GameEngine;
    }
    if has(FrameworkId::Cobra) {
        return ProjectType::Cli;
    }

    let is_meta = |f: &FrameworkRecord| {
        matches!(
            f.name,
            FrameworkId::NextJs | FrameworkId::Nuxt | FrameworkId::Remix | FrameworkId::Gatsby
        )
    };
    if frameworks.iter().any(is_meta) {
        return ProjectType::Fullstack;
    }

    let has_category = |c: Category| frameworks.iter().any(|f| f.category == c);

    let has_backend = has_category(Category::Backend) || has_category(Category::WebFramework);
    if has_category(Category::Mobile) {
        return ProjectType::Mobile;
    }
    if has_category(Category::Desktop) {
        return ProjectType::Desktop;
    }
    if has_category(Category::Frontend) && has_backend {
        return ProjectType::Fullstack;
    }
    if has_category(Category::Frontend) {
        return ProjectType::Frontend;
    }
    if has_backend {
        return ProjectType::Backend;
    }

    ProjectType::Library
}

/// Union every evidence list across partials, then deduplicate each list.
fn merge_evidence(partials: &[PartialResult]) -> Evidence {
    let mut evidence = Evidence::default();

    for partial in partials {
        let e = &partial.evidence;
        evidence
            .manifest
            .dependencies
            .extend(e.manifest.dependencies.iter().cloned());
        evidence
            .manifest
            .dev_dependencies
            .extend(e.manifest.dev_dependencies.iter().cloned());
        evidence
            .manifest
            .scripts
            .extend(e.manifest.scripts.iter().cloned());
        evidence
            .config_files
            .found
            .extend(e.config_files.found.iter().cloned());
        evidence
            .config_files
            .frameworks
            .extend(e.config_files.frameworks.iter().copied());
        evidence
            .file_patterns
            .extensions
            .extend(e.file_patterns.extensions.iter().cloned());
        evidence
            .file_patterns
            .patterns
            .extend(e.file_patterns.patterns.iter().cloned());
        evidence
            .file_patterns
            .frameworks
            .extend(e.file_patterns.frameworks.iter().copied());
    }

    dedupe(&mut evidence.manifest.dependencies);
    dedupe(&mut evidence.manifest.dev_dependencies);
    dedupe(&mut evidence.manifest.scripts);
    dedupe(&mut evidence.config_files.found);
    dedupe(&mut evidence.config_files.frameworks);
    dedupe(&mut evidence.file_patterns.extensions);
    dedupe(&mut evidence.file_patterns.patterns);
    dedupe(&mut evidence.file_patterns.frameworks);

    evidence
}

fn dedupe<T: Ord>(items: &mut Vec<T>) {
    items.sort();
    items.dedup();
}
