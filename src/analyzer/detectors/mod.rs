//! Detector strategies.
//!
//! Each detector examines one evidence source (a manifest, marker config
//! files, file naming patterns, or an ecosystem-specific manifest) and
//! produces a [`PartialResult`]. Detectors are independent and stateless
//! across calls apart from the immutable rule tables they hold; the
//! consolidator is the only point where their findings meet.

use std::cmp::Ordering;
use std::path::Path;

use crate::analyzer::{Architecture, BuildToolsInfo, Evidence, FrameworkRecord};

pub mod config_files;
pub mod dotnet;
pub mod file_patterns;
pub mod go;
pub mod java;
pub mod manifest;
pub mod python;
pub mod rust;

/// One detector's contribution to a detection run.
///
/// An empty partial (zero frameworks, zero confidence) is the normal
/// outcome when a detector's evidence source is absent or unreadable.
#[derive(Debug, Clone, Default)]
pub struct PartialResult {
    pub frameworks: Vec<FrameworkRecord>,
    pub architecture: Architecture,
    pub build_tools: BuildToolsInfo,
    /// The detector's own confidence in its findings, used to pick which
    /// partial supplies build tools and architecture
    pub confidence: f32,
    pub evidence: Evidence,
}

impl PartialResult {
    /// The "no evidence found" contribution
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A single heuristic detection strategy.
///
/// `detect` never fails for missing or unparsable evidence; such conditions
/// yield [`PartialResult::empty`]. Implementations catch their own I/O and
/// parse errors.
pub trait Detector: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Static confidence ceiling of this evidence source, informational only
    fn weight(&self) -> f32;

    fn detect(&self, project_path: &Path) -> PartialResult;
}

/// Sort records by confidence descending, name ascending on ties
pub(crate) fn sort_by_confidence(frameworks: &mut [FrameworkRecord]) {
    frameworks.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Highest record confidence, or 0 for an empty set
pub(crate) fn max_confidence(frameworks: &[FrameworkRecord]) -> f32 {
    frameworks.iter().map(|f| f.confidence).fold(0.0, f32::max)
}

/// Check a filename against a glob-like pattern where `*` matches any run
/// of characters. The whole name must match.
pub(crate) fn matches_pattern(file_name: &str, pattern: &str) -> bool {
    if !pattern.contains('*') {
        return file_name == pattern;
    }

    let segments: Vec<&str> = pattern.split('*').collect();
    let mut remainder = file_name;

    if let Some(first) = segments.first() {
        match remainder.strip_prefix(first) {
            Some(rest) => remainder = rest,
            None => return false,
        }
    }
    if let Some(last) = segments.last() {
        if segments.len() > 1 {
            match remainder.strip_suffix(last) {
                Some(rest) => remainder = rest,
                None => return false,
            }
        }
    }
    for middle in &segments[1..segments.len().saturating_sub(1)] {
        if middle.is_empty() {
            continue;
        }
        match remainder.find(middle) {
            Some(idx) => remainder = &remainder[idx + middle.len()..],
            None => return false,
        }
    }
    true
}
