//! Rule tables driving framework detection.
//!
//! The tables map known dependency names, marker filenames, and file naming
//! patterns to a framework id, base confidence, and category. They are plain
//! data: extending detection coverage means adding entries here, not code.
//! A default set ships embedded in the binary; alternate tables can be
//! injected through [`crate::analyzer::FrameworkDetectionEngine::with_rules`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analyzer::{Category, FrameworkId};
use crate::error::RuleSetError;

/// Matching criteria for one framework in a Node-style manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestRule {
    /// Runtime dependency names implying this framework
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Development dependency names implying this framework
    #[serde(default)]
    pub dev_dependencies: Vec<String>,
    /// Base confidence when every listed dependency is present
    pub confidence: f32,
    pub category: Category,
}

/// A marker rule: one filename or glob pattern attributed to a framework
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerRule {
    pub framework: FrameworkId,
    pub confidence: f32,
}

/// Matching criteria for one framework in an ecosystem manifest.
///
/// Entries are matched by substring containment against the raw manifest
/// text, not by parsing the manifest grammar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcosystemRule {
    /// Dependency or package-reference names implying this framework
    pub dependencies: Vec<String>,
    pub confidence: f32,
    pub category: Category,
}

/// Dependency names implying a particular build tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildToolMappings {
    pub bundlers: BTreeMap<String, Vec<String>>,
    pub transpilers: BTreeMap<String, Vec<String>>,
}

/// The complete, immutable rule tables held by a detection engine.
///
/// Loaded once at engine construction and never mutated thereafter. Keys
/// deserialize into [`FrameworkId`], so rule data naming an unknown
/// framework fails loudly at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub manifest_rules: BTreeMap<FrameworkId, ManifestRule>,
    pub config_file_rules: BTreeMap<String, MarkerRule>,
    pub file_pattern_rules: BTreeMap<String, MarkerRule>,
    pub python_rules: BTreeMap<FrameworkId, EcosystemRule>,
    pub rust_rules: BTreeMap<FrameworkId, EcosystemRule>,
    pub dotnet_rules: BTreeMap<FrameworkId, EcosystemRule>,
    pub go_rules: BTreeMap<FrameworkId, EcosystemRule>,
    pub java_rules: BTreeMap<FrameworkId, EcosystemRule>,
    pub build_tool_mappings: BuildToolMappings,
}

const BUILTIN_RULES: &str = include_str!("rules/frameworks.json");

impl RuleSet {
    /// The rule tables shipped with the binary
    pub fn builtin() -> Result<Self, RuleSetError> {
        Self::from_json(BUILTIN_RULES)
    }

    /// Parse and validate rule tables from a JSON document
    pub fn from_json(json: &str) -> Result<Self, RuleSetError> {
        let rules: RuleSet = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    fn validate(&self) -> Result<(), RuleSetError> {
        if self.manifest_rules.is_empty() {
            return Err(RuleSetError::EmptySection("manifest_rules"));
        }
        if self.config_file_rules.is_empty() {
            return Err(RuleSetError::EmptySection("config_file_rules"));
        }
        if self.file_pattern_rules.is_empty() {
            return Err(RuleSetError::EmptySection("file_pattern_rules"));
        }

        let confidences = self
            .manifest_rules
            .values()
            .map(|r| r.confidence)
            .chain(self.config_file_rules.values().map(|r| r.confidence))
            .chain(self.file_pattern_rules.values().map(|r| r.confidence))
            .chain(
                self.ecosystem_sections()
                    .flat_map(|section| section.values().map(|r| r.confidence).collect::<Vec<_>>()),
            );
        for confidence in confidences {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(RuleSetError::ConfidenceOutOfRange(confidence));
            }
        }
        Ok(())
    }

    fn ecosystem_sections(&self) -> impl Iterator<Item = &BTreeMap<FrameworkId, EcosystemRule>> {
        [
            &self.python_rules,
            &self.rust_rules,
            &self.dotnet_rules,
            &self.go_rules,
            &self.java_rules,
        ]
        .into_iter()
    }

    /// All framework ids named anywhere in the tables, deduplicated
    pub fn known_frameworks(&self) -> Vec<FrameworkId> {
        let mut ids: Vec<FrameworkId> = self
            .manifest_rules
            .keys()
            .copied()
            .chain(self.config_file_rules.values().map(|r| r.framework))
            .chain(self.file_pattern_rules.values().map(|r| r.framework))
            .chain(
                self.ecosystem_sections()
                    .flat_map(|s| s.keys().copied().collect::<Vec<_>>()),
            )
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
