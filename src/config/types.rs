use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Default confidence floor applied when the CLI flag is absent
    pub min_confidence: Option<f32>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_confidence: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit JSON instead of the human-readable summary
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { json: false }
    }
}
