//! Error types for stackscope
//!
//! Provides structured error types for all engine and CLI operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type returned by public stackscope operations
#[derive(Debug, Error)]
pub enum StackScopeError {
    /// Framework detection failed
    #[error("detection error: {0}")]
    Detection(#[from] DetectionError),

    /// The rule tables could not be loaded or validated
    #[error("rule table error: {0}")]
    Rules(#[from] RuleSetError),

    /// Configuration file problem
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic I/O failure outside the detection engine
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by the detection engine itself.
///
/// The engine only fails when the project path cannot be accessed at all;
/// every detector-local I/O or parse failure is recovered as an empty
/// contribution instead.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The project path does not exist or is not readable
    #[error("project path '{}' is not accessible: {source}", path.display())]
    PathAccess {
        /// The path that was handed to the engine
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while loading rule tables at engine construction.
///
/// An unrecognized framework key in rule data indicates a data/code skew bug
/// and fails loudly here rather than silently dropping rules.
#[derive(Debug, Error)]
pub enum RuleSetError {
    /// The rule table document is not valid JSON or names an unknown framework
    #[error("failed to parse rule tables: {0}")]
    Parse(#[from] serde_json::Error),

    /// A rule table section was present but empty
    #[error("rule table section '{0}' is empty")]
    EmptySection(&'static str),

    /// A rule declared a confidence outside `[0, 1]`
    #[error("rule confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f32),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be parsed
    #[error("failed to parse configuration: {0}")]
    ParsingFailed(String),
}

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, StackScopeError>;
