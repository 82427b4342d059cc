//! # Stackscope
//!
//! A Rust-based command-line application that inspects a source tree and
//! infers which software frameworks, languages, and build tools it uses,
//! then classifies the project's type and architecture.
//!
//! ## Features
//!
//! - **Multi-strategy detection**: Independent heuristic detectors over
//!   dependency manifests, marker config files, and file naming patterns
//! - **Multi-ecosystem**: Node, Python, Rust, .NET, Go, and Java manifests
//! - **Consolidation**: Partial findings are merged into one ranked,
//!   deduplicated result with derived project-type and architecture labels
//! - **Rule-table driven**: Detection coverage extends by adding data,
//!   not code
//!
//! ## Example
//!
//! ```rust,no_run
//! use stackscope::analyzer::detect_frameworks;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = detect_frameworks(Path::new("./my-project"))?;
//! for framework in &result.frameworks {
//!     println!("{} ({:.0}%)", framework.name, framework.confidence * 100.0);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::{
    DetectionOptions, DetectionResult, FrameworkDetectionEngine, detect_frameworks,
    detect_frameworks_with_options,
};
pub use error::{Result, StackScopeError};

use cli::Commands;
use config::types::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Analyze {
            path,
            json,
            detailed,
            min_confidence,
        } => handlers::handle_analyze(path, json, detailed, min_confidence, config).map(|_| ()),
        Commands::Support { detailed } => handlers::handle_support(detailed).map(|_| ()),
    }
}
