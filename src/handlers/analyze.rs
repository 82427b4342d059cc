use std::path::PathBuf;

use crate::analyzer::display::{DisplayMode, render_result};
use crate::analyzer::{DetectionOptions, FrameworkDetectionEngine};
use crate::config::types::Config;

pub fn handle_analyze(
    path: PathBuf,
    json: bool,
    detailed: bool,
    min_confidence: Option<f32>,
    config: &Config,
) -> crate::Result<String> {
    let options = DetectionOptions {
        min_confidence: min_confidence.or(config.analysis.min_confidence),
    };

    let engine = FrameworkDetectionEngine::new()?;
    let result = engine.detect_frameworks(&path, &options)?;

    let mode = if json || config.output.json {
        DisplayMode::Json
    } else if detailed {
        DisplayMode::Detailed
    } else {
        DisplayMode::Summary
    };

    let output = render_result(&result, mode);
    println!("{output}");
    Ok(output)
}
