use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stackscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Detect the frameworks, build tools, and project type of a codebase")]
#[command(
    long_about = "A CLI tool that inspects a source tree and infers which software frameworks, languages, and build tools it uses, then classifies the project's type and architecture."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a project and display the detected frameworks
    Analyze {
        /// Path to the project directory to analyze
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,

        /// Output detection results in JSON format
        #[arg(short, long)]
        json: bool,

        /// Show detailed evidence information
        #[arg(short, long)]
        detailed: bool,

        /// Drop frameworks below this confidence from the output
        #[arg(long, value_name = "CONFIDENCE")]
        min_confidence: Option<f32>,
    },

    /// Show the frameworks and ecosystems the rule tables cover
    Support {
        /// Show detailed information per framework
        #[arg(short, long)]
        detailed: bool,
    },
}

impl Cli {
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
