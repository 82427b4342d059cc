use clap::Parser;
use std::process;

use stackscope::cli::Cli;
use stackscope::config;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> stackscope::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;

    stackscope::run_command(cli.command, &config)
}
