//! Murmur janitor binary.

use clap::Parser;
use murmur_cli::{logging, Cli};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> murmur_cli::Result<()> {
    let cli = Cli::parse();
    let config = murmur_cli::resolve_config(&cli)?;
    logging::init(&config.logging)?;

    let metrics = murmur_cli::run(config)?;
    tracing::debug!(runtime_ms = metrics.total_runtime_ms, "Maintenance run finished");
    Ok(())
}
