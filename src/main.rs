//! Random test filter command-line host
//!
//! Reads discovered test identifiers, resolves the filter once and prints the
//! identifiers selected to run.

use clap::Parser;
use random_test_filter::cli::{self, Cli, Command};
use random_test_filter::{config::Config, telemetry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Command::Config { output }) = &cli.command {
        let template = cli::generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(path, template)?;
                eprintln!("Configuration template written to {}", path);
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Initialize telemetry
    telemetry::init(&config.observability.log_level);

    cli.apply_to(&mut config);
    config.validate()?;

    let universe = cli::load_universe(cli.input.as_deref())?;
    tracing::debug!(discovered = universe.len(), "Read discovered test identifiers");

    let filter = config.build_filter().resolve(universe.iter().cloned())?;

    // Printed regardless of log level; the seed is the only way to replay a run.
    eprintln!(
        "Random test filter seed: {} (re-run with --seed {} to reproduce this selection)",
        filter.seed(),
        filter.seed()
    );

    print!("{}", cli::render(&filter, &universe, cli.format)?);

    Ok(())
}
