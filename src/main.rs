mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use dotenv::dotenv;
use remove_latest::platform::{LocalFilesystem, TerminalKeys};
use remove_latest::{config, CleanupEngine, ConsoleReporter};
use tracing::{debug, error};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    // The stderr tracing layer is the user-visible channel for fatal errors.
    if let Err(err) = run(&args) {
        error!("{:#}", err);
    }
}

fn run(args: &Cli) -> Result<()> {
    let config = config::load_configuration(&args.config)
        .with_context(|| format!("Error loading configuration from {}", args.config.display()))?;
    debug!("config: {:?}", config);

    if args.print_config {
        println!("Configuration: {:?}", config);
        return Ok(());
    }

    let engine = CleanupEngine::from_config(LocalFilesystem, &config);
    let mut keys = TerminalKeys::new();
    let mut reporter = ConsoleReporter::stdout();

    let outcome = engine.run(&mut keys, &mut reporter)?;
    debug!("outcome: {:?}", outcome);

    Ok(())
}
