use clap::Parser;
use remove_latest::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "remove-latest")]
#[command(
    about = "Find the newest versioned build in each channel directory and delete it on confirmation",
    long_about = None
)]
pub struct Cli {
    /// Config file holding the `source=<dir>` line
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Print configuration values and exit
    #[arg(long)]
    pub print_config: bool,
}
