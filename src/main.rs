use clap::Parser;
use miette::{miette, Result};

use reftrace::cli;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = cli::Cli::parse();
    cli::run(cli).map_err(|e| miette!("{}", e))
}
