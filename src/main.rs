//! tpir - The Price Is Right
//!
//! Exits 0 when the current electricity price in the given area is at or
//! below the given price, 1 when it is above, 2 on invalid arguments and 3
//! when the price could not be determined.

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::debug;

use tpir::check::{build_cache, check};
use tpir::cli::Cli;
use tpir::config::Config;
use tpir::logging;

/// Exit code for invalid arguments
const EXIT_USAGE: u8 = 2;

/// Exit code when the price could not be determined
const EXIT_FAILURE: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);
    debug!("Starting up, parsing flags and arguments");

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let cache = match build_cache(&config) {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match check(&cache, config.max_price, Local::now().fixed_offset()).await {
        Ok(verdict) => ExitCode::from(verdict.exit_code()),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
