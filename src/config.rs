//! Validated runtime configuration
//!
//! Everything the price check needs is collected here from the parsed
//! command line, so nothing downstream reads globals or the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheManager;
use crate::cli::{parse_area_code_arg, parse_price_arg, Cli, CliError};
use crate::data::AreaCode;

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Price zone to check
    pub area: AreaCode,
    /// Highest acceptable price in SEK per kWh
    pub max_price: f64,
    /// Root URL of the price service
    pub base_url: String,
    /// Directory holding cached price lists
    pub cache_dir: PathBuf,
    /// Timeout for requests to the price service
    pub timeout: Duration,
    /// Whether debug logging was requested
    pub debug: bool,
}

impl Config {
    /// Creates a Config from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Config)` with validated settings
    /// * `Err(CliError)` if the area code or price is invalid, or no cache
    ///   directory could be determined
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let area = parse_area_code_arg(&cli.area_code)?;
        let max_price = parse_price_arg(&cli.max_price)?;
        let cache_dir = match &cli.cache_dir {
            Some(dir) => dir.clone(),
            None => CacheManager::default_dir().ok_or(CliError::NoCacheDir)?,
        };

        Ok(Config {
            area,
            max_price,
            base_url: cli.base_url.clone(),
            cache_dir,
            timeout: Duration::from_secs(cli.timeout_secs),
            debug: cli.debug,
        })
    }
}
