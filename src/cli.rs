//! Command-line interface parsing for tpir
//!
//! This module handles parsing of CLI arguments using clap. Area code and
//! price are taken as plain strings and validated here so that invalid values
//! get the tool's own error messages and exit code.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::{AreaCode, ParseAreaCodeError, DEFAULT_BASE_URL};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The area code is not one of SE1..SE4
    #[error(transparent)]
    InvalidAreaCode(#[from] ParseAreaCodeError),

    /// The maximum price is not a finite number
    #[error("{0} is not a valid price")]
    InvalidThreshold(String),

    /// No cache directory was given and the platform has none
    #[error("could not determine a cache directory, use --cache-dir")]
    NoCacheDir,
}

/// The Price Is Right - check the current electricity price against a maximum
///
/// Calls www.elprisetjustnu.se to check if the price for electricity is lower
/// or higher than the given price. If lower the command returns 0, if higher
/// it returns 1.
#[derive(Parser, Debug)]
#[command(name = "tpir")]
#[command(about = "Check if the current electricity price is below a maximum price")]
#[command(version)]
pub struct Cli {
    /// Area code, valid values are SE1, SE2, SE3 or SE4
    #[arg(value_name = "AREA_CODE")]
    pub area_code: String,

    /// Price of electricity in SEK per kWh needs to be lower than this to return 0
    #[arg(value_name = "PRICE", allow_hyphen_values = true)]
    pub max_price: String,

    /// Turn on debug output
    #[arg(long)]
    pub debug: bool,

    /// Root URL of the price service
    #[arg(long, env = "TPIR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory for cached price lists [default: user cache directory]
    #[arg(long, env = "TPIR_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Timeout in seconds for requests to the price service
    #[arg(long, env = "TPIR_TIMEOUT_SECS", default_value_t = 10, value_name = "SECS")]
    pub timeout_secs: u64,
}

/// Parses an area code argument.
///
/// # Returns
/// * `Ok(AreaCode)` if the string is one of SE1, SE2, SE3 or SE4
/// * `Err(CliError::InvalidAreaCode)` otherwise
pub fn parse_area_code_arg(s: &str) -> Result<AreaCode, CliError> {
    Ok(s.parse::<AreaCode>()?)
}

/// Parses a price argument in SEK per kWh.
///
/// Zero and negative values are accepted since spot prices can drop below zero.
pub fn parse_price_arg(s: &str) -> Result<f64, CliError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| CliError::InvalidThreshold(s.to_string()))
}
