//! Core data models for tpir
//!
//! This module contains the area codes, hourly price records and the day
//! schedule, along with the client that fetches schedules from
//! elprisetjustnu.se.

pub mod prices;
pub mod schedule;

pub use prices::{FetchError, PriceFetcher, PricesClient, DEFAULT_BASE_URL};
pub use schedule::{Schedule, ScheduleError, EXPECTED_HOURS};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Swedish electricity price zones served by the price service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaCode {
    /// Luleå
    Se1,
    /// Sundsvall
    Se2,
    /// Stockholm
    Se3,
    /// Malmö
    Se4,
}

/// Error returned when a string is not one of the known area codes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("area code has invalid value {0}, valid values are: SE1, SE2, SE3, SE4")]
pub struct ParseAreaCodeError(pub String);

impl AreaCode {
    /// Every area code, in zone order
    pub const ALL: [AreaCode; 4] = [AreaCode::Se1, AreaCode::Se2, AreaCode::Se3, AreaCode::Se4];

    /// The code as used by the price service and in cache file names
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaCode::Se1 => "SE1",
            AreaCode::Se2 => "SE2",
            AreaCode::Se3 => "SE3",
            AreaCode::Se4 => "SE4",
        }
    }
}

impl fmt::Display for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaCode {
    type Err = ParseAreaCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AreaCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| ParseAreaCodeError(s.to_string()))
    }
}

/// Price of electricity for one hour
///
/// Field names follow the price service's JSON so that fetched payloads
/// and cache files share one format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Price in SEK per kWh
    #[serde(rename = "SEK_per_kWh")]
    pub sek_per_kwh: f64,
    /// Price in EUR per kWh
    #[serde(rename = "EUR_per_kWh")]
    pub eur_per_kwh: f64,
    /// EUR to SEK exchange rate used by the service
    #[serde(rename = "EXR")]
    pub exchange_rate: f64,
    /// Start of the hour, inclusive
    #[serde(rename = "time_start")]
    pub start: DateTime<FixedOffset>,
    /// End of the hour, inclusive
    #[serde(rename = "time_end")]
    pub end: DateTime<FixedOffset>,
}
