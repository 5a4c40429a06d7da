//! A single day's hourly price list for one area
//!
//! The schedule decides whether it can be trusted (it must hold one price
//! per hour of the day) and whether it still covers a given moment.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use super::Price;

/// Number of hourly prices a complete day has
///
/// Daylight saving transition days have 23 or 25 hours and are treated as
/// incomplete.
pub const EXPECTED_HOURS: usize = 24;

/// Errors that can occur when reading or querying a schedule
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// No hour in the schedule contains the timestamp
    #[error("no price found for {0}")]
    PriceNotFound(DateTime<FixedOffset>),

    /// The payload is not a valid price list
    #[error("invalid price list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Hourly prices for one area and day
///
/// Keeps the bytes it was parsed from so the payload can be cached verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    prices: Vec<Price>,
    raw: Vec<u8>,
}

impl Schedule {
    /// Parses a JSON price list as served by the price service
    ///
    /// Prices are ordered by start time. The sort is stable, so prices with
    /// equal starts keep the order the service sent them in.
    pub fn parse(raw: impl Into<Vec<u8>>) -> Result<Self, ScheduleError> {
        let raw = raw.into();
        let mut prices: Vec<Price> = serde_json::from_slice(&raw)?;
        prices.sort_by_key(|price| price.start);
        Ok(Self { prices, raw })
    }

    /// Builds a schedule from already parsed prices
    pub fn from_prices(prices: Vec<Price>) -> Result<Self, ScheduleError> {
        let raw = serde_json::to_vec(&prices)?;
        Self::parse(raw)
    }

    /// Returns the price whose hour contains `timestamp`
    ///
    /// Both ends of an hour are inclusive. A timestamp on the boundary
    /// between two hours belongs to the earlier one.
    pub fn price_at(&self, timestamp: DateTime<FixedOffset>) -> Result<&Price, ScheduleError> {
        self.prices
            .iter()
            .find(|price| price.start <= timestamp && timestamp <= price.end)
            .ok_or(ScheduleError::PriceNotFound(timestamp))
    }

    /// Whether the schedule has a price for every hour of the day
    pub fn is_valid(&self) -> bool {
        self.prices.len() == EXPECTED_HOURS
    }

    /// Whether the schedule should be replaced at `reference`
    ///
    /// Incomplete schedules are always expired. Complete ones expire at the
    /// end of their last hour.
    pub fn is_expired(&self, reference: DateTime<FixedOffset>) -> bool {
        match self.prices.last() {
            Some(last) if self.is_valid() => reference >= last.end,
            _ => true,
        }
    }

    pub fn prices(&self) -> &[Price] {
        &self.prices
    }

    /// The payload this schedule was parsed from
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn first_start(&self) -> Option<DateTime<FixedOffset>> {
        self.prices.first().map(|price| price.start)
    }

    pub fn last_end(&self) -> Option<DateTime<FixedOffset>> {
        self.prices.last().map(|price| price.end)
    }
}
