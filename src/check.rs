//! The price check itself: today's price right now against the maximum

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::cache::{CacheError, CacheManager, ScheduleCache};
use crate::config::Config;
use crate::data::{Price, PricesClient};

/// Outcome of comparing the current price with the maximum price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The price is at or below the maximum
    Right,
    /// The price is above the maximum
    NotRight,
}

impl Verdict {
    pub fn evaluate(price: &Price, max_price: f64) -> Self {
        if price.sek_per_kwh > max_price {
            Verdict::NotRight
        } else {
            Verdict::Right
        }
    }

    /// Process exit code for this verdict
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Right => 0,
            Verdict::NotRight => 1,
        }
    }
}

/// Builds the file cache and price client described by `config`
pub fn build_cache(config: &Config) -> Result<ScheduleCache, CacheError> {
    let store = CacheManager::with_dir(config.cache_dir.clone());
    let fetcher = PricesClient::new(config.base_url.clone(), config.timeout)?;
    Ok(ScheduleCache::new(config.area, Arc::new(store), Arc::new(fetcher)))
}

/// Looks up the price at `now` and compares it with the configured maximum
pub async fn check(cache: &ScheduleCache, max_price: f64, now: DateTime<FixedOffset>) -> Result<Verdict, CacheError> {
    debug!(
        area = %cache.area(),
        max_price,
        "Will evaluate if the electricity price is lower than the maximum price"
    );
    debug!(%now, "Looking up current price");

    let price = cache.price_today(now).await?;
    debug!(area = %cache.area(), sek_per_kwh = price.sek_per_kwh, "Found current price");

    let verdict = Verdict::evaluate(&price, max_price);
    match verdict {
        Verdict::Right => debug!(
            "The Price Is Right! Current electricity price at {} SEK/kWh is lower than the given maximum price at {} SEK/kWh",
            price.sek_per_kwh, max_price
        ),
        Verdict::NotRight => debug!(
            "The Price Is NOT Right! Current electricity price at {} SEK/kWh is higher than the given maximum price at {} SEK/kWh",
            price.sek_per_kwh, max_price
        ),
    }
    Ok(verdict)
}
