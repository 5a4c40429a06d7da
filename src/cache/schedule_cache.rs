//! Today's price list for one area, cached between runs
//!
//! `ScheduleCache` decides whether the stored price list can be trusted,
//! fetches a new one when it cannot, and writes the fresh payload back to
//! the store.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::store::{ScheduleStore, StoreError};
use crate::data::{AreaCode, FetchError, Price, PriceFetcher, Schedule, ScheduleError};

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

/// Errors that can occur when loading today's price list
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache exists but could not be read
    #[error("error while trying to load from cache: {0}")]
    Read(#[source] StoreError),

    /// The cache was read but does not hold a price list
    #[error("price list cache is corrupt: {0}")]
    Parse(#[source] ScheduleError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The service answered but not with a price list
    #[error("error while parsing fetched price list: {0}")]
    FetchParse(#[source] ScheduleError),

    /// The fresh price list could not be saved; it is still usable
    #[error("could not save price list: {0}")]
    Write(#[source] StoreError),

    #[error(transparent)]
    PriceNotFound(ScheduleError),
}

/// Why a price list has to be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Staleness {
    Missing,
    Invalid(usize),
    Expired,
}

/// Today's price list for one area
///
/// Loads and refreshes are serialized per instance, so concurrent callers
/// cause at most one fetch. Readers of [`ScheduleCache::current`] always
/// see a whole schedule.
pub struct ScheduleCache {
    area: AreaCode,
    store: Arc<dyn ScheduleStore>,
    fetcher: Arc<dyn PriceFetcher>,
    clock: Clock,
    current: RwLock<Option<Arc<Schedule>>>,
    refresh_lock: Mutex<()>,
    write_error: Mutex<Option<CacheError>>,
}

impl ScheduleCache {
    /// Creates an unloaded cache for `area`
    pub fn new(area: AreaCode, store: Arc<dyn ScheduleStore>, fetcher: Arc<dyn PriceFetcher>) -> Self {
        Self {
            area,
            store,
            fetcher,
            clock: Arc::new(|| Local::now().fixed_offset()),
            current: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            write_error: Mutex::new(None),
        }
    }

    /// Creates a cache for `area` and loads today's price list
    pub async fn open(
        area: AreaCode,
        store: Arc<dyn ScheduleStore>,
        fetcher: Arc<dyn PriceFetcher>,
    ) -> Result<Self, CacheError> {
        let cache = Self::new(area, store, fetcher);
        cache.load().await?;
        Ok(cache)
    }

    /// Replaces the clock used to judge freshness
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<FixedOffset> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn area(&self) -> AreaCode {
        self.area
    }

    /// The most recently loaded price list, if any
    pub async fn current(&self) -> Option<Arc<Schedule>> {
        self.current.read().await.clone()
    }

    /// Takes the error from the last failed cache write, if any
    ///
    /// A failed write does not fail the load that caused it.
    pub async fn take_write_error(&self) -> Option<CacheError> {
        self.write_error.lock().await.take()
    }

    /// Returns a price list that is complete and covers the current time
    ///
    /// The stored price list is used when it can be trusted. Otherwise
    /// today's list is fetched, saved and returned. A corrupt cache or a
    /// failed fetch is an error; there is no fallback to stale data.
    pub async fn load(&self) -> Result<Arc<Schedule>, CacheError> {
        let _guard = self.refresh_lock.lock().await;
        let now = (self.clock)();

        if let Some(current) = self.current().await {
            if !current.is_expired(now) {
                return Ok(current);
            }
        }

        let staleness = match self.read_stored()? {
            Some(stored) => match staleness_of(&stored, now) {
                None => {
                    debug!(area = %self.area, "Found valid, and current, price list cache file");
                    return Ok(self.publish(stored).await);
                }
                Some(staleness) => staleness,
            },
            None => Staleness::Missing,
        };

        match staleness {
            Staleness::Missing => debug!(area = %self.area, "No cached price list, will download one"),
            Staleness::Invalid(entries) => {
                debug!(area = %self.area, entries, "Cache found but it was invalid, will download a new one")
            }
            Staleness::Expired => debug!(area = %self.area, "Cache found but has expired, will download a new one"),
        }

        let fresh = self.fetch_and_store(now.date_naive()).await?;
        Ok(self.publish(fresh).await)
    }

    /// Fetches today's price list regardless of what is cached
    pub async fn refresh(&self) -> Result<Arc<Schedule>, CacheError> {
        let _guard = self.refresh_lock.lock().await;
        let today = (self.clock)().date_naive();
        let fresh = self.fetch_and_store(today).await?;
        Ok(self.publish(fresh).await)
    }

    /// Loads today's price list and looks up the price at `timestamp`
    pub async fn price_today(&self, timestamp: DateTime<FixedOffset>) -> Result<Price, CacheError> {
        let schedule = self.load().await?;
        schedule
            .price_at(timestamp)
            .cloned()
            .map_err(CacheError::PriceNotFound)
    }

    fn read_stored(&self) -> Result<Option<Schedule>, CacheError> {
        match self.store.read(self.area) {
            Ok(bytes) => {
                debug!(area = %self.area, "Reading price list");
                Schedule::parse(bytes).map(Some).map_err(CacheError::Parse)
            }
            Err(StoreError::NotFound { path }) => {
                debug!(path = %path.display(), "Price list cache file not found");
                Ok(None)
            }
            Err(err) => Err(CacheError::Read(err)),
        }
    }

    async fn fetch_and_store(&self, date: NaiveDate) -> Result<Schedule, CacheError> {
        let raw = self.fetcher.fetch(self.area, date).await?;
        let schedule = Schedule::parse(raw).map_err(CacheError::FetchParse)?;
        info!(area = %self.area, %date, entries = schedule.len(), "Fetched new price list");

        if let Err(err) = self.store.write(self.area, schedule.raw()) {
            warn!(error = %err, "Could not save price list, continuing with fetched data");
            *self.write_error.lock().await = Some(CacheError::Write(err));
        }
        Ok(schedule)
    }

    async fn publish(&self, schedule: Schedule) -> Arc<Schedule> {
        let schedule = Arc::new(schedule);
        *self.current.write().await = Some(Arc::clone(&schedule));
        schedule
    }
}

fn staleness_of(schedule: &Schedule, now: DateTime<FixedOffset>) -> Option<Staleness> {
    if !schedule.is_valid() {
        Some(Staleness::Invalid(schedule.len()))
    } else if schedule.is_expired(now) {
        Some(Staleness::Expired)
    } else {
        None
    }
}
