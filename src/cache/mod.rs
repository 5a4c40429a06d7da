//! Cache module for keeping today's price list between runs
//!
//! This module provides the byte store abstraction, a file-backed store in
//! the user cache directory, and the `ScheduleCache` that decides when the
//! stored price list can be trusted and when a new one must be fetched.

mod manager;
mod schedule_cache;
mod store;

pub use manager::CacheManager;
pub use schedule_cache::{CacheError, Clock, ScheduleCache};
pub use store::{ScheduleStore, StoreError};
