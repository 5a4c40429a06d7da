//! The Price Is Right library
//!
//! Checks whether the current Swedish electricity price for an area is below
//! a given maximum, using a cached copy of today's price list when it can be
//! trusted.

pub mod cache;
pub mod check;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
