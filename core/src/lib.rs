//! Burndown analytics over a dated risk register.
//!
//! Records flow one way: normalized records → daily / monthly series
//! (via the interval classifier) → peak detection → presentation.
//! Drill-down queries run independently on a chosen date.

pub mod classifier;
pub mod command;
pub mod config;
pub mod daily_series;
pub mod drilldown;
pub mod engine;
pub mod error;
pub mod generator;
pub mod monthly_series;
pub mod normalize;
pub mod peaks;
pub mod record;
pub mod rng;
pub mod role;
pub mod session;
pub mod store;
pub mod summary;
pub mod timeline;
pub mod types;
