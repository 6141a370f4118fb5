//! # `tripdatalib`
//!
//! `tripdatalib` is a Rust library for loading and querying trip pickup datasets
//! (timestamp + lat/lon per row).
//!
//! The library provides:
//! - CSV loading from files and URLs, plain or gzipped (via [`TripDataset`] struct).
//! - Error handling with [`TripDataError`].
//! - The hour/minute queries behind the pickups dashboard: per-hour filtering,
//!   minute histograms, and hexagonal density binning (via [`hexbin`]).
//!
//! ## Example
//!
//! ```
//! use tripdatalib::TripDataset;
//!
//! let data = TripDataset::from_csv("tests/fixtures/trips_small.csv").unwrap();
//! let morning = data.filter_by_hour(8).unwrap();
//! assert!(morning.len() <= data.len());
//! ```

mod dataset;
mod error;
pub mod hexbin;
mod record;

// Public APIs
pub use dataset::TripDataset;
pub use error::{TripDataError, TripDataErrorKind};
pub use record::TripRecord;
