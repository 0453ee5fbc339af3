//! Core query and statistics engine for Airlog
//!
//! Reads a date-partitioned archive of environmental sensor readings
//! (`YYYY/MM/DD/<quantity>.csv`) and reduces any date range to per-quantity
//! summary statistics.
//!
//! Layers, leaf first:
//! - [`catalog`]: the fixed set of measured quantities
//! - [`reading`]: precision-rounded timestamped values
//! - [`archive`]: directory traversal and range queries
//! - [`stats`]: single-pass aggregation (mean, mode, min/max, stdev)
//!
//! Everything is synchronous and single-threaded. Queries re-read the
//! filesystem each time; there is no cache.
//!
//! ```no_run
//! use airlog_core::{Archive, Quantity, aggregate};
//! use chrono::NaiveDate;
//!
//! let archive = Archive::new("dati");
//! let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
//! let readings = archive.query_range(
//!     day.and_hms_opt(0, 0, 0).unwrap(),
//!     day.and_hms_opt(23, 59, 59).unwrap(),
//! )?;
//!
//! for (quantity, stats) in aggregate(&readings)? {
//!     println!("{}: mean {:.2} {}", quantity.display_name(), stats.mean, quantity.unit());
//! }
//! # Ok::<(), airlog_core::ArchiveError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod catalog;
pub mod errors;
pub mod reading;
pub mod stats;
pub mod time;

// Public API
pub use archive::{Archive, Scan, ScanStats};
pub use catalog::Quantity;
pub use errors::{ArchiveError, ArchiveResult};
pub use reading::Reading;
pub use stats::{aggregate, Aggregator, LenientSummary, QuantityStats, Summary};
pub use time::{Clock, DateWindow, FixedClock, Period, SystemClock};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
