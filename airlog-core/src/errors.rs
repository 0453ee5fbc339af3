//! Error Types for Archive Queries and Aggregation
//!
//! ## Error Categories
//!
//! Only conditions the caller can act on are errors:
//!
//! ### Lookup Failures
//! - `UnknownQuantity`: a symbol that must name a catalog entry does not
//!   (string parsing via `FromStr`). Plain catalog lookups return `Option`
//!   instead, since a miss there is an ordinary outcome.
//!
//! ### Statistical Preconditions
//! - `InsufficientSamples`: fewer than two readings for a quantity when the
//!   sample standard deviation is requested.
//!
//! ### Storage Failures
//! - `Io`: an existing directory or file could not be read.
//!
//! Malformed CSV rows and missing per-quantity files are *not* errors. They
//! are skipped during traversal and show up in
//! [`ScanStats`](crate::archive::ScanStats).
//!
//! ## Error Handling Strategy
//!
//! ```rust,no_run
//! use airlog_core::{Archive, ArchiveError, Period, aggregate};
//!
//! let archive = Archive::new("dati");
//! let readings = archive.period(Period::Today)?;
//! match aggregate(&readings) {
//!     Ok(summary) => {
//!         // render the report
//!     }
//!     Err(ArchiveError::InsufficientSamples { quantity, .. }) => {
//!         // too early in the day for this quantity; skip or retry later
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), ArchiveError>(())
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Quantity;

/// Result type for archive and aggregation operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors surfaced by the archive and the aggregator
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Symbol does not belong to the quantity catalog
    #[error("Unknown quantity symbol: {0:?}")]
    UnknownQuantity(String),

    /// Not enough readings to compute a sample statistic
    #[error("Insufficient samples for {quantity}: need {required}, have {available}")]
    InsufficientSamples {
        /// Quantity the statistic was requested for
        quantity: Quantity,
        /// Minimum number of readings needed
        required: usize,
        /// Readings actually collected
        available: usize,
    },

    /// An existing archive path could not be read
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        /// Path being read when the failure happened
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl ArchiveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
