//! Scheduled Text Reports over the Sensor Archive
//!
//! ## Overview
//!
//! This crate is the caller side of `airlog-core`: it decides which report is
//! due, pulls readings and statistics from the archive, renders them as short
//! text posts, and hands the posts to a [`Publisher`].
//!
//! ## Report Kinds
//!
//! | Kind     | Source                                  | When                         |
//! |----------|-----------------------------------------|------------------------------|
//! | Current  | `last.json` snapshot + latest timestamp | every run nothing else is due |
//! | Day      | archive, midnight until now             | report hour, once per day    |
//! | Hardware | free-text `report.txt`                  | together with Day            |
//! | Week     | archive, Monday until now               | Sunday at report hour        |
//! | Month    | archive, the 1st until now              | last day at report hour      |
//!
//! ## Flow
//!
//! ```text
//! clock + state file ─► schedule::due_report ─► ReportRunner::render
//!                                                  │
//!                   Archive::period ─► Aggregator ─┤
//!                                                  ▼
//!                                       format ─► Publisher
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use airlog_report::{ReportConfig, ReportRunner, StdoutPublisher};
//!
//! let config = ReportConfig::from_env()?;
//! let mut runner = ReportRunner::new(config.clone(), StdoutPublisher::new(config.max_post_chars));
//! let kind = runner.run()?;
//! println!("published {kind}");
//! # Ok::<(), airlog_report::ReportError>(())
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod format;
pub mod publish;
pub mod runner;
pub mod schedule;
pub mod snapshot;

use std::io;
use std::path::PathBuf;

use airlog_core::{ArchiveError, Quantity};
use thiserror::Error;

pub use config::ReportConfig;
pub use publish::{FilePublisher, PublishError, Publisher, StdoutPublisher};
pub use runner::ReportRunner;
pub use schedule::{due_report, ReportKind, ScheduleState};
pub use snapshot::Snapshot;

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Report generation errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Archive query or aggregation failed
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Reading or writing a report-side file failed
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A JSON file could not be parsed or produced
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot lacks a catalog quantity
    #[error("Snapshot has no value for {0}")]
    MissingQuantity(Quantity),

    /// Bad configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Publisher refused the posts
    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
