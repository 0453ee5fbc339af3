//! Shared fixtures for archive integration tests

#![allow(dead_code)]

use std::fs;
use std::ops::Deref;
use std::path::PathBuf;

use airlog_core::{Archive, FixedClock, Quantity};
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

/// Builds a `YYYY/MM/DD/<quantity>.csv` tree in a temporary directory
pub struct ArchiveBuilder {
    dir: TempDir,
    now: NaiveDateTime,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            now: at(2024, 6, 30, 12, 0, 0),
        }
    }

    /// Instant the archive's clock reports
    pub fn clock(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn day_dir(&self, y: i32, m: u32, d: u32) -> PathBuf {
        self.dir
            .path()
            .join(y.to_string())
            .join(format!("{:02}", m))
            .join(format!("{:02}", d))
    }

    /// Rows for 2024-06-10
    pub fn rows(self, quantity: Quantity, rows: &[&str]) -> Self {
        self.day_rows(2024, 6, 10, quantity, rows)
    }

    pub fn day_rows(self, y: i32, m: u32, d: u32, quantity: Quantity, rows: &[&str]) -> Self {
        let dir = self.day_dir(y, m, d);
        fs::create_dir_all(&dir).unwrap();
        let mut body = rows.join("\n");
        body.push('\n');
        fs::write(dir.join(quantity.storage_file()), body).unwrap();
        self
    }

    pub fn build(self) -> TestArchive {
        let archive = Archive::with_clock(self.dir.path(), FixedClock::new(self.now));
        TestArchive {
            _dir: self.dir,
            archive,
        }
    }
}

/// Archive that owns its temporary directory
pub struct TestArchive {
    _dir: TempDir,
    archive: Archive<FixedClock>,
}

impl Deref for TestArchive {
    type Target = Archive<FixedClock>;

    fn deref(&self) -> &Self::Target {
        &self.archive
    }
}
