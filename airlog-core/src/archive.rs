//! Date-partitioned reading archive
//!
//! The archive is a directory tree with one directory per calendar day and one
//! CSV file per quantity inside it:
//!
//! ```text
//! dati/
//! ├── last.json            (ignored: not a year directory)
//! ├── 2024/
//! │   └── 06/
//! │       ├── 10/
//! │       │   ├── temperature.csv
//! │       │   └── humidity.csv
//! │       └── 11/
//! │           └── temperature.csv
//! ```
//!
//! Each CSV row is `YYYY-MM-DD HH:MM:SS,<value>` with no header.
//!
//! ## Query Algorithm
//!
//! 1. List year directories ascending, keep those overlapping the window
//! 2. Same for months inside each kept year
//! 3. For each day directory, build its calendar date and drop the day when
//!    it lies entirely outside the window (day-level pre-filter)
//! 4. Open every quantity file present in a kept day and parse its rows
//! 5. Check each row's full timestamp against the window; the day filter
//!    alone does not exclude early/late rows on the boundary days
//!
//! Rows that are not UTF-8, have fewer than two fields, or whose timestamp or
//! value does not parse, are skipped and counted in [`ScanStats::malformed_rows`]. A missing
//! quantity file contributes nothing. An existing file that cannot be read
//! fails the whole query with [`ArchiveError::Io`].
//!
//! ## Ordering
//!
//! Results follow directory order: years, months and days ascending, then
//! quantities in catalog order, then file row order. Nothing is sorted by
//! timestamp across quantities.
//!
//! ## Example
//!
//! ```rust,no_run
//! use airlog_core::{Archive, aggregate};
//!
//! let archive = Archive::new("dati");
//! let readings = archive.this_week()?;
//! let summary = aggregate(&readings)?;
//! println!("latest row: {}", archive.latest_timestamp()?);
//! # Ok::<(), airlog_core::ArchiveError>(())
//! ```

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::{debug, warn};

use crate::catalog::Quantity;
use crate::errors::{ArchiveError, ArchiveResult};
use crate::reading::Reading;
use crate::time::{format_display, parse_csv_timestamp, Clock, DateWindow, Period, SystemClock};

/// Counters collected while scanning the archive
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Day directories whose files were read
    pub days_visited: usize,
    /// Day directories dropped by the day-level filter or with an invalid date
    pub days_skipped: usize,
    /// Quantity files opened
    pub files_read: usize,
    /// Non-blank rows examined
    pub lines_read: usize,
    /// Rows skipped because they could not be parsed
    pub malformed_rows: usize,
    /// Well-formed rows outside the requested window
    pub out_of_range_rows: usize,
}

/// Readings produced by a scan, with its counters
#[derive(Debug, Clone, Default)]
pub struct Scan {
    /// Readings inside the window, in directory order
    pub readings: Vec<Reading>,
    /// Counters gathered along the way
    pub stats: ScanStats,
}

/// Directory-backed store of historical readings
///
/// Every query re-reads the filesystem; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Archive<C = SystemClock> {
    root: PathBuf,
    clock: C,
}

impl Archive<SystemClock> {
    /// Archive rooted at `root`, using the local wall clock
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clock(root, SystemClock)
    }
}

impl<C: Clock> Archive<C> {
    /// Archive rooted at `root` with a custom clock
    pub fn with_clock(root: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            root: root.into(),
            clock,
        }
    }

    /// Directory holding the year directories
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Clock used for period windows and the latest-timestamp fallback
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// All readings with `start <= timestamp <= end`
    pub fn query_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> ArchiveResult<Vec<Reading>> {
        self.scan(DateWindow::new(start, end)).map(|scan| scan.readings)
    }

    /// Readings since midnight today
    pub fn today(&self) -> ArchiveResult<Vec<Reading>> {
        self.period(Period::Today)
    }

    /// Readings since the most recent Monday at midnight
    pub fn this_week(&self) -> ArchiveResult<Vec<Reading>> {
        self.period(Period::ThisWeek)
    }

    /// Readings since the first of the current month
    pub fn this_month(&self) -> ArchiveResult<Vec<Reading>> {
        self.period(Period::ThisMonth)
    }

    /// Readings for a reporting period ending now
    pub fn period(&self, period: Period) -> ArchiveResult<Vec<Reading>> {
        let window = period.window(self.clock.now());
        self.query_range(window.start, window.end)
    }

    /// Walk the archive for `window`, returning readings and counters
    pub fn scan(&self, window: DateWindow) -> ArchiveResult<Scan> {
        let mut scan = Scan::default();
        if window.start > window.end {
            debug!("empty window {} > {}", window.start, window.end);
            return Ok(scan);
        }

        let (first, last) = (window.start.date(), window.end.date());

        for (year, year_dir) in numbered_dirs(&self.root)? {
            let Ok(year) = i32::try_from(year) else {
                continue;
            };
            if year < first.year() || year > last.year() {
                continue;
            }

            for (month, month_dir) in numbered_dirs(&year_dir)? {
                if (year, month) < (first.year(), first.month())
                    || (year, month) > (last.year(), last.month())
                {
                    continue;
                }

                for (day, day_dir) in numbered_dirs(&month_dir)? {
                    let Some(pivot) = NaiveDate::from_ymd_opt(year, month, day) else {
                        warn!("skipping {}: not a calendar date", day_dir.display());
                        scan.stats.days_skipped += 1;
                        continue;
                    };
                    if !window.touches_day(pivot) {
                        scan.stats.days_skipped += 1;
                        continue;
                    }

                    scan.stats.days_visited += 1;
                    self.scan_day(&day_dir, &window, &mut scan)?;
                }
            }
        }

        debug!(
            "scanned {} day(s) under {}: {} reading(s), {} malformed row(s)",
            scan.stats.days_visited,
            self.root.display(),
            scan.readings.len(),
            scan.stats.malformed_rows
        );
        Ok(scan)
    }

    fn scan_day(&self, day_dir: &Path, window: &DateWindow, scan: &mut Scan) -> ArchiveResult<()> {
        for quantity in Quantity::ALL {
            let path = day_dir.join(quantity.storage_file());
            let Some(mut reader) = open_if_present(&path)? else {
                continue;
            };
            scan.stats.files_read += 1;

            let mut buf = Vec::new();
            while read_raw_line(&mut reader, &mut buf, &path)? {
                let Ok(line) = std::str::from_utf8(&buf) else {
                    debug!("undecodable row in {}", path.display());
                    scan.stats.lines_read += 1;
                    scan.stats.malformed_rows += 1;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                scan.stats.lines_read += 1;

                match parse_row(line) {
                    Some((timestamp, value)) if window.contains(timestamp) => {
                        scan.readings.push(Reading::new(value, quantity, timestamp));
                    }
                    Some(_) => scan.stats.out_of_range_rows += 1,
                    None => scan.stats.malformed_rows += 1,
                }
            }
        }
        Ok(())
    }

    /// Timestamp of the newest temperature row, if the archive has one
    ///
    /// Day directories are listed newest first, ignoring years after the
    /// current one. The first day whose temperature file holds a well-formed
    /// row decides the result: its last well-formed row.
    pub fn latest_reading_time(&self) -> ArchiveResult<Option<NaiveDateTime>> {
        let current_year = self.clock.now().year();

        for (year, year_dir) in numbered_dirs(&self.root)?.into_iter().rev() {
            let Ok(year) = i32::try_from(year) else {
                continue;
            };
            if year > current_year {
                continue;
            }
            for (month, month_dir) in numbered_dirs(&year_dir)?.into_iter().rev() {
                for (day, day_dir) in numbered_dirs(&month_dir)?.into_iter().rev() {
                    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
                        debug!("skipping {}: not a calendar date", day_dir.display());
                        continue;
                    }
                    let path = day_dir.join(Quantity::Temperature.storage_file());
                    let Some(mut reader) = open_if_present(&path)? else {
                        continue;
                    };

                    let mut latest = None;
                    let mut buf = Vec::new();
                    while read_raw_line(&mut reader, &mut buf, &path)? {
                        let parsed = std::str::from_utf8(&buf).ok().and_then(parse_row);
                        if let Some((timestamp, _)) = parsed {
                            latest = Some(timestamp);
                        }
                    }
                    if latest.is_some() {
                        return Ok(latest);
                    }
                    debug!("{} has no well-formed rows", path.display());
                }
            }
        }
        Ok(None)
    }

    /// Newest temperature timestamp for display, or now when there is none
    ///
    /// Both cases use [`DISPLAY_TIMESTAMP_FORMAT`](crate::time::DISPLAY_TIMESTAMP_FORMAT).
    pub fn latest_timestamp(&self) -> ArchiveResult<String> {
        let instant = match self.latest_reading_time()? {
            Some(timestamp) => timestamp,
            None => self.clock.now(),
        };
        Ok(format_display(instant))
    }
}

/// Split a CSV row into timestamp and value
///
/// Needs at least two comma-separated fields; extra fields are ignored.
/// Non-finite values count as malformed.
pub fn parse_row(line: &str) -> Option<(NaiveDateTime, f64)> {
    let mut fields = line.split(',');
    let timestamp = fields.next()?;
    let value = fields.next()?;

    let timestamp = parse_csv_timestamp(timestamp)?;
    let value = value.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((timestamp, value))
}

/// Subdirectories of `dir` whose names are plain numbers, ascending
fn numbered_dirs(dir: &Path) -> ArchiveResult<Vec<(u32, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|e| ArchiveError::io(dir, e))?;
    let mut dirs = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| ArchiveError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| ArchiveError::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let parsed = name
            .to_str()
            .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|n| n.parse::<u32>().ok());
        match parsed {
            Some(number) => dirs.push((number, entry.path())),
            None => debug!("ignoring non-numeric directory {}", entry.path().display()),
        }
    }

    dirs.sort_unstable_by_key(|(number, _)| *number);
    Ok(dirs)
}

/// Read the next line of `reader` into `buf` without its terminator
///
/// Returns `false` at end of file. Bytes are not decoded here so an
/// undecodable row can be skipped instead of failing the whole file.
fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, path: &Path) -> ArchiveResult<bool> {
    buf.clear();
    let read = reader
        .read_until(b'\n', buf)
        .map_err(|e| ArchiveError::io(path, e))?;
    if read == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(true)
}

/// Open `path` for buffered reading; `None` when it does not exist
fn open_if_present(path: &Path) -> ArchiveResult<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ArchiveError::io(path, e)),
    }
}
