//! Report scheduling gate
//!
//! The binary runs periodically (typically hourly). Each run publishes exactly
//! one report kind, picked by [`due_report`] from the wall clock and the
//! persisted [`ScheduleState`]:
//!
//! 1. **Month**: report hour on the last day of the month, unless this month
//!    was already reported
//! 2. **Week**: report hour on Sunday, unless this week of the month was
//!    already reported
//! 3. **Day**: report hour, unless today was already reported
//! 4. **Current**: otherwise
//!
//! State only records the last reported month, week-of-month, and day
//! number. A Month run therefore does not mark the day as done, and the Day
//! report follows on the next run within the same hour.

use core::fmt;
use core::str::FromStr;
use std::fs;
use std::io;
use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::{ReportError, ReportResult};

/// Kinds of published report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Latest snapshot values
    Current,
    /// Statistics since midnight
    Day,
    /// Statistics since Monday
    Week,
    /// Statistics since the first of the month
    Month,
    /// Free-text station status
    Hardware,
}

impl ReportKind {
    /// Name used for the report file and on the command line
    pub const fn name(&self) -> &'static str {
        match self {
            ReportKind::Current => "current",
            ReportKind::Day => "day",
            ReportKind::Week => "week",
            ReportKind::Month => "month",
            ReportKind::Hardware => "hardware",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(ReportKind::Current),
            "day" => Ok(ReportKind::Day),
            "week" => Ok(ReportKind::Week),
            "month" => Ok(ReportKind::Month),
            "hardware" => Ok(ReportKind::Hardware),
            other => Err(ReportError::Config(format!("unknown report kind {other:?}"))),
        }
    }
}

/// Last reported month, week of month, and day of month (0 = never)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleState {
    pub month: u32,
    pub week: u32,
    pub day: u32,
}

impl ScheduleState {
    /// Load state from `path`; a missing file is the default state
    pub fn load(path: &Path) -> ReportResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ReportError::io(path, e)),
        };
        serde_json::from_str(&text).map_err(|e| ReportError::json(path, e))
    }

    pub fn save(&self, path: &Path) -> ReportResult<()> {
        let text = serde_json::to_string(self).map_err(|e| ReportError::json(path, e))?;
        fs::write(path, text).map_err(|e| ReportError::io(path, e))
    }

    /// Mark `kind` as published at `now`
    pub fn record(&mut self, kind: ReportKind, now: NaiveDateTime) {
        let date = now.date();
        match kind {
            ReportKind::Month => self.month = date.month(),
            ReportKind::Week => self.week = week_of_month(date),
            ReportKind::Day => self.day = date.day(),
            ReportKind::Current | ReportKind::Hardware => {}
        }
    }
}

/// Report due at `now`
pub fn due_report(now: NaiveDateTime, state: &ScheduleState, report_hour: u32) -> ReportKind {
    let date = now.date();
    let at_report_hour = now.hour() == report_hour;

    if at_report_hour && date.day() == last_day_of_month(date) && state.month != date.month() {
        ReportKind::Month
    } else if date.weekday() == Weekday::Sun && at_report_hour && state.week != week_of_month(date) {
        ReportKind::Week
    } else if at_report_hour && state.day != date.day() {
        ReportKind::Day
    } else {
        ReportKind::Current
    }
}

/// Week of the month, 1-based, with weeks starting on Monday
pub fn week_of_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    let adjusted = date.day() + first.weekday().num_days_from_monday();
    adjusted.div_ceil(7)
}

/// Number of the last day in `date`'s month
pub fn last_day_of_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|next| (next - Duration::days(1)).day())
        .unwrap_or(31)
}
