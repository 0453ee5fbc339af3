//! Wall-clock access and reporting windows
//!
//! Archive timestamps are naive local times (the station writes local time
//! without an offset), so everything here works on [`NaiveDateTime`].
//!
//! Clock abstraction keeps "now" replaceable:
//! - [`SystemClock`] reads the local wall clock
//! - [`FixedClock`] returns a settable instant (tests, replays)

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Timestamp layout inside archive CSV rows
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layout used in rendered reports
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Source of the current local time
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    /// Clock stopped at `instant`
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }

    /// Jump to `instant`
    pub fn set(&mut self, instant: NaiveDateTime) {
        self.instant = instant;
    }

    /// Move forward by `by`
    pub fn advance(&mut self, by: Duration) {
        self.instant += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Inclusive `[start, end]` time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First instant included
    pub start: NaiveDateTime,
    /// Last instant included
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// Window from `start` to `end`, both included
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whether `instant` lies inside the window, bounds included
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether any part of `day` overlaps the window
    pub fn touches_day(&self, day: NaiveDate) -> bool {
        self.start.date() <= day && day <= self.end.date()
    }
}

/// Reporting periods ending at "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Midnight today until now
    Today,
    /// Most recent Monday at midnight until now
    ThisWeek,
    /// First of the month at midnight until now
    ThisMonth,
}

impl Period {
    /// Window for this period as seen at `now`
    pub fn window(&self, now: NaiveDateTime) -> DateWindow {
        let today = now.date();
        let first_day = match self {
            Period::Today => today,
            Period::ThisWeek => {
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            }
            Period::ThisMonth => today.with_day(1).unwrap_or(today),
        };
        DateWindow::new(first_day.and_time(NaiveTime::default()), now)
    }

    /// Label used when rendering reports for this period
    pub const fn label(&self) -> &'static str {
        match self {
            Period::Today => "Dati di oggi",
            Period::ThisWeek => "Dati della settimana",
            Period::ThisMonth => "Dati del mese",
        }
    }
}

/// Parse a CSV timestamp (`2024-06-10 08:00:00`)
pub fn parse_csv_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), CSV_TIMESTAMP_FORMAT).ok()
}

/// Render a timestamp for reports (`10/06/2024 08:00:00`)
pub fn format_display(instant: NaiveDateTime) -> String {
    instant.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}
