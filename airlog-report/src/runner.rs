//! Report orchestration
//!
//! [`ReportRunner`] ties the pieces together for one invocation: load the
//! schedule state, pick the due report, render it from the archive or the
//! snapshot, publish it, and persist the updated state.

use airlog_core::{Aggregator, Archive, Clock, Period, SystemClock};
use log::{info, warn};

use crate::config::ReportConfig;
use crate::format::{format_current, format_period};
use crate::publish::Publisher;
use crate::schedule::{due_report, ReportKind, ScheduleState};
use crate::snapshot::{load_hardware_report, Snapshot};
use crate::ReportResult;

/// Renders and publishes reports for one archive
pub struct ReportRunner<P, C = SystemClock> {
    config: ReportConfig,
    archive: Archive<C>,
    publisher: P,
}

impl<P: Publisher> ReportRunner<P, SystemClock> {
    /// Runner over `config.data_dir` using the local wall clock
    pub fn new(config: ReportConfig, publisher: P) -> Self {
        let archive = Archive::new(config.data_dir.clone());
        Self {
            config,
            archive,
            publisher,
        }
    }
}

impl<P: Publisher, C: Clock> ReportRunner<P, C> {
    /// Runner with a custom clock
    pub fn with_clock(config: ReportConfig, publisher: P, clock: C) -> Self {
        let archive = Archive::with_clock(config.data_dir.clone(), clock);
        Self {
            config,
            archive,
            publisher,
        }
    }

    /// Archive the reports are computed from
    pub fn archive(&self) -> &Archive<C> {
        &self.archive
    }

    /// Publisher receiving the posts
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Publish whatever report is due now and record it
    pub fn run(&mut self) -> ReportResult<ReportKind> {
        let now = self.archive.clock().now();
        let mut state = ScheduleState::load(&self.config.state_file)?;
        let kind = due_report(now, &state, self.config.report_hour);
        info!("{} report due at {}", kind, now);

        self.publish(kind)?;
        if kind == ReportKind::Day {
            self.publish(ReportKind::Hardware)?;
        }

        state.record(kind, now);
        state.save(&self.config.state_file)?;
        Ok(kind)
    }

    /// Render and publish one report kind, ignoring the schedule
    pub fn publish(&mut self, kind: ReportKind) -> ReportResult<()> {
        let posts = self.render(kind)?;
        self.publisher.publish(kind, &posts)?;
        Ok(())
    }

    /// Posts for `kind`
    pub fn render(&self, kind: ReportKind) -> ReportResult<Vec<String>> {
        match kind {
            ReportKind::Current => {
                let latest = self.archive.latest_timestamp()?;
                let snapshot = Snapshot::load(&self.config.snapshot_file)?;
                Ok(vec![format_current(&latest, &snapshot)?])
            }
            ReportKind::Hardware => Ok(vec![load_hardware_report(&self.config.hardware_report_file)?]),
            ReportKind::Day => self.render_period(Period::Today),
            ReportKind::Week => self.render_period(Period::ThisWeek),
            ReportKind::Month => self.render_period(Period::ThisMonth),
        }
    }

    fn render_period(&self, period: Period) -> ReportResult<Vec<String>> {
        let window = period.window(self.archive.clock().now());
        let scan = self.archive.scan(window)?;
        if scan.stats.malformed_rows > 0 {
            warn!(
                "{} malformed row(s) skipped for {:?} report ({} read)",
                scan.stats.malformed_rows, period, scan.stats.lines_read
            );
        }

        let mut aggregator = Aggregator::new();
        aggregator.extend(&scan.readings);
        let result = aggregator.finish_lenient();
        for (quantity, reason) in &result.rejected {
            warn!("{} omitted from {:?} report: {}", quantity.display_name(), period, reason);
        }

        Ok(format_period(&result.summary, period))
    }
}
