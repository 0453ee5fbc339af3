//! `airlog-report`: publish the report due now
//!
//! ```text
//! airlog-report            # decide from the clock and lastAct.json
//! airlog-report week       # force one report kind, state untouched
//! ```
//!
//! Paths come from `AIRLOG_*` environment variables (see `ReportConfig`),
//! log level from `RUST_LOG`.

use anyhow::{Context, Result};
use airlog_report::{FilePublisher, ReportConfig, ReportKind, ReportRunner, StdoutPublisher};
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ReportConfig::from_env().context("loading configuration")?;
    let publisher = (
        StdoutPublisher::new(config.max_post_chars),
        FilePublisher::new(config.reports_dir.clone()),
    );
    let mut runner = ReportRunner::new(config, publisher);

    match std::env::args().nth(1) {
        Some(arg) => {
            let kind: ReportKind = arg.parse().context("parsing report kind")?;
            runner
                .publish(kind)
                .with_context(|| format!("publishing {kind} report"))?;
            info!("published {} report", kind);
        }
        None => {
            let kind = runner.run().context("running scheduled report")?;
            info!("published {} report", kind);
        }
    }

    Ok(())
}
