//! Text rendering for reports
//!
//! Every number is printed with two decimals regardless of the quantity's
//! stored precision. Periodic reports produce one block per quantity, in
//! catalog order:
//!
//! ```text
//! (1/2) Dati di oggi
//! ---Temperatura---
//! Media: 22.33 °C
//! Moda: 22.00 °C
//! Massimo: 25.00 °C (10/06/2024 12:00:00)
//! Minimo: 20.00 °C (10/06/2024 08:00:00)
//! Deviazione Standard: 2.52 °C
//! Numero di rilevazioni: 3
//! ```

use std::fmt::Write;

use airlog_core::time::format_display;
use airlog_core::{Period, Quantity, QuantityStats, Summary};

use crate::snapshot::Snapshot;
use crate::ReportResult;

/// One block per quantity in `summary`
pub fn format_period(summary: &Summary, period: Period) -> Vec<String> {
    let total = summary.len();
    summary
        .iter()
        .enumerate()
        .map(|(i, (quantity, stats))| format_block(i + 1, total, period, *quantity, stats))
        .collect()
}

/// Block for a single quantity, `position` counted from 1
pub fn format_block(
    position: usize,
    total: usize,
    period: Period,
    quantity: Quantity,
    stats: &QuantityStats,
) -> String {
    let unit = quantity.unit();
    format!(
        "({position}/{total}) {label}\n\
         ---{name}---\n\
         Media: {mean:.2} {unit}\n\
         Moda: {mode:.2} {unit}\n\
         Massimo: {max:.2} {unit} ({max_at})\n\
         Minimo: {min:.2} {unit} ({min_at})\n\
         Deviazione Standard: {stdev:.2} {unit}\n\
         Numero di rilevazioni: {count}",
        label = period.label(),
        name = quantity.display_name(),
        mean = stats.mean,
        mode = stats.mode,
        max = stats.max.value(),
        max_at = format_display(stats.max.timestamp()),
        min = stats.min.value(),
        min_at = format_display(stats.min.timestamp()),
        stdev = stats.stdev,
        count = stats.item_count,
    )
}

/// Post listing the snapshot value of every catalog quantity
///
/// `latest` is the already formatted timestamp of the newest archive row.
pub fn format_current(latest: &str, snapshot: &Snapshot) -> ReportResult<String> {
    let mut out = format!("Dati Meteorologici:\nUltimo aggiornamento: {latest}\n--------------");
    for quantity in Quantity::ALL {
        let value = snapshot.require(quantity)?;
        // writing into a String cannot fail
        let _ = write!(out, "\n{}: {:.2} {}", quantity.display_name(), value, quantity.unit());
    }
    Ok(out)
}

/// Cut `post` to at most `max_chars` characters
pub fn truncate_post(post: &str, max_chars: usize) -> &str {
    match post.char_indices().nth(max_chars) {
        Some((end, _)) => &post[..end],
        None => post,
    }
}
