//! Per-quantity summary statistics
//!
//! [`Aggregator`] consumes readings in a single pass and keeps, per quantity:
//! the max and min readings (with their timestamps), the rounded values, and
//! the same values truncated toward zero. [`Aggregator::finish`] then derives:
//!
//! - `mean`: arithmetic mean of the rounded values
//! - `mode`: arithmetic mean of the *truncated* values. This is a coarse
//!   integer-resolution mean, not the most frequent value:
//!   `[1.9, 1.9, 2.9]` truncates to `[1, 1, 2]` and gives `1.333…`
//! - `stdev`: sample standard deviation (n − 1 denominator)
//! - `item_count`: readings seen for the quantity
//!
//! ## Max/min update rule
//!
//! The first reading of a quantity seeds both max and min. After that a
//! reading replaces max when strictly greater, *otherwise* replaces min when
//! strictly smaller. Ties never replace, so on equal values the earliest
//! reading keeps both slots.

use std::collections::BTreeMap;

use log::warn;

use crate::catalog::Quantity;
use crate::errors::{ArchiveError, ArchiveResult};
use crate::reading::Reading;

/// Readings needed for a sample standard deviation
pub const MIN_SAMPLES_FOR_STDEV: usize = 2;

/// Summary of one quantity over a query
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityStats {
    /// Highest reading; the earliest one on ties
    pub max: Reading,
    /// Lowest reading; the earliest one on ties
    pub min: Reading,
    /// Readings folded in
    pub item_count: usize,
    /// Mean of the rounded values
    pub mean: f64,
    /// Mean of the values truncated toward zero
    pub mode: f64,
    /// Sample standard deviation
    pub stdev: f64,
}

/// Statistics keyed by quantity, in catalog order
pub type Summary = BTreeMap<Quantity, QuantityStats>;

/// Result of [`Aggregator::finish_lenient`]
#[derive(Debug, Default)]
pub struct LenientSummary {
    /// Quantities with enough samples
    pub summary: Summary,
    /// Quantities left out, with the reason
    pub rejected: Vec<(Quantity, ArchiveError)>,
}

#[derive(Debug)]
struct Accumulator {
    max: Reading,
    min: Reading,
    values: Vec<f64>,
    truncated: Vec<f64>,
}

impl Accumulator {
    fn seed(reading: &Reading) -> Self {
        Self {
            max: *reading,
            min: *reading,
            values: Vec::new(),
            truncated: Vec::new(),
        }
    }

    fn push(&mut self, reading: &Reading) {
        let value = reading.value();
        if value > self.max.value() {
            self.max = *reading;
        } else if value < self.min.value() {
            self.min = *reading;
        }
        self.values.push(value);
        self.truncated.push(value.trunc());
    }

    fn finish(self, quantity: Quantity) -> ArchiveResult<QuantityStats> {
        let stdev = sample_stdev(&self.values).ok_or(ArchiveError::InsufficientSamples {
            quantity,
            required: MIN_SAMPLES_FOR_STDEV,
            available: self.values.len(),
        })?;
        let mean = mean(&self.values).unwrap_or(f64::NAN);
        let mode = truncated_mean(&self.truncated).unwrap_or(f64::NAN);

        Ok(QuantityStats {
            max: self.max,
            min: self.min,
            item_count: self.values.len(),
            mean,
            mode,
            stdev,
        })
    }
}

/// Single-pass reducer from readings to per-quantity statistics
#[derive(Debug, Default)]
pub struct Aggregator {
    state: BTreeMap<Quantity, Accumulator>,
}

impl Aggregator {
    /// Empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one reading into its quantity's running state
    pub fn push(&mut self, reading: &Reading) {
        self.state
            .entry(reading.quantity())
            .or_insert_with(|| Accumulator::seed(reading))
            .push(reading);
    }

    /// Readings folded so far for `quantity`
    pub fn count(&self, quantity: Quantity) -> usize {
        self.state.get(&quantity).map_or(0, |acc| acc.values.len())
    }

    /// Statistics for every quantity seen
    ///
    /// Fails with [`ArchiveError::InsufficientSamples`] if any quantity has
    /// fewer than two readings.
    pub fn finish(self) -> ArchiveResult<Summary> {
        self.state
            .into_iter()
            .map(|(quantity, acc)| acc.finish(quantity).map(|stats| (quantity, stats)))
            .collect()
    }

    /// Statistics for every quantity that has enough readings
    ///
    /// Quantities failing a precondition are returned in `rejected` instead
    /// of failing the whole summary.
    pub fn finish_lenient(self) -> LenientSummary {
        let mut out = LenientSummary::default();
        for (quantity, acc) in self.state {
            match acc.finish(quantity) {
                Ok(stats) => {
                    out.summary.insert(quantity, stats);
                }
                Err(e) => {
                    warn!("leaving {} out of summary: {}", quantity, e);
                    out.rejected.push((quantity, e));
                }
            }
        }
        out
    }
}

impl<'a> Extend<&'a Reading> for Aggregator {
    fn extend<I: IntoIterator<Item = &'a Reading>>(&mut self, iter: I) {
        for reading in iter {
            self.push(reading);
        }
    }
}

/// Aggregate `readings` in one pass; strict on sample counts
pub fn aggregate<'a, I>(readings: I) -> ArchiveResult<Summary>
where
    I: IntoIterator<Item = &'a Reading>,
{
    let mut aggregator = Aggregator::new();
    aggregator.extend(readings);
    aggregator.finish()
}

/// Arithmetic mean; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of values truncated toward zero
///
/// Truncation stays in `f64` so magnitudes beyond `i64` do not saturate.
pub fn truncated_mean(values: &[f64]) -> Option<f64> {
    mean(values)
}

/// Sample standard deviation; `None` below two values
pub fn sample_stdev(values: &[f64]) -> Option<f64> {
    if values.len() < MIN_SAMPLES_FOR_STDEV {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}
