//! Timestamped readings
//!
//! A [`Reading`] is rounded to its quantity's precision when it is built. The
//! raw value is not kept, so every statistic downstream sees the rounded one.

use chrono::NaiveDateTime;

use crate::catalog::Quantity;

/// One precision-rounded measurement of a single quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    value: f64,
    quantity: Quantity,
    timestamp: NaiveDateTime,
}

impl Reading {
    /// Build a reading, rounding `raw` to `quantity.precision()` decimals
    pub fn new(raw: f64, quantity: Quantity, timestamp: NaiveDateTime) -> Self {
        Self {
            value: round_to(raw, quantity.precision()),
            quantity,
            timestamp,
        }
    }

    /// Rounded value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Measured quantity
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Local time of the measurement
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Round to `decimals` places, ties to even on the scaled value
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}
