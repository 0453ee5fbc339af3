//! Current-reading snapshot and free-text station report
//!
//! Both files are produced by the ingestion side and only read here:
//!
//! ```json
//! {"T": 21.37, "H": 54.2, "P": 1012.8, "PM10": 11.0, "PM25": 6.4, "S": 0.9}
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use airlog_core::Quantity;
use log::debug;

use crate::{ReportError, ReportResult};

/// Latest raw value per quantity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    values: BTreeMap<Quantity, f64>,
}

impl Snapshot {
    /// Parse a snapshot object; keys that are not catalog symbols are ignored
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, f64> = serde_json::from_str(text)?;
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            match Quantity::from_symbol(&key) {
                Some(quantity) => {
                    values.insert(quantity, value);
                }
                None => debug!("ignoring snapshot key {:?}", key),
            }
        }
        Ok(Self { values })
    }

    pub fn load(path: &Path) -> ReportResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        Self::from_json(&text).map_err(|e| ReportError::json(path, e))
    }

    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        self.values.get(&quantity).copied()
    }

    /// Value for `quantity`, or [`ReportError::MissingQuantity`]
    pub fn require(&self, quantity: Quantity) -> ReportResult<f64> {
        self.get(quantity).ok_or(ReportError::MissingQuantity(quantity))
    }

    pub fn insert(&mut self, quantity: Quantity, value: f64) {
        self.values.insert(quantity, value);
    }
}

/// Read the pre-written hardware status report
pub fn load_hardware_report(path: &Path) -> ReportResult<String> {
    fs::read_to_string(path).map_err(|e| ReportError::io(path, e))
}
