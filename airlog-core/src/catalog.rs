//! Quantity Catalog
//!
//! Fixed registry of the environmental quantities the station records. Each
//! quantity carries its short symbol, physical unit, storage file name inside
//! a day directory, display name, and the number of decimals readings are
//! rounded to.
//!
//! | Symbol | Unit  | File            | Display name                 | Decimals |
//! |--------|-------|-----------------|------------------------------|----------|
//! | T      | °C    | temperature.csv | Temperatura                  | 2        |
//! | H      | %     | humidity.csv    | Umidità                      | 2        |
//! | P      | hPa   | pressure.csv    | Pressione                    | 2        |
//! | PM10   | µg/m³ | pm10.csv        | PM10                         | 2        |
//! | PM25   | µg/m³ | pm25.csv        | PM2,5                        | 2        |
//! | S      | µg/m³ | smoke.csv       | Fumo e vapori infiammabili   | 2        |
//!
//! The catalog is compiled in. There is no registration API, and every field
//! is a `const fn` so matches over [`Quantity`] stay exhaustive.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ArchiveError;

/// Measured environmental quantity
///
/// Ordering follows catalog order, which is also the order reports list
/// quantities in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// Air temperature
    #[serde(rename = "T")]
    Temperature,
    /// Relative humidity
    #[serde(rename = "H")]
    Humidity,
    /// Barometric pressure
    #[serde(rename = "P")]
    Pressure,
    /// Particulate matter below 10 µm
    #[serde(rename = "PM10")]
    Pm10,
    /// Particulate matter below 2.5 µm
    #[serde(rename = "PM25")]
    Pm25,
    /// Smoke and flammable vapours
    #[serde(rename = "S")]
    Smoke,
}

impl Quantity {
    /// Every catalog entry, in catalog order
    pub const ALL: [Quantity; 6] = [
        Quantity::Temperature,
        Quantity::Humidity,
        Quantity::Pressure,
        Quantity::Pm10,
        Quantity::Pm25,
        Quantity::Smoke,
    ];

    /// Short symbol used as the key in snapshots and summaries
    pub const fn symbol(&self) -> &'static str {
        match self {
            Quantity::Temperature => "T",
            Quantity::Humidity => "H",
            Quantity::Pressure => "P",
            Quantity::Pm10 => "PM10",
            Quantity::Pm25 => "PM25",
            Quantity::Smoke => "S",
        }
    }

    /// Unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            Quantity::Temperature => "°C",
            Quantity::Humidity => "%",
            Quantity::Pressure => "hPa",
            Quantity::Pm10 | Quantity::Pm25 | Quantity::Smoke => "µg/m³",
        }
    }

    /// CSV file name inside a `YYYY/MM/DD` directory
    pub const fn storage_file(&self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature.csv",
            Quantity::Humidity => "humidity.csv",
            Quantity::Pressure => "pressure.csv",
            Quantity::Pm10 => "pm10.csv",
            Quantity::Pm25 => "pm25.csv",
            Quantity::Smoke => "smoke.csv",
        }
    }

    /// Human-readable name used in reports
    pub const fn display_name(&self) -> &'static str {
        match self {
            Quantity::Temperature => "Temperatura",
            Quantity::Humidity => "Umidità",
            Quantity::Pressure => "Pressione",
            Quantity::Pm10 => "PM10",
            Quantity::Pm25 => "PM2,5",
            Quantity::Smoke => "Fumo e vapori infiammabili",
        }
    }

    /// Decimal places readings are rounded to
    pub const fn precision(&self) -> u32 {
        match self {
            Quantity::Temperature
            | Quantity::Humidity
            | Quantity::Pressure
            | Quantity::Pm10
            | Quantity::Pm25
            | Quantity::Smoke => 2,
        }
    }

    /// Look up by symbol (`"T"`, `"PM25"`, ...)
    pub fn from_symbol(symbol: &str) -> Option<Quantity> {
        Self::ALL.into_iter().find(|q| q.symbol() == symbol)
    }

    /// Look up by unit
    ///
    /// Units are shared between quantities (all particulate channels use
    /// µg/m³); the first catalog entry with the unit wins.
    pub fn from_unit(unit: &str) -> Option<Quantity> {
        Self::ALL.into_iter().find(|q| q.unit() == unit)
    }

    /// Look up by storage file name (`"humidity.csv"`)
    pub fn from_storage_file(file_name: &str) -> Option<Quantity> {
        Self::ALL.into_iter().find(|q| q.storage_file() == file_name)
    }

    /// Look up by display name (`"Pressione"`)
    pub fn from_display_name(name: &str) -> Option<Quantity> {
        Self::ALL.into_iter().find(|q| q.display_name() == name)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Quantity {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::from_symbol(s).ok_or_else(|| ArchiveError::UnknownQuantity(s.to_string()))
    }
}
