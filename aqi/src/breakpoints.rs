//! Breakpoint tables for the national AQI.
//!
//! Each pollutant has seven concentration breakpoints, which map onto the
//! seven breakpoints of the (shared) AQI scale; between breakpoints the
//! sub-index is interpolated linearly.

use serde::{Deserialize, Serialize};

/// The AQI axis, shared by every pollutant.
pub const AQI_BREAKS: [f64; 7] = [0.0, 50.0, 100.0, 200.0, 300.0, 400.0, 500.0];

/// A measured pollutant.
///
/// Variants are declared in evaluation order; ties between sub-indices
/// resolve to the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "NH3")]
    Nh3,
}

impl Pollutant {
    /// All pollutants, in evaluation order.
    pub const ALL: [Pollutant; 7] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
        Pollutant::Nh3,
    ];

    /// Concentration breakpoints, in the pollutant's unit.
    pub fn breakpoints(self) -> &'static [f64; 7] {
        match self {
            Pollutant::Pm25 => &[0.0, 30.0, 60.0, 90.0, 120.0, 250.0, 380.0],
            Pollutant::Pm10 => &[0.0, 50.0, 100.0, 250.0, 350.0, 430.0, 500.0],
            Pollutant::No2 => &[0.0, 40.0, 80.0, 180.0, 280.0, 400.0, 500.0],
            Pollutant::So2 => &[0.0, 40.0, 80.0, 380.0, 800.0, 1600.0, 2000.0],
            Pollutant::Co => &[0.0, 1.0, 2.0, 10.0, 17.0, 34.0, 50.0],
            Pollutant::O3 => &[0.0, 50.0, 100.0, 168.0, 208.0, 748.0, 1000.0],
            Pollutant::Nh3 => &[0.0, 200.0, 400.0, 800.0, 1200.0, 1800.0, 2500.0],
        }
    }

    /// Display name, e.g. "PM2.5".
    pub const fn name(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
            Pollutant::Nh3 => "NH3",
        }
    }

    /// Concentration unit. CO is measured in mg/m³, the rest in µg/m³.
    pub const fn unit(self) -> &'static str {
        match self {
            Pollutant::Co => "mg/m³",
            _ => "µg/m³",
        }
    }

    /// Largest concentration accepted from input forms.
    pub const fn input_max(self) -> f64 {
        match self {
            Pollutant::Pm25 => 500.0,
            Pollutant::Pm10 => 600.0,
            Pollutant::No2 => 500.0,
            Pollutant::So2 => 1000.0,
            Pollutant::Co => 50.0,
            Pollutant::O3 => 1000.0,
            Pollutant::Nh3 => 2500.0,
        }
    }

    /// CPCB 24-hour safety limit, in the pollutant's unit.
    pub const fn safety_limit(self) -> f64 {
        match self {
            Pollutant::Pm25 => 60.0,
            Pollutant::Pm10 => 100.0,
            Pollutant::No2 => 80.0,
            Pollutant::So2 => 80.0,
            Pollutant::Co => 2.0,
            Pollutant::O3 => 100.0,
            Pollutant::Nh3 => 400.0,
        }
    }
}

impl core::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized pollutant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pollutant: {0:?}")]
pub struct UnknownPollutant(pub String);

impl core::str::FromStr for Pollutant {
    type Err = UnknownPollutant;

    /// Accepts the display name ("PM2.5") or the field name ("pm25"), in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('.', "");
        Pollutant::ALL
            .into_iter()
            .find(|p| p.name().to_ascii_lowercase().replace('.', "") == wanted)
            .ok_or_else(|| UnknownPollutant(s.to_owned()))
    }
}
