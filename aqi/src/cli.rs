//! Command-line arguments of the `aqi` binary.

use std::{
    io::Read,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use thiserror::Error;

use crate::breakpoints::Pollutant;
use crate::calculator::PollutantData;

#[derive(Parser, Debug)]
#[command(name = "aqi", version, about = "Compute the Air Quality Index of a reading")]
pub struct Cli {
    /// Read the reading from a JSON file ("-" for stdin); flags override its fields.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// PM2.5, µg/m³
    #[arg(long)]
    pub pm25: Option<f64>,
    /// PM10, µg/m³
    #[arg(long)]
    pub pm10: Option<f64>,
    /// Nitrogen dioxide, µg/m³
    #[arg(long)]
    pub no2: Option<f64>,
    /// Ammonia, µg/m³
    #[arg(long)]
    pub nh3: Option<f64>,
    /// Sulphur dioxide, µg/m³
    #[arg(long)]
    pub so2: Option<f64>,
    /// Carbon monoxide, mg/m³
    #[arg(long)]
    pub co: Option<f64>,
    /// Ozone, µg/m³
    #[arg(long)]
    pub o3: Option<f64>,

    /// Where the reading was taken.
    #[arg(long)]
    pub location: Option<String>,
    /// Local time of the reading, YYYY-MM-DDTHH:MM; defaults to now.
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Output machine-readable JSON.
    #[arg(long)]
    pub json: bool,
    /// Include chart data.
    #[arg(long)]
    pub charts: bool,

    /// Ask the advice service for health advice.
    #[arg(long)]
    pub advice: bool,
    /// API key for the advice service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Model used for advice.
    #[arg(long, default_value = "gemini-3-flash-preview")]
    pub model: String,
    /// Seconds to wait for advice before falling back.
    #[arg(long = "advice-timeout", value_name = "SECS", default_value_t = 30)]
    pub advice_timeout_secs: u64,
}

/// Problems with the reading given on the command line.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid reading in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

impl Cli {
    pub fn advice_timeout(&self) -> Duration {
        Duration::from_secs(self.advice_timeout_secs)
    }

    /// Assemble the reading: the input file (if any), overridden by flags.
    ///
    /// Not clamped; see [`PollutantData::clamped`].
    pub fn reading(&self) -> Result<PollutantData, InputError> {
        let mut data = match &self.input {
            Some(path) => load(path)?,
            None => PollutantData::default(),
        };

        let flags = [
            (Pollutant::Pm25, self.pm25),
            (Pollutant::Pm10, self.pm10),
            (Pollutant::No2, self.no2),
            (Pollutant::Nh3, self.nh3),
            (Pollutant::So2, self.so2),
            (Pollutant::Co, self.co),
            (Pollutant::O3, self.o3),
        ];
        for (p, v) in flags {
            if let Some(v) = v {
                *data.reading_mut(p) = v;
            }
        }
        if let Some(location) = &self.location {
            data.location = location.clone();
        }
        if let Some(timestamp) = &self.timestamp {
            data.timestamp = Some(timestamp.clone());
        }
        Ok(data)
    }
}

fn load(path: &Path) -> Result<PollutantData, InputError> {
    let name = path.display().to_string();
    let mut text = String::new();
    let read = if name == "-" {
        std::io::stdin().read_to_string(&mut text).map(|_| ())
    } else {
        std::fs::read_to_string(path).map(|t| text = t)
    };
    read.map_err(|source| InputError::Read {
        path: name.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| InputError::Parse { path: name, source })
}
