//! An Air Quality Index calculator.
//!
//! Maps seven pollutant concentrations onto the national AQI scale (0-500)
//! and classifies the result into one of six categories.
//!
//! The calculation itself ([`calculate_aqi`]) is pure: no I/O, no errors.
//! Around it sit presentation helpers ([`levels`], [`charts`], [`timestamp`])
//! and an advice boundary ([`advice`]) for an external, failure-prone
//! generator of health advice.
//!
//! # Features
//! - `gemini` (default): advice from the Gemini API, via the `advisor` crate.
//! - `cli` (default): the `aqi` command-line front end.
//! - `web`: WASM bindings for a browser front end. Needs `--no-default-features`,
//!   since neither `cli` nor `gemini` builds for `wasm32-unknown-unknown`.

pub mod advice;
pub mod breakpoints;
pub mod calculator;
pub mod charts;
#[cfg(feature = "cli")]
pub mod cli;
pub mod context;
pub mod levels;
pub mod timestamp;

#[cfg(feature = "web")]
pub mod web;

pub use breakpoints::{Pollutant, AQI_BREAKS};
pub use calculator::{calculate_aqi, sub_index, AqiResult, Category, PollutantData};
