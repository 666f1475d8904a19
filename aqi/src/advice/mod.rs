//! Health advice for an AQI reading.
//!
//! Advice comes from an external generator (a language model, in practice),
//! which may be unconfigured, fail, or be slow. [`advise`] never lets any of
//! that reach the caller: whatever goes wrong, it answers with the static
//! [`Analysis::fallback`].

use std::{sync::mpsc, sync::Arc, thread, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::breakpoints::Pollutant;
use crate::calculator::{AqiResult, Category, PollutantData};
use crate::context::Context;

#[cfg(feature = "gemini")]
pub mod gemini;

/// Health advice for a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub health_advice: String,
    /// Actionable steps, most important first.
    pub precautions: Vec<String>,
    /// One-sentence environmental summary.
    pub impact_summary: String,
}

impl Analysis {
    /// Generic advice, used when no generated advice is available.
    pub fn fallback(category: Category) -> Self {
        Analysis {
            health_advice:
                "Air quality is currently impacting health. Standard precautions are recommended."
                    .to_owned(),
            precautions: vec![
                "Wear a mask outdoors".to_owned(),
                "Keep windows closed".to_owned(),
                "Use an air purifier".to_owned(),
            ],
            impact_summary: format!(
                "Current AQI indicates {category} conditions at the reported location."
            ),
        }
    }

    /// Check that generated advice has something in every field.
    pub fn validate(&self) -> Result<(), AdviceError> {
        if self.health_advice.trim().is_empty() {
            return Err(AdviceError::Malformed("empty health advice".to_owned()));
        }
        if self.impact_summary.trim().is_empty() {
            return Err(AdviceError::Malformed("empty impact summary".to_owned()));
        }
        let n = self.precautions.len();
        if !(1..=6).contains(&n) {
            return Err(AdviceError::Malformed(format!("{n} precautions")));
        }
        if self.precautions.iter().any(|p| p.trim().is_empty()) {
            return Err(AdviceError::Malformed("empty precaution".to_owned()));
        }
        Ok(())
    }
}

/// Why generated advice is not available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdviceError {
    #[error("advice generation is not configured")]
    NotConfigured,
    #[error("advice generation failed: {0}")]
    Call(String),
    #[error("generated advice is malformed: {0}")]
    Malformed(String),
    #[error("advice generation timed out")]
    TimedOut,
    #[error("advice generation was cancelled")]
    Cancelled,
}

impl AdviceError {
    /// True if the failure is missing configuration, rather than a failed call.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AdviceError::NotConfigured)
    }
}

/// What an advice generator is told about a reading.
#[derive(Debug, Clone, Copy)]
pub struct AdviceContext<'a> {
    pub result: &'a AqiResult,
    pub data: &'a PollutantData,
}

impl<'a> AdviceContext<'a> {
    pub fn new(result: &'a AqiResult, data: &'a PollutantData) -> Self {
        AdviceContext { result, data }
    }

    /// Prompt describing the reading and the advice wanted.
    pub fn prompt(&self) -> String {
        let location = if self.data.location.trim().is_empty() {
            "Unknown"
        } else {
            self.data.location.trim()
        };
        let time = self.data.timestamp.as_deref().unwrap_or("Unknown");
        let levels: String = crate::charts::DISPLAY_ORDER
            .iter()
            .map(|&p| {
                let label = match p {
                    Pollutant::Nh3 => "NH3 (Ammonia)",
                    _ => p.name(),
                };
                format!("    {label}: {} {}\n", self.data.reading(p), p.unit())
            })
            .collect();

        format!(
            "
    As an environmental health expert specializing in Indian air quality standards, analyze this specific reading:

    CONTEXT:
    Location: {location}
    Reading Time: {time}
    Overall AQI: {aqi} ({category})
    Primary Pollutant: {main}

    POLLUTANT LEVELS:
{levels}
    Provide a professional analysis in JSON focusing on:
    1. healthAdvice: Specific advice (consider location/time if provided, e.g., traffic peak or morning fog).
    2. precautions: 3-4 actionable steps.
    3. impactSummary: 1-sentence environmental summary.
",
            aqi = self.result.aqi_value,
            category = self.result.category,
            main = self.result.main_pollutant,
        )
    }
}

/// A source of advice for AQI readings.
pub trait AdviceGenerator {
    /// Produce advice for the reading.
    ///
    /// May block, e.g. on network I/O.
    fn generate(&self, ctx: &AdviceContext) -> Result<Analysis, AdviceError>;
}

/// The nullary AdviceGenerator: is not configured, so never has advice.
pub struct NullAdviceGenerator {}

impl AdviceGenerator for NullAdviceGenerator {
    fn generate(&self, _ctx: &AdviceContext) -> Result<Analysis, AdviceError> {
        Err(AdviceError::NotConfigured)
    }
}

/// Fake advice generator: repeatedly provides the indicated analysis.
pub struct FakeAdviceGenerator {
    pub analysis: Analysis,
}

impl AdviceGenerator for FakeAdviceGenerator {
    fn generate(&self, _ctx: &AdviceContext) -> Result<Analysis, AdviceError> {
        Ok(self.analysis.clone())
    }
}

/// Where an [`Advice`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceSource {
    Generated,
    Fallback(AdviceError),
}

/// Advice for a reading, generated or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advice {
    pub analysis: Analysis,
    pub source: AdviceSource,
}

impl Advice {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, AdviceSource::Fallback(_))
    }
}

/// How often a waiting caller re-checks its context.
const POLL: Duration = Duration::from_millis(50);

/// Get advice for a reading, falling back to generic advice on any failure.
///
/// The generator runs on its own thread; this returns once it answers, or
/// once `ctx` is cancelled or past its deadline, whichever is first. A
/// generator that answers late is left to finish, and its answer dropped.
pub fn advise<G>(
    generator: Arc<G>,
    result: &AqiResult,
    data: &PollutantData,
    ctx: &Context,
) -> Advice
where
    G: AdviceGenerator + Send + Sync + ?Sized + 'static,
{
    match run(generator, result, data, ctx) {
        Ok(analysis) => Advice {
            analysis,
            source: AdviceSource::Generated,
        },
        Err(e) => {
            if e.is_configuration() {
                tracing::info!("using fallback advice: {}", e);
            } else {
                tracing::warn!("using fallback advice: {}", e);
            }
            Advice {
                analysis: Analysis::fallback(result.category),
                source: AdviceSource::Fallback(e),
            }
        }
    }
}

fn run<G>(
    generator: Arc<G>,
    result: &AqiResult,
    data: &PollutantData,
    ctx: &Context,
) -> Result<Analysis, AdviceError>
where
    G: AdviceGenerator + Send + Sync + ?Sized + 'static,
{
    if ctx.is_done() {
        return Err(done_error(ctx));
    }

    let (tx, rx) = mpsc::channel();
    {
        let result = result.clone();
        let data = data.clone();
        thread::Builder::new()
            .name("advice".to_owned())
            .spawn(move || {
                let analysis = generator.generate(&AdviceContext::new(&result, &data));
                // The receiver may have given up.
                let _ = tx.send(analysis);
            })
            .map_err(|e| AdviceError::Call(format!("could not start advice thread: {e}")))?;
    }

    loop {
        // Wake at the deadline rather than up to one poll past it.
        let wait = ctx.remaining().map_or(POLL, |left| left.min(POLL));
        match rx.recv_timeout(wait) {
            Ok(analysis) => {
                let analysis = analysis?;
                analysis.validate()?;
                return Ok(analysis);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if ctx.is_done() {
                    return Err(done_error(ctx));
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(AdviceError::Call("advice thread panicked".to_owned()));
            }
        }
    }
}

fn done_error(ctx: &Context) -> AdviceError {
    if ctx.is_cancelled() {
        AdviceError::Cancelled
    } else {
        AdviceError::TimedOut
    }
}
