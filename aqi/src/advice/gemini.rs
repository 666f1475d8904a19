//! Advice from the Gemini language model.

use super::{AdviceContext, AdviceError, AdviceGenerator, Analysis};

impl From<advisor::Analysis> for Analysis {
    fn from(a: advisor::Analysis) -> Self {
        Analysis {
            health_advice: a.health_advice,
            precautions: a.precautions,
            impact_summary: a.impact_summary,
        }
    }
}

impl From<advisor::Error> for AdviceError {
    fn from(e: advisor::Error) -> Self {
        match e {
            advisor::Error::MissingApiKey => AdviceError::NotConfigured,
            advisor::Error::Http(e) if e.is_timeout() => AdviceError::TimedOut,
            advisor::Error::Decode(e) => AdviceError::Malformed(e.to_string()),
            e => AdviceError::Call(e.to_string()),
        }
    }
}

impl AdviceGenerator for advisor::Advisor {
    fn generate(&self, ctx: &AdviceContext) -> Result<Analysis, AdviceError> {
        let analysis = self.analyze(&ctx.prompt())?;
        Ok(analysis.into())
    }
}

/// Build an advice generator from settings.
///
/// Falls back to the [`NullAdviceGenerator`](super::NullAdviceGenerator)
/// when no API key is configured.
pub fn generator(
    settings: advisor::Settings,
) -> Result<Box<dyn AdviceGenerator + Send + Sync>, AdviceError> {
    match advisor::Advisor::new(settings) {
        Ok(a) => Ok(Box::new(a)),
        Err(advisor::Error::MissingApiKey) => Ok(Box::new(super::NullAdviceGenerator {})),
        Err(e) => Err(e.into()),
    }
}
