//! Client for the Gemini text-generation service, used to turn an air quality reading into health
//! advice.
//!
//! The service is asked for JSON matching a fixed schema (see [`Analysis`]);
//! the request is blocking and bounded by [`Settings::timeout`].

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

mod wire;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Base URL of the REST API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// An error in getting advice from the service.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no API key configured for the advice service")]
    MissingApiKey,
    #[error("in request to advice service: {0}")]
    Http(#[from] reqwest::Error),
    #[error("advice service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("advice service returned no text")]
    EmptyResponse,
    #[error("in decoding advice: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Settings when starting to use the advice service.
#[non_exhaustive]
#[derive(Clone)]
pub struct Settings {
    /// API key; required.
    pub api_key: Option<String>,
    /// Model name, e.g. "gemini-3-flash-preview".
    pub model: String,
    /// Base URL, without a trailing `/models`.
    pub endpoint: String,
    /// Upper bound on the whole HTTP exchange.
    /// Defaults to 30 seconds.
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Settings {
    /// Default settings, with the API key taken from the environment.
    pub fn from_env() -> Self {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|k| !k.trim().is_empty());
        Self {
            api_key,
            ..Default::default()
        }
    }
}

impl core::fmt::Debug for Settings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Advice for a single reading, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Specific advice for the reading.
    pub health_advice: String,
    /// Actionable steps; the prompt asks for 3-4.
    pub precautions: Vec<String>,
    /// One-sentence environmental summary.
    pub impact_summary: String,
}

impl core::fmt::Display for Analysis {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        writeln!(f, "{}", self.health_advice)?;
        for (i, p) in self.precautions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, p)?;
        }
        write!(f, "{}", self.impact_summary)
    }
}

/// Handle to the advice service.
pub struct Advisor {
    http: reqwest::blocking::Client,
    url: String,
    api_key: String,
}

impl Advisor {
    /// Prepare a client with the given settings.
    ///
    /// Fails with [`Error::MissingApiKey`] if no (non-blank) key is set;
    /// does not contact the service.
    pub fn new(settings: Settings) -> Result<Self, Error> {
        let api_key = settings
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::MissingApiKey)?;
        let http = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        let url = wire::generate_url(&settings.endpoint, &settings.model);
        Ok(Advisor { http, url, api_key })
    }

    /// URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send the prompt and decode the structured reply.
    pub fn analyze(&self, prompt: &str) -> Result<Analysis, Error> {
        let request = wire::Request::new(prompt);
        tracing::debug!("requesting advice from {}", self.url);
        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        decode(&body)
    }
}

/// Decode a `generateContent` response body into an [`Analysis`].
pub fn decode(body: &str) -> Result<Analysis, Error> {
    let response: wire::Response = serde_json::from_str(body)?;
    let text = response.text().ok_or(Error::EmptyResponse)?;
    Ok(serde_json::from_str(&text)?)
}
