//! Wire format of the `generateContent` REST call.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Full URL of the `generateContent` method for a model.
pub(crate) fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

/// Schema the reply must conform to; mirrors [`crate::Analysis`].
fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "healthAdvice": { "type": "STRING" },
            "precautions": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "impactSummary": { "type": "STRING" }
        },
        "required": ["healthAdvice", "precautions", "impactSummary"]
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Request<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

impl<'a> Request<'a> {
    /// A single-turn request asking for JSON advice.
    pub fn new(prompt: &'a str) -> Self {
        Request {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: analysis_schema(),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

impl Response {
    /// Text of the first candidate, with its parts joined.
    /// None if there is no candidate or it carries no text.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body() {
        let body = serde_json::to_value(Request::new("how is the air?")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "how is the air?");
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            config["responseSchema"]["properties"]["precautions"]["items"]["type"],
            "STRING"
        );
        assert_eq!(
            config["responseSchema"]["required"],
            json!(["healthAdvice", "precautions", "impactSummary"])
        );
    }

    #[test]
    fn joins_parts() {
        let r: Response = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(r.text().as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn blank_text() {
        let r: Response =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#)
                .unwrap();
        assert_eq!(r.text(), None);

        let r: Response = serde_json::from_str(r#"{"candidates": [{}]}"#).unwrap();
        assert_eq!(r.text(), None);
    }

    #[test]
    fn url() {
        assert_eq!(
            generate_url("https://example.com/v1beta", "m"),
            "https://example.com/v1beta/models/m:generateContent"
        );
    }
}
