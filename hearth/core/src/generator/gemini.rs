//! Gemini Generator Implementation
//!
//! Generator backed by Google's generative-language REST API.
//!
//! # API shape
//!
//! One POST per message to
//! `/v1beta/models/{model}:generateContent?key={api_key}` with the prompt
//! as a single content part and a JSON response schema asking for
//! `{ text, author }`. Models sometimes wrap the JSON in markdown fences
//! anyway, so the reply is de-fenced before parsing.

use std::time::Duration;

use async_trait::async_trait;

use super::traits::{GeneratorError, GeneratorRequest, MessageGenerator};
use crate::message::{GentleMessage, MessageKind};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini API client
#[derive(Clone)]
pub struct GeminiGenerator {
    /// API key, absent when unconfigured
    api_key: Option<String>,
    /// Model identifier
    model: String,
    /// API origin, overridable for tests
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl GeminiGenerator {
    /// Create a new Gemini generator
    ///
    /// A missing key is not an error here; every `generate` call will
    /// report [`GeneratorError::MissingCredential`] instead, and the
    /// Hearth falls back locally.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create from the `GEMINI_API_KEY` environment variable
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var("GEMINI_API_KEY").ok())
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API origin
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether a key is configured
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body(request: &GeneratorRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "parts": [{ "text": request.prompt() }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING" },
                        "author": { "type": "STRING" }
                    },
                    "required": ["text"]
                }
            }
        })
    }
}

#[async_trait]
impl MessageGenerator for GeminiGenerator {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, request: &GeneratorRequest) -> Result<GentleMessage, GeneratorError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GeneratorError::MissingCredential)?;

        let response = self
            .http_client
            .post(self.generate_url())
            .query(&[("key", api_key)])
            .json(&Self::request_body(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api { status, body });
        }

        let data: serde_json::Value = response.json().await?;
        parse_reply(request.kind, &data)
    }
}

/// Extract a message from the API's response envelope
fn parse_reply(
    kind: MessageKind,
    data: &serde_json::Value,
) -> Result<GentleMessage, GeneratorError> {
    let raw: String = data["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect()
        })
        .unwrap_or_default();

    if raw.trim().is_empty() {
        return Err(GeneratorError::EmptyReply);
    }

    let clean = strip_fences(&raw);
    let reply: serde_json::Value = serde_json::from_str(&clean)
        .map_err(|err| GeneratorError::MalformedReply(err.to_string()))?;

    let text = reply
        .get("text")
        .and_then(|text| text.as_str())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| GeneratorError::MalformedReply("reply has no text".to_string()))?;

    let author = reply
        .get("author")
        .and_then(|author| author.as_str())
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .map(String::from)
        .or_else(|| default_author(kind));

    let mut message = GentleMessage::new(text, kind);
    if let Some(author) = author {
        message = message.with_author(author);
    }
    Ok(message)
}

/// Unattributed quotes get a house byline; personal messages stay bare
fn default_author(kind: MessageKind) -> Option<String> {
    match kind {
        MessageKind::Quote | MessageKind::Daily => Some("Anonymous".to_string()),
        MessageKind::Compliment | MessageKind::GoalCompletion => None,
    }
}

/// Drop markdown code fences some models wrap JSON replies in
fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}
