//! Generator Traits
//!
//! Trait definitions for message generators. This abstraction lets the
//! Hearth work with different providers (Gemini today, others later)
//! without changing orchestration logic, and lets tests swap in canned or
//! failing generators.
//!
//! Whatever the generator does, the Hearth always has the local fallback to
//! present, so no failure here ever reaches the user as an error.

use async_trait::async_trait;
use thiserror::Error;

use crate::message::{GentleMessage, MessageKind};

/// Error when generation fails
///
/// Every variant collapses to the same user experience: the fallback
/// message plus a soft notice. The distinctions exist for logs.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// No API key was configured
    #[error("No API key configured")]
    MissingCredential,
    /// The HTTP request itself failed
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The API answered with a non-success status
    #[error("Generator returned {status}: {body}")]
    Api {
        /// HTTP status code
        status: reqwest::StatusCode,
        /// Response body, for logs
        body: String,
    },
    /// The reply arrived but could not be understood
    #[error("Malformed generator reply: {0}")]
    MalformedReply(String),
    /// The reply carried no text at all
    #[error("Generator reply was empty")]
    EmptyReply,
}

/// Parameters for one generation call
#[derive(Clone, Debug)]
pub struct GeneratorRequest {
    /// Which category of message to generate
    pub kind: MessageKind,
    /// The finished goal's text, for goal completions
    pub goal_context: Option<String>,
    /// Imagery woven into the daily prompt
    pub theme: Option<String>,
}

impl GeneratorRequest {
    /// Create a request for the given kind
    #[must_use]
    pub fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            goal_context: None,
            theme: None,
        }
    }

    /// Set the finished goal's text
    #[must_use]
    pub fn with_goal_context(mut self, context: impl Into<String>) -> Self {
        self.goal_context = Some(context.into());
        self
    }

    /// Set the daily theme
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Build the prompt text for this request
    #[must_use]
    pub fn prompt(&self) -> String {
        match self.kind {
            MessageKind::Quote => {
                "Generate a short, unique, and deeply gentle motivational quote. \
                 It should feel like a warm hug and avoid generic clichés. \
                 Focus on themes of peace, resilience, or self-compassion. \
                 Maximum 20 words."
                    .to_string()
            }
            MessageKind::Compliment => {
                "Generate a short, natural, and sincere compliment for a user. \
                 It should feel personal and warm, focusing on their inner light, \
                 presence, or kindness. Maximum 15 words."
                    .to_string()
            }
            MessageKind::GoalCompletion => {
                let context = self.goal_context.as_deref().unwrap_or("their daily focus");
                format!(
                    "Encourage a user who finished: \"{context}\". \
                     Sincere, soft celebratory tone. Maximum 15 words."
                )
            }
            MessageKind::Daily => match self.theme.as_deref() {
                Some(theme) => format!(
                    "Generate a profound, poetic 'Quote of the Day' inspired by {theme}. \
                     Unique and centering. Maximum 25 words."
                ),
                None => "Generate a profound, poetic 'Quote of the Day'. \
                         Unique and centering. Maximum 25 words."
                    .to_string(),
            },
        }
    }
}

/// Message generator trait
///
/// Implement this trait to add support for different providers.
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Get the generator name (e.g., "Gemini")
    fn name(&self) -> &str;

    /// Generate one message for the request
    async fn generate(&self, request: &GeneratorRequest) -> Result<GentleMessage, GeneratorError>;
}

/// The locally stored message used when generation fails
#[must_use]
pub fn fallback_message() -> GentleMessage {
    GentleMessage::new(
        "The stars are quiet today, but they are still there. Take a gentle breath.",
        MessageKind::Quote,
    )
    .with_author("Ember")
}
