//! Gentle Message Types
//!
//! The core content types of Ember: generated messages, their categories,
//! and the cached quote of the day. These are plain data carriers shared by
//! the orchestrator, the persistence layer, and every surface.
//!
//! Serialized shapes are wire-compatible with the snapshots the original
//! web client wrote: the category field serializes as `type` with
//! snake_case values, and a missing author stays absent rather than null.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Categories of generated messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A short motivational quote
    Quote,
    /// A personal compliment
    Compliment,
    /// Celebration for a finished goal
    GoalCompletion,
    /// The quote of the day
    Daily,
}

impl MessageKind {
    /// Human-readable label for surfaces
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quote => "Quote",
            Self::Compliment => "Warmth",
            Self::GoalCompletion => "Celebration",
            Self::Daily => "Daily Light",
        }
    }
}

/// A generated (or fallback) message shown to the user
///
/// Messages are immutable once created and compared by their text when
/// saving or unsaving, so two messages with identical text are the same
/// favorite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GentleMessage {
    /// The message body
    pub text: String,
    /// Category this message was generated as
    #[serde(rename = "type")]
    pub kind: MessageKind,
    /// Attribution line, when the generator supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl GentleMessage {
    /// Create a message with no attribution
    pub fn new(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            kind,
            author: None,
        }
    }

    /// Attach an attribution line
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Quoted text plus attribution, the shape used for copy and share
    #[must_use]
    pub fn full_text(&self) -> String {
        match &self.author {
            Some(author) => format!("\"{}\" — {}", self.text, author),
            None => format!("\"{}\"", self.text),
        }
    }
}

/// Cached quote of the day
///
/// Valid only while `date` matches the current calendar date; a stale cache
/// is ignored and regenerated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyQuote {
    /// Calendar date the message was generated on
    pub date: NaiveDate,
    /// The cached message
    pub message: GentleMessage,
}

impl DailyQuote {
    /// Cache a message under today's date
    #[must_use]
    pub fn for_today(message: GentleMessage) -> Self {
        Self {
            date: Local::now().date_naive(),
            message,
        }
    }

    /// Whether the cache is still valid today
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_on(Local::now().date_naive())
    }

    /// Freshness check against an explicit date
    #[must_use]
    pub fn is_fresh_on(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_kind_serializes_snake_case() {
        let json = serde_json::to_string(&MessageKind::GoalCompletion).unwrap();
        assert_eq!(json, "\"goal_completion\"");
        let back: MessageKind = serde_json::from_str("\"quote\"").unwrap();
        assert_eq!(back, MessageKind::Quote);
    }

    #[test]
    fn test_message_wire_shape_matches_original_snapshots() {
        let message = GentleMessage::new("You are enough.", MessageKind::Quote)
            .with_author("Anonymous");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "You are enough.",
                "type": "quote",
                "author": "Anonymous",
            })
        );
    }

    #[test]
    fn test_author_absent_not_null() {
        let message = GentleMessage::new("Kind eyes.", MessageKind::Compliment);
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("author"));

        let parsed: GentleMessage =
            serde_json::from_str("{\"text\":\"Kind eyes.\",\"type\":\"compliment\"}").unwrap();
        assert_eq!(parsed.author, None);
    }

    #[test]
    fn test_full_text_includes_attribution() {
        let with_author =
            GentleMessage::new("Breathe.", MessageKind::Quote).with_author("Ember");
        assert_eq!(with_author.full_text(), "\"Breathe.\" — Ember");

        let without = GentleMessage::new("Breathe.", MessageKind::Compliment);
        assert_eq!(without.full_text(), "\"Breathe.\"");
    }

    #[test]
    fn test_daily_quote_freshness() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let quote = DailyQuote {
            date: today,
            message: GentleMessage::new("Still here.", MessageKind::Daily),
        };
        assert!(quote.is_fresh_on(today));
        assert!(!quote.is_fresh_on(today.succ_opt().unwrap()));
    }

    #[test]
    fn test_daily_quote_round_trips_iso_date() {
        let quote = DailyQuote {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            message: GentleMessage::new("Still here.", MessageKind::Daily),
        };
        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"2025-03-14\""));
        let back: DailyQuote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quote);
    }
}
