//! Saved Message Collection
//!
//! The user's sanctuary: messages kept for later. Membership is decided by
//! text equality, saves append at the end, and search runs a
//! case-insensitive substring match over text and author.

use serde::{Deserialize, Serialize};

use crate::message::GentleMessage;

/// What a toggle did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The message was added to the collection
    Saved,
    /// The message was removed from the collection
    Removed,
}

/// Ordered, text-deduplicated collection of kept messages
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SavedMessages {
    messages: Vec<GentleMessage>,
}

impl SavedMessages {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the collection from a persisted snapshot
    #[must_use]
    pub fn from_snapshot(messages: Vec<GentleMessage>) -> Self {
        Self { messages }
    }

    /// Save the message if absent, remove it if present
    pub fn toggle(&mut self, message: GentleMessage) -> SaveOutcome {
        if self.is_saved(&message.text) {
            self.messages.retain(|kept| kept.text != message.text);
            SaveOutcome::Removed
        } else {
            self.messages.push(message);
            SaveOutcome::Saved
        }
    }

    /// Whether a message with this text is in the collection
    #[must_use]
    pub fn is_saved(&self, text: &str) -> bool {
        self.messages.iter().any(|kept| kept.text == text)
    }

    /// Messages whose text or author contains the query, case-insensitively
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&GentleMessage> {
        let needle = query.to_lowercase();
        self.messages
            .iter()
            .filter(|kept| {
                kept.text.to_lowercase().contains(&needle)
                    || kept
                        .author
                        .as_ref()
                        .is_some_and(|author| author.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// All kept messages in save order
    pub fn all(&self) -> impl Iterator<Item = &GentleMessage> {
        self.messages.iter()
    }

    /// Number of kept messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Clone the collection, for messages and persistence
    #[must_use]
    pub fn snapshot(&self) -> Vec<GentleMessage> {
        self.messages.clone()
    }
}
