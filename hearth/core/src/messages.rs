//! Hearth Messages
//!
//! Messages sent from the Hearth to UI surfaces. These carry everything a
//! surface needs to render: the current message, goal and collection
//! snapshots, ambience state, and lifecycle notices.
//!
//! # Design Philosophy
//!
//! The Hearth never renders. It describes what is true right now and lets
//! each surface decide how to show it. Surfaces reply with
//! [`SurfaceEvent`](crate::events::SurfaceEvent)s.

use serde::{Deserialize, Serialize};

use crate::audio::AmbienceKind;
use crate::goals::DailyGoal;
use crate::message::GentleMessage;

/// Messages from Hearth to UI Surface
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum HearthMessage {
    // ============================================
    // Content
    // ============================================
    /// A message is ready to present
    MessageReady {
        /// The message to show
        message: GentleMessage,
    },

    // ============================================
    // State Snapshots
    // ============================================
    /// The Hearth moved to a new state
    State {
        /// Current state
        state: HearthState,
    },

    /// The goal board changed
    GoalsChanged {
        /// Every goal, in creation order
        goals: Vec<DailyGoal>,
    },

    /// The saved collection changed
    SavedChanged {
        /// Every saved message, oldest first
        saved: Vec<GentleMessage>,
    },

    /// The ambience selection changed
    AmbienceChanged {
        /// What is playing now; `None` means silence
        ambience: Option<AmbienceKind>,
    },

    // ============================================
    // Notices
    // ============================================
    /// Something the user should see, out of band
    Notify {
        /// Severity
        level: NotifyLevel,
        /// Notification text
        message: String,
    },

    // ============================================
    // Lifecycle
    // ============================================
    /// The Hearth is shutting down
    Quit {
        /// Parting words, if any
        farewell: Option<String>,
    },
}

/// Notification severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Something soft went wrong
    Warning,
    /// Something went wrong
    Error,
}

/// Hearth lifecycle states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HearthState {
    /// Loading snapshots, nothing presented yet
    Starting,
    /// Idle, ready for requests
    Ready,
    /// A generation is in flight
    Fetching,
    /// Persisting and saying goodbye
    ShuttingDown,
}

impl HearthState {
    /// Human-readable state description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Starting => "Waking the embers...",
            Self::Ready => "Ready",
            Self::Fetching => "Kindling a thought for you...",
            Self::ShuttingDown => "Banking the embers...",
        }
    }
}
