//! Surface Events
//!
//! Events sent from UI surfaces to the Hearth. These represent all the ways
//! a UI can communicate user actions to the orchestration layer.
//!
//! # Design Philosophy
//!
//! Surfaces are "dumb" renderers that forward user actions to the Hearth.
//! They don't interpret what actions mean - they just report what happened.
//! The Hearth decides how to respond.

use serde::{Deserialize, Serialize};

use crate::audio::AmbienceKind;
use crate::goals::GoalId;
use crate::message::GentleMessage;

/// Events from UI Surface to Hearth
///
/// These events tell the Hearth what the user asked for. The Hearth
/// responds with HearthMessages.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SurfaceEvent {
    // ============================================
    // Message Events
    // ============================================
    /// User asked for a fresh quote or compliment
    MessageRequested,

    /// User asked for the quote of the day
    DailyRequested,

    // ============================================
    // Goal Events
    // ============================================
    /// User created a daily focus
    GoalCreated {
        /// What the focus is
        text: String,
        /// How many steps it takes
        total_steps: u32,
    },

    /// User moved a focus to an absolute step
    GoalStepSet {
        /// Which focus
        id: GoalId,
        /// The step it is now on
        step: u32,
    },

    /// User removed a focus
    GoalRemoved {
        /// Which focus
        id: GoalId,
    },

    // ============================================
    // Collection Events
    // ============================================
    /// User saved or unsaved a message
    SaveToggled {
        /// The message in question
        message: GentleMessage,
    },

    // ============================================
    // Ambience Events
    // ============================================
    /// User picked an ambience bed, or silence
    AmbienceSelected {
        /// The chosen bed; `None` means silence
        ambience: Option<AmbienceKind>,
    },

    // ============================================
    // Lifecycle Events
    // ============================================
    /// User requested quit
    QuitRequested,
}
