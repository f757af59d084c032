//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are derived from HearthMessages and used for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what the Hearth tells it
//! to. Display state is the bridge between HearthMessages and rendering.

use std::time::{Duration, Instant};

use hearth_core::{
    AmbienceKind, DailyGoal, GentleMessage, HearthMessage, HearthState, NotifyLevel,
};

/// How long the "Copied!" flash stays visible
const COPIED_FLASH: Duration = Duration::from_secs(2);

/// The four paper tones the card background rotates through
pub const PAPER_TONES: usize = 4;

/// A dismissable out-of-band notice
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    /// Severity, decides the tint
    pub level: NotifyLevel,
    /// The notice text
    pub text: String,
}

/// Current display state, folded from HearthMessages
#[derive(Debug)]
pub struct DisplayState {
    /// Current Hearth state
    pub hearth_state: HearthState,
    /// The message on the card, once one arrived
    pub message: Option<GentleMessage>,
    /// Every goal, in creation order
    pub goals: Vec<DailyGoal>,
    /// Every saved message, oldest first
    pub saved: Vec<GentleMessage>,
    /// What ambience is playing, `None` for silence
    pub ambience: Option<AmbienceKind>,
    /// A notice to show until dismissed
    pub banner: Option<Banner>,
    /// Parting words from the quit message
    pub farewell: Option<String>,
    /// Paper tone index, advanced on each new message
    pub paper_index: usize,
    /// When the "Copied!" flash expires
    copied_until: Option<Instant>,
}

impl DisplayState {
    /// Create initial display state
    pub fn new() -> Self {
        Self {
            hearth_state: HearthState::Starting,
            message: None,
            goals: Vec::new(),
            saved: Vec::new(),
            ambience: None,
            banner: None,
            farewell: None,
            paper_index: 0,
            copied_until: None,
        }
    }

    /// Fold one HearthMessage into the display state
    pub fn apply_message(&mut self, msg: HearthMessage) {
        match msg {
            HearthMessage::MessageReady { message } => {
                self.message = Some(message);
                self.paper_index = (self.paper_index + 1) % PAPER_TONES;
            }
            HearthMessage::State { state } => {
                self.hearth_state = state;
            }
            HearthMessage::GoalsChanged { goals } => {
                self.goals = goals;
            }
            HearthMessage::SavedChanged { saved } => {
                self.saved = saved;
            }
            HearthMessage::AmbienceChanged { ambience } => {
                self.ambience = ambience;
            }
            HearthMessage::Notify { level, message } => {
                self.banner = Some(Banner {
                    level,
                    text: message,
                });
            }
            HearthMessage::Quit { farewell } => {
                self.farewell = farewell;
                self.hearth_state = HearthState::ShuttingDown;
            }
        }
    }

    /// Whether a generation is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self.hearth_state, HearthState::Fetching)
    }

    /// Whether the current card message is in the collection
    pub fn current_is_saved(&self) -> bool {
        match &self.message {
            Some(message) => self.saved.iter().any(|kept| kept.text == message.text),
            None => false,
        }
    }

    /// Goals still in progress, for the board header count
    pub fn active_goal_count(&self) -> usize {
        self.goals.iter().filter(|goal| !goal.is_completed).count()
    }

    /// Dismiss the banner
    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Start the "Copied!" flash
    pub fn flash_copied(&mut self) {
        self.copied_until = Some(Instant::now() + COPIED_FLASH);
    }

    /// Whether the "Copied!" flash is still showing
    pub fn copied_showing(&self) -> bool {
        self.copied_until.is_some_and(|until| Instant::now() < until)
    }

    /// Expire the flash; called once per frame
    pub fn tick(&mut self) {
        if self.copied_until.is_some_and(|until| Instant::now() >= until) {
            self.copied_until = None;
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}
