//! Message Category and Theme Picker
//!
//! Small wrapper around a seedable RNG that decides which kind of message a
//! spontaneous request asks for, and which theme flavors the daily prompt.
//! Production uses an entropy seed; tests pin one for reproducible runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::message::MessageKind;

/// Probability that an unforced request asks for a compliment
const COMPLIMENT_WEIGHT: f32 = 0.3;

/// Imagery woven into the daily prompt
const THEMES: [&str; 9] = [
    "soft morning light",
    "the first snowfall",
    "a quiet library",
    "warm amber embers",
    "starlit horizons",
    "gentle ocean mist",
    "mountain silence",
    "garden blooms",
    "golden hour",
];

/// Weighted picker for message kinds and daily themes
#[derive(Debug)]
pub struct MessagePicker {
    rng: StdRng,
}

impl MessagePicker {
    /// Picker seeded from OS entropy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Picker with a fixed seed, for deterministic sequences
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw the kind for a spontaneous request
    ///
    /// Mostly quotes, with an occasional compliment.
    pub fn pick_kind(&mut self) -> MessageKind {
        if self.rng.gen::<f32>() < COMPLIMENT_WEIGHT {
            MessageKind::Compliment
        } else {
            MessageKind::Quote
        }
    }

    /// Draw a theme for the daily quote prompt
    pub fn pick_theme(&mut self) -> &'static str {
        THEMES[self.rng.gen_range(0..THEMES.len())]
    }
}

impl Default for MessagePicker {
    fn default() -> Self {
        Self::new()
    }
}
