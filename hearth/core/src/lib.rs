//! Hearth Core - Headless Affirmation Orchestration for Ember
//!
//! This crate provides the core logic for Ember, completely independent of
//! any UI framework. It can drive a TUI, web UI, native GUI, or run
//! headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       UI Surfaces                           │
//! │  ┌─────────┐  ┌─────────┐  ┌──────────────────────────────┐│
//! │  │   TUI   │  │  WebUI  │  │        Headless / Tests      ││
//! │  │(ratatui)│  │         │  │                              ││
//! │  └────┬────┘  └────┬────┘  └──────────────┬───────────────┘│
//! │       └────────────┴──────────────────────┘                │
//! │                        │                                    │
//! │                 SurfaceEvent (up)                          │
//! │                 HearthMessage (down)                       │
//! └────────────────────────┼────────────────────────────────────┘
//!                          │
//! ┌────────────────────────┼────────────────────────────────────┐
//! │                   HEARTH CORE                               │
//! │  ┌─────────────────────┴─────────────────────────────────┐ │
//! │  │                      Hearth                            │ │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────────┐ │ │
//! │  │  │  Goal   │ │  Saved  │ │  Audio  │ │  Generator   │ │ │
//! │  │  │  Book   │ │Messages │ │ Engine  │ │  (Gemini)    │ │ │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └──────────────┘ │ │
//! │  └───────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Hearth`]: The main orchestration struct that manages everything
//! - [`HearthMessage`]: Messages sent from Hearth to UI surfaces
//! - [`SurfaceEvent`]: Events sent from UI surfaces to Hearth
//! - [`GoalBook`]: The daily goal board and its state machine
//! - [`SavedMessages`]: The favorites collection
//! - [`AudioEngine`]: Procedural cue and ambience synthesis
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use hearth_core::{Hearth, GeminiGenerator, JsonFileStore, SurfaceEvent};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::channel(100);
//!
//!     let generator = GeminiGenerator::from_env();
//!     let store = Arc::new(JsonFileStore::open_default().unwrap());
//!     let mut hearth = Hearth::new(generator, store, tx);
//!
//!     hearth.start().await.unwrap();
//!
//!     loop {
//!         // Handle incoming messages from the Hearth
//!         while let Ok(msg) = rx.try_recv() {
//!             // Render message to UI
//!         }
//!
//!         // Drain finished generation tasks
//!         hearth.poll().await;
//!
//!         // Handle user input, send as SurfaceEvent
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`audio`]: Procedural cue and ambience synthesis over rodio
//! - [`config`]: TOML + environment configuration
//! - [`events`]: Events from UI surfaces to the Hearth
//! - [`generator`]: Message generation seam (Gemini, fallback)
//! - [`goals`]: Daily goal board and step state machine
//! - [`hearth`]: Main Hearth struct
//! - [`message`]: Message and daily-quote data types
//! - [`messages`]: Messages from the Hearth to UI surfaces
//! - [`picker`]: Seedable category and theme picker
//! - [`saved`]: Saved-message collection with search
//! - [`store`]: Key-value snapshot persistence
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure business logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod audio;
pub mod config;
pub mod events;
pub mod generator;
pub mod goals;
pub mod hearth;
pub mod message;
pub mod messages;
pub mod picker;
pub mod saved;
pub mod store;

// Re-exports for convenience
pub use audio::{AmbienceKind, AudioEngine, AudioError, CueKind, FadeTimings};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigSource,
    EmberConfigFile, EmberToml,
};
pub use events::SurfaceEvent;
pub use generator::{
    fallback_message, GeminiGenerator, GeneratorError, GeneratorRequest, MessageGenerator,
    DEFAULT_MODEL,
};
pub use goals::{
    DailyGoal, GoalBook, GoalError, GoalId, GoalPhase, StepOutcome, ALLOWED_STEP_COUNTS,
};
pub use hearth::Hearth;
pub use message::{DailyQuote, GentleMessage, MessageKind};
pub use messages::{HearthMessage, HearthState, NotifyLevel};
pub use picker::MessagePicker;
pub use saved::{SaveOutcome, SavedMessages};
pub use store::{
    JsonFileStore, MemoryStore, SnapshotStore, StoreError, DAILY_KEY, GOALS_KEY, SAVED_KEY,
};
