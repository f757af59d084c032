//! Ember TUI - Terminal surface for the Hearth
//!
//! This crate provides a full-screen terminal UI: a paper-toned message
//! card, the daily foci board, and the saved collection.
//!
//! # Architecture (Thin Client)
//!
//! The TUI is a "thin client" that renders what the Hearth tells it to.
//! All business logic lives in `hearth-core`.
//!
//! - **HearthClient**: Wraps communication with the embedded Hearth
//! - **DisplayState**: Display state derived from HearthMessages
//! - **Widgets**: Message card, goal board, collection, status bar
//!
//! ## Event Flow
//!
//! ```text
//! Terminal Events -> SurfaceEvent -> Hearth -> HearthMessage -> Display State -> Render
//! ```

pub mod app;
pub mod display;
pub mod hearth_client;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use display::{Banner, DisplayState};
pub use hearth_client::HearthClient;
