//! Rendering Widgets
//!
//! Stateless render functions for each region of the screen, plus the
//! goal-entry form state machine. All layout is plain ratatui; the data
//! comes from [`DisplayState`](crate::display::DisplayState).

pub mod collection;
pub mod goal_board;
pub mod message_card;
pub mod status_bar;

pub use goal_board::GoalForm;
