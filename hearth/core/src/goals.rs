//! Daily Goal Tracking
//!
//! Types for the daily foci board: small user-defined goals finished in a
//! fixed number of discrete steps. This module owns the state machine; the
//! Hearth decides which cue or celebration each transition earns.
//!
//! Progress is set absolutely (the surface reports which dot was pressed),
//! so the machine classifies every change as progress, a step back, or a
//! completion. Once a goal completes it stays completed; later step
//! presses are inert.

use serde::{Deserialize, Serialize};

/// Step counts a goal may be created with
pub const ALLOWED_STEP_COUNTS: [u32; 4] = [1, 2, 3, 5];

/// Goal identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalId(pub String);

impl GoalId {
    /// Create a goal ID from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new unique goal ID
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::time::{SystemTime, UNIX_EPOCH};

        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let count = COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        Self(format!("goal_{timestamp}_{count}"))
    }

    /// Get the string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a goal sits between creation and completion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalPhase {
    /// No steps taken yet
    NotStarted,
    /// Some steps taken, not all
    InProgress,
    /// All steps taken
    Completed,
}

/// A single daily focus
///
/// Serializes camelCase to stay readable alongside the snapshots the
/// original client wrote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoal {
    /// Unique goal identifier
    pub id: GoalId,
    /// What the user wants to do
    pub text: String,
    /// Steps required to finish
    pub total_steps: u32,
    /// Steps taken so far
    pub current_steps: u32,
    /// Whether the goal has been finished
    pub is_completed: bool,
}

impl DailyGoal {
    /// Create a fresh goal with no progress
    #[must_use]
    pub fn new(id: GoalId, text: String, total_steps: u32) -> Self {
        Self {
            id,
            text,
            total_steps,
            current_steps: 0,
            is_completed: false,
        }
    }

    /// Current phase of this goal
    #[must_use]
    pub fn phase(&self) -> GoalPhase {
        if self.is_completed {
            GoalPhase::Completed
        } else if self.current_steps == 0 {
            GoalPhase::NotStarted
        } else {
            GoalPhase::InProgress
        }
    }
}

/// How a step change was classified
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved forward without finishing
    Progressed,
    /// Moved to a lower step count
    SteppedBack,
    /// This change finished the goal
    Completed,
    /// The goal was already finished; nothing changed
    AlreadyCompleted,
}

/// Error when a goal operation fails
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GoalError {
    /// Goal text was empty or whitespace
    EmptyText,
    /// Requested step count is not offered
    UnsupportedStepCount {
        /// The rejected count
        requested: u32,
    },
    /// No goal with the given ID
    UnknownGoal {
        /// The missing ID
        id: GoalId,
    },
    /// Step value exceeds the goal's total
    StepOutOfRange {
        /// The rejected step value
        step: u32,
        /// The goal's total steps
        total: u32,
    },
}

impl std::fmt::Display for GoalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "A focus needs a few words"),
            Self::UnsupportedStepCount { requested } => {
                write!(f, "Unsupported step count: {requested} (choose 1, 2, 3 or 5)")
            }
            Self::UnknownGoal { id } => write!(f, "No goal with id {id}"),
            Self::StepOutOfRange { step, total } => {
                write!(f, "Step {step} is out of range for a {total}-step goal")
            }
        }
    }
}

impl std::error::Error for GoalError {}

/// The goal collection
///
/// Tracks all daily foci for the Hearth, preserving creation order for
/// consistent display.
#[derive(Clone, Debug, Default)]
pub struct GoalBook {
    /// All goals, keyed by ID
    goals: std::collections::HashMap<GoalId, DailyGoal>,
    /// Order of creation for consistent display
    order: Vec<GoalId>,
}

impl GoalBook {
    /// Create an empty goal book
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the book from a persisted snapshot
    #[must_use]
    pub fn from_snapshot(goals: Vec<DailyGoal>) -> Self {
        let mut book = Self::new();
        for mut goal in goals {
            goal.is_completed = goal.current_steps >= goal.total_steps;
            let id = goal.id.clone();
            book.goals.insert(id.clone(), goal);
            book.order.push(id);
        }
        book
    }

    /// Create and add a new goal
    pub fn create(&mut self, text: &str, total_steps: u32) -> Result<GoalId, GoalError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GoalError::EmptyText);
        }
        if !ALLOWED_STEP_COUNTS.contains(&total_steps) {
            return Err(GoalError::UnsupportedStepCount {
                requested: total_steps,
            });
        }

        let id = GoalId::generate();
        let goal = DailyGoal::new(id.clone(), text.to_string(), total_steps);
        self.goals.insert(id.clone(), goal);
        self.order.push(id.clone());
        Ok(id)
    }

    /// Set a goal's progress to an absolute step value
    ///
    /// Classifies the change for cue selection. Finished goals ignore
    /// further changes and report [`StepOutcome::AlreadyCompleted`].
    pub fn set_steps(&mut self, id: &GoalId, step: u32) -> Result<StepOutcome, GoalError> {
        let goal = self
            .goals
            .get_mut(id)
            .ok_or_else(|| GoalError::UnknownGoal { id: id.clone() })?;

        if step > goal.total_steps {
            return Err(GoalError::StepOutOfRange {
                step,
                total: goal.total_steps,
            });
        }
        if goal.is_completed {
            return Ok(StepOutcome::AlreadyCompleted);
        }

        let previous = goal.current_steps;
        goal.current_steps = step;
        goal.is_completed = step >= goal.total_steps;

        if step < previous {
            Ok(StepOutcome::SteppedBack)
        } else if goal.is_completed {
            Ok(StepOutcome::Completed)
        } else {
            Ok(StepOutcome::Progressed)
        }
    }

    /// Remove a goal permanently
    pub fn remove(&mut self, id: &GoalId) -> Result<DailyGoal, GoalError> {
        let goal = self
            .goals
            .remove(id)
            .ok_or_else(|| GoalError::UnknownGoal { id: id.clone() })?;
        self.order.retain(|other| other != id);
        Ok(goal)
    }

    /// Get a goal by ID
    #[must_use]
    pub fn get(&self, id: &GoalId) -> Option<&DailyGoal> {
        self.goals.get(id)
    }

    /// All goals in creation order
    pub fn all(&self) -> impl Iterator<Item = &DailyGoal> {
        self.order.iter().filter_map(|id| self.goals.get(id))
    }

    /// Number of goals
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Whether the book is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Clone the goals in creation order, for messages and persistence
    #[must_use]
    pub fn snapshot(&self) -> Vec<DailyGoal> {
        self.all().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_completion_invariant(goal: &DailyGoal) {
        assert_eq!(
            goal.is_completed,
            goal.current_steps >= goal.total_steps,
            "invariant broken for {:?}",
            goal
        );
    }

    #[test]
    fn test_goal_id_generate() {
        let id1 = GoalId::generate();
        let id2 = GoalId::generate();
        assert_ne!(id1, id2);
        assert!(id1.0.starts_with("goal_"));
    }

    #[test]
    fn test_create_rejects_empty_text() {
        let mut book = GoalBook::new();
        assert_eq!(book.create("", 3), Err(GoalError::EmptyText));
        assert_eq!(book.create("   ", 3), Err(GoalError::EmptyText));
        assert!(book.is_empty());
    }

    #[test]
    fn test_create_rejects_odd_step_counts() {
        let mut book = GoalBook::new();
        assert_eq!(
            book.create("Stretch", 4),
            Err(GoalError::UnsupportedStepCount { requested: 4 })
        );
        assert_eq!(
            book.create("Stretch", 0),
            Err(GoalError::UnsupportedStepCount { requested: 0 })
        );
        for count in ALLOWED_STEP_COUNTS {
            assert!(book.create("Stretch", count).is_ok());
        }
    }

    #[test]
    fn test_completion_invariant_after_every_change() {
        let mut book = GoalBook::new();
        let id = book.create("Walk outside", 5).unwrap();
        assert_completion_invariant(book.get(&id).unwrap());

        for step in [1, 3, 2, 0, 4, 5] {
            book.set_steps(&id, step).unwrap();
            assert_completion_invariant(book.get(&id).unwrap());
        }
    }

    #[test]
    fn test_step_back_never_completes() {
        let mut book = GoalBook::new();
        let id = book.create("Read a page", 3).unwrap();
        book.set_steps(&id, 2).unwrap();

        let outcome = book.set_steps(&id, 1).unwrap();
        assert_eq!(outcome, StepOutcome::SteppedBack);
        let goal = book.get(&id).unwrap();
        assert!(!goal.is_completed);
        assert_eq!(goal.current_steps, 1);
    }

    #[test]
    fn test_walk_to_completion_then_inert() {
        let mut book = GoalBook::new();
        let id = book.create("Drink water", 3).unwrap();

        assert_eq!(book.set_steps(&id, 1).unwrap(), StepOutcome::Progressed);
        assert_eq!(book.set_steps(&id, 2).unwrap(), StepOutcome::Progressed);
        assert_eq!(book.set_steps(&id, 3).unwrap(), StepOutcome::Completed);

        let goal = book.get(&id).unwrap();
        assert_eq!(goal.current_steps, 3);
        assert!(goal.is_completed);
        assert_eq!(goal.phase(), GoalPhase::Completed);

        // Finished goals ignore later presses, including lower dots.
        assert_eq!(
            book.set_steps(&id, 2).unwrap(),
            StepOutcome::AlreadyCompleted
        );
        let goal = book.get(&id).unwrap();
        assert_eq!(goal.current_steps, 3);
        assert!(goal.is_completed);
    }

    #[test]
    fn test_step_out_of_range() {
        let mut book = GoalBook::new();
        let id = book.create("Breathe deeply", 2).unwrap();
        assert_eq!(
            book.set_steps(&id, 3),
            Err(GoalError::StepOutOfRange { step: 3, total: 2 })
        );
    }

    #[test]
    fn test_unknown_goal() {
        let mut book = GoalBook::new();
        let missing = GoalId::new("goal_0_0");
        assert!(matches!(
            book.set_steps(&missing, 1),
            Err(GoalError::UnknownGoal { .. })
        ));
        assert!(matches!(
            book.remove(&missing),
            Err(GoalError::UnknownGoal { .. })
        ));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut book = GoalBook::new();
        let first = book.create("First", 1).unwrap();
        let second = book.create("Second", 1).unwrap();
        let third = book.create("Third", 1).unwrap();

        book.remove(&second).unwrap();
        let texts: Vec<_> = book.all().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Third"]);
        assert!(book.get(&second).is_none());
        assert!(book.get(&first).is_some());
        assert!(book.get(&third).is_some());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut book = GoalBook::new();
        let id = book.create("Water the plants", 3).unwrap();
        book.create("Stretch", 1).unwrap();
        book.set_steps(&id, 2).unwrap();

        let restored = GoalBook::from_snapshot(book.snapshot());
        assert_eq!(restored.snapshot(), book.snapshot());
    }

    #[test]
    fn test_snapshot_normalizes_completion_flag() {
        let stale = DailyGoal {
            id: GoalId::new("goal_1_0"),
            text: "Tidy the desk".to_string(),
            total_steps: 2,
            current_steps: 2,
            is_completed: false,
        };
        let book = GoalBook::from_snapshot(vec![stale]);
        let goal = book.all().next().unwrap();
        assert!(goal.is_completed);
    }

    #[test]
    fn test_serde_camel_case_shape() {
        let goal = DailyGoal::new(GoalId::new("goal_9_0"), "Rest".to_string(), 3);
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "goal_9_0",
                "text": "Rest",
                "totalSteps": 3,
                "currentSteps": 0,
                "isCompleted": false,
            })
        );
    }
}
