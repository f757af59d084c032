//! Integration Tests for TUI + Hearth
//!
//! These tests verify the full interaction flow between the TUI's display
//! layer and the Hearth, using a mock generator in place of Gemini.
//!
//! # Test Coverage
//!
//! 1. **Startup Flow**: Hearth starts, announces its snapshots, presents
//!    a first message
//! 2. **Message Exchange**: Kindle Another produces a fresh message on the
//!    display
//! 3. **Failure Flow**: a broken generator still lights the card, with a
//!    soft banner
//! 4. **Goal Lifecycle**: create, step, complete, celebrate
//! 5. **Collection**: save, filter, unsave
//! 6. **Shutdown**: quit carries the farewell to the display
//!
//! # Mock Generator
//!
//! A configurable mock that can return canned text, count calls, and be
//! flipped into a failing mode mid-test.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;

use ember_tui::widgets::collection;
use ember_tui::DisplayState;
use hearth_core::generator::{GeneratorError, GeneratorRequest, MessageGenerator};
use hearth_core::{
    AudioEngine, GentleMessage, Hearth, HearthMessage, HearthState, MemoryStore, MessageKind,
    MessagePicker, SnapshotStore, SurfaceEvent,
};

// ============================================================================
// Configurable Mock Generator
// ============================================================================

/// A mock generator with canned replies and switchable failure
struct MockGenerator {
    reply: String,
    calls: AtomicUsize,
    failing: Arc<AtomicBool>,
}

impl MockGenerator {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle to flip the generator into failing mode from the test body
    fn failure_switch(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.failing)
    }
}

#[async_trait]
impl MessageGenerator for MockGenerator {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn generate(
        &self,
        request: &GeneratorRequest,
    ) -> Result<GentleMessage, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(GeneratorError::EmptyReply);
        }
        Ok(GentleMessage::new(&self.reply, request.kind).with_author("Mock"))
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    hearth: Hearth<MockGenerator>,
    rx: mpsc::Receiver<HearthMessage>,
    display: DisplayState,
}

impl Harness {
    fn new(generator: MockGenerator) -> Self {
        let (tx, rx) = mpsc::channel(64);
        let store: Arc<dyn SnapshotStore> = Arc::new(MemoryStore::new());
        let hearth = Hearth::new(generator, store, tx)
            .with_picker(MessagePicker::with_seed(7))
            .with_audio(AudioEngine::muted());
        Self {
            hearth,
            rx,
            display: DisplayState::new(),
        }
    }

    /// Drain pending messages into the display, polling finished generations
    async fn settle(&mut self) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.hearth.poll().await;
        while let Ok(msg) = self.rx.try_recv() {
            self.display.apply_message(msg);
        }
    }

    /// Settle until the display holds a message, or time out
    async fn settle_until_lit(&mut self) {
        timeout(Duration::from_secs(2), async {
            loop {
                self.settle().await;
                if self.display.message.is_some() && !self.display.is_loading() {
                    break;
                }
            }
        })
        .await
        .expect("display never lit");
    }
}

// ============================================================================
// Startup Flow
// ============================================================================

#[tokio::test]
async fn test_startup_lights_the_card() {
    let mut harness = Harness::new(MockGenerator::new("A first warm thought"));
    harness.hearth.start().await.unwrap();
    harness.settle_until_lit().await;

    let message = harness.display.message.as_ref().unwrap();
    assert_eq!(message.text, "A first warm thought");
    assert_eq!(harness.display.hearth_state, HearthState::Ready);
    assert!(harness.display.banner.is_none());
}

// ============================================================================
// Message Exchange
// ============================================================================

#[tokio::test]
async fn test_kindle_another_replaces_the_message() {
    let mut harness = Harness::new(MockGenerator::new("Another ember"));
    harness.hearth.start().await.unwrap();
    harness.settle_until_lit().await;
    let first_paper = harness.display.paper_index;

    harness
        .hearth
        .handle_event(SurfaceEvent::MessageRequested)
        .await
        .unwrap();
    assert_eq!(harness.hearth.state(), HearthState::Fetching);

    harness.settle_until_lit().await;
    assert_eq!(
        harness.display.message.as_ref().unwrap().text,
        "Another ember"
    );
    // A new message turns the paper
    assert_ne!(harness.display.paper_index, first_paper);
}

// ============================================================================
// Failure Flow
// ============================================================================

#[tokio::test]
async fn test_failure_still_lights_the_card_with_a_banner() {
    let generator = MockGenerator::new("unused");
    let switch = generator.failure_switch();
    switch.store(true, Ordering::SeqCst);

    let mut harness = Harness::new(generator);
    harness.hearth.start().await.unwrap();
    harness.settle_until_lit().await;

    let message = harness.display.message.as_ref().unwrap();
    assert!(message.text.contains("The stars are quiet today"));
    assert_eq!(message.author.as_deref(), Some("Ember"));

    let banner = harness.display.banner.as_ref().expect("soft notice");
    assert!(banner.text.contains("Showing local light"));
}

// ============================================================================
// Goal Lifecycle
// ============================================================================

#[tokio::test]
async fn test_goal_completion_reaches_the_display() {
    let mut harness = Harness::new(MockGenerator::new("You watered the plants. Lovely."));
    harness.hearth.start().await.unwrap();
    harness.settle_until_lit().await;

    harness
        .hearth
        .handle_event(SurfaceEvent::GoalCreated {
            text: "Water the plants".to_string(),
            total_steps: 2,
        })
        .await
        .unwrap();
    harness.settle().await;
    assert_eq!(harness.display.goals.len(), 1);
    assert_eq!(harness.display.active_goal_count(), 1);

    let id = harness.display.goals[0].id.clone();
    harness
        .hearth
        .handle_event(SurfaceEvent::GoalStepSet { id: id.clone(), step: 1 })
        .await
        .unwrap();
    harness.settle().await;
    assert_eq!(harness.display.goals[0].current_steps, 1);
    assert!(!harness.display.goals[0].is_completed);

    harness
        .hearth
        .handle_event(SurfaceEvent::GoalStepSet { id, step: 2 })
        .await
        .unwrap();
    harness.settle_until_lit().await;
    assert!(harness.display.goals[0].is_completed);
    assert_eq!(harness.display.active_goal_count(), 0);
    // The celebration message lands on the card
    assert_eq!(
        harness.display.message.as_ref().unwrap().kind,
        MessageKind::GoalCompletion
    );
}

#[tokio::test]
async fn test_goal_removal_clears_the_board() {
    let mut harness = Harness::new(MockGenerator::new("steady"));
    harness.hearth.start().await.unwrap();
    harness.settle_until_lit().await;

    harness
        .hearth
        .handle_event(SurfaceEvent::GoalCreated {
            text: "Stretch".to_string(),
            total_steps: 1,
        })
        .await
        .unwrap();
    harness.settle().await;
    let id = harness.display.goals[0].id.clone();

    harness
        .hearth
        .handle_event(SurfaceEvent::GoalRemoved { id })
        .await
        .unwrap();
    harness.settle().await;
    assert!(harness.display.goals.is_empty());
}

// ============================================================================
// Collection
// ============================================================================

#[tokio::test]
async fn test_save_filter_and_unsave() {
    let mut harness = Harness::new(MockGenerator::new("Keep this one close"));
    harness.hearth.start().await.unwrap();
    harness.settle_until_lit().await;

    let message = harness.display.message.clone().unwrap();
    harness
        .hearth
        .handle_event(SurfaceEvent::SaveToggled {
            message: message.clone(),
        })
        .await
        .unwrap();
    harness.settle().await;
    assert_eq!(harness.display.saved.len(), 1);
    assert!(harness.display.current_is_saved());

    // The collection's filter finds it the way the card shows it
    assert_eq!(collection::filtered(&harness.display.saved, "close").len(), 1);
    assert!(collection::filtered(&harness.display.saved, "absent").is_empty());

    harness
        .hearth
        .handle_event(SurfaceEvent::SaveToggled { message })
        .await
        .unwrap();
    harness.settle().await;
    assert!(harness.display.saved.is_empty());
    assert!(!harness.display.current_is_saved());
}

// ============================================================================
// Shutdown
// ============================================================================

#[tokio::test]
async fn test_quit_carries_the_farewell() {
    let mut harness = Harness::new(MockGenerator::new("glow"));
    harness.hearth.start().await.unwrap();
    harness.settle_until_lit().await;

    harness
        .hearth
        .handle_event(SurfaceEvent::QuitRequested)
        .await
        .unwrap();
    harness.settle().await;

    assert_eq!(harness.display.hearth_state, HearthState::ShuttingDown);
    assert_eq!(
        harness.display.farewell.as_deref(),
        Some("Rest gently. The light keeps.")
    );
}
