//! Hearth - The Orchestration Core
//!
//! The Hearth is the "brain" of Ember. It orchestrates:
//! - Message generation and the local fallback
//! - The daily goal board and its cues
//! - The saved-message collection
//! - The ambient audio engine
//! - Communication with UI surfaces
//!
//! # Design Philosophy
//!
//! The Hearth is UI-agnostic. It doesn't know or care whether it's talking
//! to a TUI, a web surface, or a test harness. It communicates through:
//! - `HearthMessage`: Messages sent TO the UI surface
//! - `SurfaceEvent`: Events received FROM the UI surface
//!
//! Generation runs as fire-and-forget spawned tasks reporting into an
//! internal channel drained by [`poll`](Hearth::poll). Two rapid requests
//! may overlap; outcomes are presented in arrival order and the latest one
//! wins. That race is deliberate and documented: no sequencing token
//! guards a non-critical display.
//!
//! Every mutation of the goal board, the collection, or the daily cache is
//! persisted to the snapshot store immediately, best-effort. Store and
//! audio failures are logged and swallowed; nothing here is fatal.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::audio::{AudioEngine, CueKind};
use crate::events::SurfaceEvent;
use crate::generator::{fallback_message, GeneratorError, GeneratorRequest, MessageGenerator};
use crate::goals::{GoalBook, GoalId, StepOutcome};
use crate::message::{DailyQuote, GentleMessage, MessageKind};
use crate::messages::{HearthMessage, HearthState, NotifyLevel};
use crate::picker::MessagePicker;
use crate::saved::{SaveOutcome, SavedMessages};
use crate::store::{SnapshotStore, DAILY_KEY, GOALS_KEY, SAVED_KEY};

/// Banner shown when generation fails and the fallback steps in
const FALLBACK_NOTICE: &str = "The connection to the stars was interrupted. Showing local light.";

/// Parting line sent with the quit message
const FAREWELL: &str = "Rest gently. The light keeps.";

/// Outcome of one spawned generation task
struct GenerationOutcome {
    request: GeneratorRequest,
    result: Result<GentleMessage, GeneratorError>,
}

/// The Hearth - headless orchestration core
pub struct Hearth<G: MessageGenerator> {
    /// Message generator
    generator: Arc<G>,
    /// Snapshot persistence
    store: Arc<dyn SnapshotStore>,
    /// Weighted category and theme picker
    picker: MessagePicker,
    /// The goal board
    goals: GoalBook,
    /// The saved collection
    saved: SavedMessages,
    /// Cached quote of the day
    daily: Option<DailyQuote>,
    /// Cue and ambience playback
    audio: AudioEngine,
    /// Current operational state
    state: HearthState,
    /// Channel to send messages to the UI surface
    tx: mpsc::Sender<HearthMessage>,
    /// Generation outcomes flow in here from spawned tasks
    outcome_tx: mpsc::Sender<GenerationOutcome>,
    outcome_rx: mpsc::Receiver<GenerationOutcome>,
}

impl<G: MessageGenerator + 'static> Hearth<G> {
    /// Create a new Hearth with the given generator and store
    pub fn new(generator: G, store: Arc<dyn SnapshotStore>, tx: mpsc::Sender<HearthMessage>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(16);
        Self {
            generator: Arc::new(generator),
            store,
            picker: MessagePicker::new(),
            goals: GoalBook::new(),
            saved: SavedMessages::new(),
            daily: None,
            audio: AudioEngine::new(),
            state: HearthState::Starting,
            tx,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Replace the picker, usually with a seeded one
    #[must_use]
    pub fn with_picker(mut self, picker: MessagePicker) -> Self {
        self.picker = picker;
        self
    }

    /// Replace the audio engine, usually with a muted one
    #[must_use]
    pub fn with_audio(mut self, audio: AudioEngine) -> Self {
        self.audio = audio;
        self
    }

    /// Get current state
    #[must_use]
    pub fn state(&self) -> HearthState {
        self.state
    }

    /// The goal board
    #[must_use]
    pub fn goals(&self) -> &GoalBook {
        &self.goals
    }

    /// The saved collection
    #[must_use]
    pub fn saved(&self) -> &SavedMessages {
        &self.saved
    }

    /// The audio engine
    #[must_use]
    pub fn audio(&self) -> &AudioEngine {
        &self.audio
    }

    /// Start the Hearth: load snapshots, announce state, bring first light
    ///
    /// A fresh cached quote of the day is presented directly; otherwise a
    /// spontaneous generation request is spawned.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.set_state(HearthState::Starting).await;
        self.load_snapshots();

        self.send(HearthMessage::GoalsChanged {
            goals: self.goals.snapshot(),
        })
        .await;
        self.send(HearthMessage::SavedChanged {
            saved: self.saved.snapshot(),
        })
        .await;
        self.send(HearthMessage::AmbienceChanged {
            ambience: self.audio.ambience(),
        })
        .await;

        match self.daily.as_ref().filter(|cached| cached.is_fresh()) {
            Some(cached) => {
                let message = cached.message.clone();
                self.present(message).await;
            }
            None => {
                let kind = self.picker.pick_kind();
                self.spawn_generation(GeneratorRequest::new(kind)).await;
            }
        }

        Ok(())
    }

    /// Handle an event from the UI surface
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        match event {
            SurfaceEvent::MessageRequested => {
                let kind = self.picker.pick_kind();
                self.spawn_generation(GeneratorRequest::new(kind)).await;
            }

            SurfaceEvent::DailyRequested => {
                // Fresh cache short-circuits the generator entirely.
                match self.daily.as_ref().filter(|cached| cached.is_fresh()) {
                    Some(cached) => {
                        let message = cached.message.clone();
                        self.present(message).await;
                    }
                    None => {
                        let theme = self.picker.pick_theme();
                        self.spawn_generation(
                            GeneratorRequest::new(MessageKind::Daily).with_theme(theme),
                        )
                        .await;
                    }
                }
            }

            SurfaceEvent::GoalCreated { text, total_steps } => {
                match self.goals.create(&text, total_steps) {
                    Ok(_) => {
                        self.play_cue(CueKind::Progress);
                        self.persist_goals();
                        self.send(HearthMessage::GoalsChanged {
                            goals: self.goals.snapshot(),
                        })
                        .await;
                    }
                    Err(e) => {
                        self.notify(NotifyLevel::Warning, &e.to_string()).await;
                    }
                }
            }

            SurfaceEvent::GoalStepSet { id, step } => {
                self.handle_step_set(id, step).await;
            }

            SurfaceEvent::GoalRemoved { id } => match self.goals.remove(&id) {
                Ok(_) => {
                    self.play_cue(CueKind::Undo);
                    self.persist_goals();
                    self.send(HearthMessage::GoalsChanged {
                        goals: self.goals.snapshot(),
                    })
                    .await;
                }
                Err(e) => {
                    self.notify(NotifyLevel::Warning, &e.to_string()).await;
                }
            },

            SurfaceEvent::SaveToggled { message } => {
                match self.saved.toggle(message) {
                    SaveOutcome::Saved => self.play_cue(CueKind::Progress),
                    SaveOutcome::Removed => self.play_cue(CueKind::Undo),
                }
                self.persist_saved();
                self.send(HearthMessage::SavedChanged {
                    saved: self.saved.snapshot(),
                })
                .await;
            }

            SurfaceEvent::AmbienceSelected { ambience } => {
                match ambience {
                    Some(kind) => {
                        if let Err(e) = self.audio.start_ambience(kind) {
                            tracing::warn!("Ambience start failed: {}", e);
                        }
                    }
                    None => self.audio.stop_ambience(),
                }
                self.send(HearthMessage::AmbienceChanged {
                    ambience: self.audio.ambience(),
                })
                .await;
            }

            SurfaceEvent::QuitRequested => {
                self.shutdown().await?;
            }
        }

        Ok(())
    }

    /// Apply an absolute step press to a goal
    async fn handle_step_set(&mut self, id: GoalId, step: u32) {
        let outcome = match self.goals.set_steps(&id, step) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.notify(NotifyLevel::Warning, &e.to_string()).await;
                return;
            }
        };

        match outcome {
            StepOutcome::Progressed => self.play_cue(CueKind::Progress),
            StepOutcome::SteppedBack => self.play_cue(CueKind::Undo),
            StepOutcome::Completed => {
                // The completion cue arrives with the celebration message.
                let context = self
                    .goals
                    .get(&id)
                    .map(|goal| goal.text.clone())
                    .unwrap_or_default();
                self.spawn_generation(
                    GeneratorRequest::new(MessageKind::GoalCompletion).with_goal_context(context),
                )
                .await;
            }
            StepOutcome::AlreadyCompleted => return,
        }

        self.persist_goals();
        self.send(HearthMessage::GoalsChanged {
            goals: self.goals.snapshot(),
        })
        .await;
    }

    /// Drain finished generation tasks and present their messages
    ///
    /// Call this regularly. Returns true if there was activity. Failed
    /// generations become the local fallback plus a dismissable notice;
    /// they never error out to the surface.
    pub async fn poll(&mut self) -> bool {
        let mut activity = false;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            activity = true;
            match outcome.result {
                Ok(message) => {
                    if outcome.request.kind == MessageKind::Daily {
                        let cached = DailyQuote::for_today(message.clone());
                        self.daily = Some(cached);
                        self.persist_daily();
                    }
                    self.present(message).await;
                }
                Err(e) => {
                    tracing::warn!(
                        kind = ?outcome.request.kind,
                        "Generation failed, presenting fallback: {}",
                        e
                    );
                    self.present(fallback_message()).await;
                    self.notify(NotifyLevel::Warning, FALLBACK_NOTICE).await;
                }
            }
        }
        activity
    }

    /// Present a message: cue first, then the message itself
    async fn present(&mut self, message: GentleMessage) {
        self.play_cue(CueKind::for_message(message.kind));
        self.send(HearthMessage::MessageReady { message }).await;
        self.set_state(HearthState::Ready).await;
    }

    /// Spawn a generation task reporting into the outcome channel
    async fn spawn_generation(&mut self, request: GeneratorRequest) {
        self.set_state(HearthState::Fetching).await;
        let generator = Arc::clone(&self.generator);
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = generator.generate(&request).await;
            if outcome_tx
                .send(GenerationOutcome { request, result })
                .await
                .is_err()
            {
                tracing::debug!("Hearth gone before generation finished");
            }
        });
    }

    /// Shut down the Hearth
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        self.set_state(HearthState::ShuttingDown).await;
        self.audio.stop_ambience();
        self.send(HearthMessage::Quit {
            farewell: Some(FAREWELL.to_string()),
        })
        .await;
        Ok(())
    }

    /// Rebuild state from the snapshot store
    ///
    /// Absent keys mean empty initial state. Unreadable snapshots are
    /// logged and treated as absent.
    fn load_snapshots(&mut self) {
        if let Some(raw) = self.read_snapshot(GOALS_KEY) {
            match serde_json::from_str(&raw) {
                Ok(goals) => self.goals = GoalBook::from_snapshot(goals),
                Err(e) => tracing::warn!("Discarding unreadable goals snapshot: {}", e),
            }
        }
        if let Some(raw) = self.read_snapshot(SAVED_KEY) {
            match serde_json::from_str(&raw) {
                Ok(saved) => self.saved = SavedMessages::from_snapshot(saved),
                Err(e) => tracing::warn!("Discarding unreadable saved snapshot: {}", e),
            }
        }
        if let Some(raw) = self.read_snapshot(DAILY_KEY) {
            match serde_json::from_str::<DailyQuote>(&raw) {
                Ok(cached) => self.daily = Some(cached),
                Err(e) => tracing::warn!("Discarding unreadable daily snapshot: {}", e),
            }
        }
    }

    fn read_snapshot(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Snapshot read failed: {}", e);
                None
            }
        }
    }

    fn persist_goals(&self) {
        self.persist(GOALS_KEY, &self.goals.snapshot());
    }

    fn persist_saved(&self) {
        self.persist(SAVED_KEY, &self.saved.snapshot());
    }

    fn persist_daily(&self) {
        if let Some(cached) = &self.daily {
            self.persist(DAILY_KEY, cached);
        }
    }

    /// Serialize and write one snapshot, best-effort
    fn persist<T: serde::Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Snapshot serialization failed for {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.put(key, &json) {
            tracing::warn!("Snapshot write failed: {}", e);
        }
    }

    /// Play a cue, swallowing device trouble
    fn play_cue(&mut self, cue: CueKind) {
        if let Err(e) = self.audio.play_cue(cue) {
            tracing::warn!("Cue {:?} failed: {}", cue, e);
        }
    }

    /// Set state and notify the surface
    async fn set_state(&mut self, state: HearthState) {
        self.state = state;
        self.send(HearthMessage::State { state }).await;
    }

    /// Send notification
    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(HearthMessage::Notify {
            level,
            message: message.to_string(),
        })
        .await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: HearthMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AmbienceKind, FadeTimings};
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Generator that counts calls and answers with a canned message
    struct CannedGenerator {
        calls: Arc<AtomicUsize>,
    }

    impl CannedGenerator {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    #[async_trait::async_trait]
    impl MessageGenerator for CannedGenerator {
        fn name(&self) -> &str {
            "Canned"
        }

        async fn generate(
            &self,
            request: &GeneratorRequest,
        ) -> Result<GentleMessage, GeneratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let text = match &request.goal_context {
                Some(context) => format!("Well done with {context}!"),
                None => "A soft canned thought.".to_string(),
            };
            Ok(GentleMessage::new(text, request.kind))
        }
    }

    /// Generator that always fails
    struct BrokenGenerator;

    #[async_trait::async_trait]
    impl MessageGenerator for BrokenGenerator {
        fn name(&self) -> &str {
            "Broken"
        }

        async fn generate(
            &self,
            _request: &GeneratorRequest,
        ) -> Result<GentleMessage, GeneratorError> {
            Err(GeneratorError::MissingCredential)
        }
    }

    fn hearth_with<Gen: MessageGenerator + 'static>(
        generator: Gen,
        store: Arc<dyn SnapshotStore>,
    ) -> (Hearth<Gen>, mpsc::Receiver<HearthMessage>) {
        let (tx, rx) = mpsc::channel(100);
        let hearth = Hearth::new(generator, store, tx)
            .with_picker(MessagePicker::with_seed(7))
            .with_audio(AudioEngine::muted().with_fades(FadeTimings::fast()));
        (hearth, rx)
    }

    /// Let spawned generation tasks land, then drain them
    async fn settle<Gen: MessageGenerator + 'static>(hearth: &mut Hearth<Gen>) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        hearth.poll().await;
    }

    fn drain(rx: &mut mpsc::Receiver<HearthMessage>) -> Vec<HearthMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    fn presented_texts(messages: &[HearthMessage]) -> Vec<String> {
        messages
            .iter()
            .filter_map(|msg| match msg {
                HearthMessage::MessageReady { message } => Some(message.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_start_announces_collections_and_first_light() {
        let (generator, calls) = CannedGenerator::new();
        let (mut hearth, mut rx) = hearth_with(generator, Arc::new(MemoryStore::new()));

        hearth.start().await.unwrap();
        settle(&mut hearth).await;

        let messages = drain(&mut rx);
        assert!(messages
            .iter()
            .any(|m| matches!(m, HearthMessage::GoalsChanged { goals } if goals.is_empty())));
        assert!(messages
            .iter()
            .any(|m| matches!(m, HearthMessage::SavedChanged { saved } if saved.is_empty())));
        assert_eq!(presented_texts(&messages), vec!["A soft canned thought."]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(hearth.state(), HearthState::Ready);
    }

    #[tokio::test]
    async fn test_generator_failure_presents_fallback_never_errors() {
        let (mut hearth, mut rx) = hearth_with(BrokenGenerator, Arc::new(MemoryStore::new()));

        hearth
            .handle_event(SurfaceEvent::MessageRequested)
            .await
            .unwrap();
        settle(&mut hearth).await;

        let messages = drain(&mut rx);
        let texts = presented_texts(&messages);
        assert_eq!(texts.len(), 1);
        assert!(!texts[0].is_empty());

        let fallback = messages
            .iter()
            .find_map(|m| match m {
                HearthMessage::MessageReady { message } => Some(message),
                _ => None,
            })
            .unwrap();
        assert_eq!(fallback.kind, MessageKind::Quote);
        assert_eq!(fallback.author.as_deref(), Some("Ember"));

        assert!(messages.iter().any(|m| matches!(
            m,
            HearthMessage::Notify {
                level: NotifyLevel::Warning,
                message,
            } if message == FALLBACK_NOTICE
        )));
        assert_eq!(hearth.state(), HearthState::Ready);
    }

    #[tokio::test]
    async fn test_fresh_daily_cache_skips_the_generator() {
        let store = Arc::new(MemoryStore::new());
        let cached = DailyQuote::for_today(
            GentleMessage::new("Yesterday's light still shines.", MessageKind::Daily),
        );
        store
            .put(DAILY_KEY, &serde_json::to_string(&cached).unwrap())
            .unwrap();

        let (generator, calls) = CannedGenerator::new();
        let (mut hearth, mut rx) = hearth_with(generator, store);

        hearth.start().await.unwrap();
        settle(&mut hearth).await;
        hearth
            .handle_event(SurfaceEvent::DailyRequested)
            .await
            .unwrap();
        settle(&mut hearth).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let texts = presented_texts(&drain(&mut rx));
        assert_eq!(
            texts,
            vec![
                "Yesterday's light still shines.",
                "Yesterday's light still shines."
            ]
        );
    }

    #[tokio::test]
    async fn test_daily_request_without_cache_generates_and_caches() {
        let store = Arc::new(MemoryStore::new());
        let (generator, calls) = CannedGenerator::new();
        let (mut hearth, mut rx) = hearth_with(generator, Arc::clone(&store) as Arc<dyn SnapshotStore>);

        hearth
            .handle_event(SurfaceEvent::DailyRequested)
            .await
            .unwrap();
        settle(&mut hearth).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(presented_texts(&drain(&mut rx)).len(), 1);

        let raw = store.get(DAILY_KEY).unwrap().expect("daily cache persisted");
        let cached: DailyQuote = serde_json::from_str(&raw).unwrap();
        assert!(cached.is_fresh());

        // The freshly written cache now answers without the generator.
        hearth
            .handle_event(SurfaceEvent::DailyRequested)
            .await
            .unwrap();
        settle(&mut hearth).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_goal_completion_celebrates_with_context() {
        let store = Arc::new(MemoryStore::new());
        let (generator, _calls) = CannedGenerator::new();
        let (mut hearth, mut rx) = hearth_with(generator, store);

        hearth
            .handle_event(SurfaceEvent::GoalCreated {
                text: "Drink water".to_string(),
                total_steps: 3,
            })
            .await
            .unwrap();
        let id = hearth.goals().all().next().unwrap().id.clone();

        for step in 1..=3 {
            hearth
                .handle_event(SurfaceEvent::GoalStepSet {
                    id: id.clone(),
                    step,
                })
                .await
                .unwrap();
        }
        settle(&mut hearth).await;

        let goal = hearth.goals().get(&id).unwrap();
        assert_eq!(goal.current_steps, 3);
        assert!(goal.is_completed);

        let messages = drain(&mut rx);
        let celebration = messages
            .iter()
            .find_map(|m| match m {
                HearthMessage::MessageReady { message }
                    if message.kind == MessageKind::GoalCompletion =>
                {
                    Some(message)
                }
                _ => None,
            })
            .expect("celebration presented");
        assert!(celebration.text.contains("Drink water"));
    }

    #[tokio::test]
    async fn test_completed_goal_rejects_further_steps() {
        let (generator, _calls) = CannedGenerator::new();
        let (mut hearth, mut rx) = hearth_with(generator, Arc::new(MemoryStore::new()));

        hearth
            .handle_event(SurfaceEvent::GoalCreated {
                text: "Stretch".to_string(),
                total_steps: 1,
            })
            .await
            .unwrap();
        let id = hearth.goals().all().next().unwrap().id.clone();
        hearth
            .handle_event(SurfaceEvent::GoalStepSet {
                id: id.clone(),
                step: 1,
            })
            .await
            .unwrap();
        settle(&mut hearth).await;
        drain(&mut rx);

        // A later lower press changes nothing and announces nothing.
        hearth
            .handle_event(SurfaceEvent::GoalStepSet {
                id: id.clone(),
                step: 0,
            })
            .await
            .unwrap();
        let messages = drain(&mut rx);
        assert!(messages.is_empty());
        let goal = hearth.goals().get(&id).unwrap();
        assert_eq!(goal.current_steps, 1);
        assert!(goal.is_completed);
    }

    #[tokio::test]
    async fn test_goal_mutations_persist() {
        let store = Arc::new(MemoryStore::new());
        let (generator, _calls) = CannedGenerator::new();
        let (mut hearth, _rx) = hearth_with(generator, Arc::clone(&store) as Arc<dyn SnapshotStore>);

        hearth
            .handle_event(SurfaceEvent::GoalCreated {
                text: "Water the plants".to_string(),
                total_steps: 2,
            })
            .await
            .unwrap();

        let raw = store.get(GOALS_KEY).unwrap().expect("goals persisted");
        assert!(raw.contains("Water the plants"));
        assert!(raw.contains("\"totalSteps\":2"));
    }

    #[tokio::test]
    async fn test_save_toggle_round_trips_through_events() {
        let store = Arc::new(MemoryStore::new());
        let (generator, _calls) = CannedGenerator::new();
        let (mut hearth, mut rx) = hearth_with(generator, Arc::clone(&store) as Arc<dyn SnapshotStore>);

        let message = GentleMessage::new("Keep this one", MessageKind::Quote);
        hearth
            .handle_event(SurfaceEvent::SaveToggled {
                message: message.clone(),
            })
            .await
            .unwrap();
        assert!(hearth.saved().is_saved("Keep this one"));
        assert!(store.get(SAVED_KEY).unwrap().unwrap().contains("Keep this one"));
        // Saving sounds like progress, unsaving like an undo.
        assert_eq!(hearth.audio().last_cue(), Some(CueKind::Progress));

        hearth
            .handle_event(SurfaceEvent::SaveToggled { message })
            .await
            .unwrap();
        assert!(hearth.saved().is_empty());
        assert_eq!(store.get(SAVED_KEY).unwrap().unwrap(), "[]");
        assert_eq!(hearth.audio().last_cue(), Some(CueKind::Undo));

        let changes = drain(&mut rx)
            .into_iter()
            .filter(|m| matches!(m, HearthMessage::SavedChanged { .. }))
            .count();
        assert_eq!(changes, 2);
    }

    #[tokio::test]
    async fn test_invalid_goal_event_becomes_a_notice() {
        let (generator, _calls) = CannedGenerator::new();
        let (mut hearth, mut rx) = hearth_with(generator, Arc::new(MemoryStore::new()));

        hearth
            .handle_event(SurfaceEvent::GoalCreated {
                text: "   ".to_string(),
                total_steps: 3,
            })
            .await
            .unwrap();

        let messages = drain(&mut rx);
        assert!(messages.iter().any(|m| matches!(
            m,
            HearthMessage::Notify {
                level: NotifyLevel::Warning,
                ..
            }
        )));
        assert!(hearth.goals().is_empty());
    }

    #[tokio::test]
    async fn test_ambience_selection_flows_through() {
        let (generator, _calls) = CannedGenerator::new();
        let (mut hearth, mut rx) = hearth_with(generator, Arc::new(MemoryStore::new()));

        hearth
            .handle_event(SurfaceEvent::AmbienceSelected {
                ambience: Some(AmbienceKind::Rain),
            })
            .await
            .unwrap();
        assert_eq!(hearth.audio().ambience(), Some(AmbienceKind::Rain));

        hearth
            .handle_event(SurfaceEvent::AmbienceSelected { ambience: None })
            .await
            .unwrap();
        assert_eq!(hearth.audio().ambience(), None);

        let announced: Vec<_> = drain(&mut rx)
            .into_iter()
            .filter_map(|m| match m {
                HearthMessage::AmbienceChanged { ambience } => Some(ambience),
                _ => None,
            })
            .collect();
        assert_eq!(announced, vec![Some(AmbienceKind::Rain), None]);
    }

    #[tokio::test]
    async fn test_quit_sends_farewell() {
        let (generator, _calls) = CannedGenerator::new();
        let (mut hearth, mut rx) = hearth_with(generator, Arc::new(MemoryStore::new()));

        hearth
            .handle_event(SurfaceEvent::QuitRequested)
            .await
            .unwrap();

        let messages = drain(&mut rx);
        assert!(messages.iter().any(|m| matches!(
            m,
            HearthMessage::State {
                state: HearthState::ShuttingDown
            }
        )));
        assert!(messages
            .iter()
            .any(|m| matches!(m, HearthMessage::Quit { farewell: Some(_) })));
    }
}
