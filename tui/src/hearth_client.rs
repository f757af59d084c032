//! Hearth Client
//!
//! Thin wrapper around the Hearth for TUI integration. This client embeds
//! the Hearth directly (no network) and provides a convenient interface
//! for sending events and receiving messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any business logic.
//! All orchestration happens in the Hearth. The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to the Hearth
//! 3. Receive HearthMessages
//! 4. Render display state based on messages

use std::sync::Arc;

use tokio::sync::mpsc;

use hearth_core::{
    AmbienceKind, AudioEngine, EmberConfigFile, GeminiGenerator, GentleMessage, GoalId, Hearth,
    HearthMessage, HearthState, JsonFileStore, MemoryStore, SnapshotStore, SurfaceEvent,
};

/// Client for communicating with the embedded Hearth
pub struct HearthClient {
    /// The embedded Hearth instance
    hearth: Hearth<GeminiGenerator>,
    /// Receiver for messages from the Hearth
    rx: mpsc::Receiver<HearthMessage>,
}

impl HearthClient {
    /// Create a new HearthClient wired from the given configuration
    pub fn new(config: &EmberConfigFile) -> Self {
        // Channel for Hearth -> TUI messages
        let (tx, rx) = mpsc::channel(100);

        let generator =
            GeminiGenerator::new(config.api_key.clone()).with_model(config.model.clone());

        let store: Arc<dyn SnapshotStore> = match &config.data_dir {
            Some(dir) => Arc::new(JsonFileStore::open(dir)),
            None => match JsonFileStore::open_default() {
                Some(store) => Arc::new(store),
                None => {
                    tracing::warn!("No data directory; snapshots stay in memory");
                    Arc::new(MemoryStore::new())
                }
            },
        };

        let mut hearth = Hearth::new(generator, store, tx);
        if !config.audio_enabled {
            hearth = hearth.with_audio(AudioEngine::muted());
        }

        Self { hearth, rx }
    }

    /// Start the Hearth (load snapshots and bring first light)
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.hearth.start().await
    }

    /// Ask for a fresh quote or compliment
    pub async fn request_message(&mut self) -> anyhow::Result<()> {
        self.hearth.handle_event(SurfaceEvent::MessageRequested).await
    }

    /// Ask for the quote of the day
    pub async fn request_daily(&mut self) -> anyhow::Result<()> {
        self.hearth.handle_event(SurfaceEvent::DailyRequested).await
    }

    /// Create a new daily focus
    pub async fn create_goal(&mut self, text: String, total_steps: u32) -> anyhow::Result<()> {
        self.hearth
            .handle_event(SurfaceEvent::GoalCreated { text, total_steps })
            .await
    }

    /// Move a focus to an absolute step
    pub async fn set_goal_step(&mut self, id: GoalId, step: u32) -> anyhow::Result<()> {
        self.hearth
            .handle_event(SurfaceEvent::GoalStepSet { id, step })
            .await
    }

    /// Remove a focus
    pub async fn remove_goal(&mut self, id: GoalId) -> anyhow::Result<()> {
        self.hearth.handle_event(SurfaceEvent::GoalRemoved { id }).await
    }

    /// Save or unsave a message
    pub async fn toggle_save(&mut self, message: GentleMessage) -> anyhow::Result<()> {
        self.hearth
            .handle_event(SurfaceEvent::SaveToggled { message })
            .await
    }

    /// Select an ambience bed, or silence
    pub async fn select_ambience(&mut self, ambience: Option<AmbienceKind>) -> anyhow::Result<()> {
        self.hearth
            .handle_event(SurfaceEvent::AmbienceSelected { ambience })
            .await
    }

    /// Notify the Hearth that the user wants to quit
    pub async fn request_quit(&mut self) -> anyhow::Result<()> {
        self.hearth.handle_event(SurfaceEvent::QuitRequested).await
    }

    /// Drain finished generation tasks (must be called regularly)
    pub async fn poll(&mut self) -> bool {
        self.hearth.poll().await
    }

    /// Receive all pending messages from the Hearth (non-blocking)
    pub fn recv_all(&mut self) -> Vec<HearthMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Get the current Hearth state
    pub fn state(&self) -> HearthState {
        self.hearth.state()
    }
}
