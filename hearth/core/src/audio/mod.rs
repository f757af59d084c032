//! Ambient Audio Engine
//!
//! Owns the output device, plays one-shot cues, and runs at most one
//! ambience session (rain, wind or chimes) at a time. Everything audible
//! is synthesized in [`synth`]; this module is lifecycle.
//!
//! # Sessions
//!
//! Each `start_ambience` builds a fresh session object: its own sink, its
//! own gain target, its own unique id. Switching beds fades the old
//! session's gain to zero and hands the whole session to a delayed
//! teardown task that stops the sink after the tail. Because the task owns
//! the old session outright, a pending teardown can never touch a newer
//! one.
//!
//! The engine opens the output device lazily, on the first sound that
//! needs it. A muted engine never opens a device and tracks sessions
//! logically, which is what headless runs and tests use. Teardown is
//! scheduled on the Tokio runtime.

pub mod synth;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::message::MessageKind;
use synth::{Fader, SharedGain, Tone, AMBIENT_LEVEL};

/// Error when the audio device misbehaves
///
/// The Hearth logs these and moves on; sound is never load-bearing.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No output device could be opened
    #[error("No audio output device: {0}")]
    Device(#[from] rodio::StreamError),
    /// The device rejected a source
    #[error("Playback failed: {0}")]
    Playback(#[from] rodio::PlayError),
}

/// Continuous background textures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbienceKind {
    /// Filtered patter
    Rain,
    /// Gusting rumble
    Wind,
    /// Slow pentatonic chimes
    Chimes,
}

impl AmbienceKind {
    /// Every bed, in selector order
    pub const ALL: [Self; 3] = [Self::Rain, Self::Wind, Self::Chimes];

    /// Selector label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rain => "Rain",
            Self::Wind => "Wind",
            Self::Chimes => "Chimes",
        }
    }
}

/// One-shot cue identities
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueKind {
    /// New quote arrived
    Quote,
    /// New compliment arrived
    Compliment,
    /// A goal was finished
    Completion,
    /// Something was undone or removed
    Undo,
    /// A small step forward
    Progress,
}

/// One synthesized note of a cue
struct Note {
    freq: f32,
    secs: f32,
    peak: f32,
    offset_ms: u64,
}

const QUOTE_NOTES: &[Note] = &[Note {
    freq: 440.0,
    secs: 1.5,
    peak: 0.10,
    offset_ms: 0,
}];

const COMPLIMENT_NOTES: &[Note] = &[
    Note {
        freq: 523.25,
        secs: 1.2,
        peak: 0.08,
        offset_ms: 0,
    },
    Note {
        freq: 659.25,
        secs: 1.5,
        peak: 0.06,
        offset_ms: 100,
    },
];

const COMPLETION_NOTES: &[Note] = &[
    Note {
        freq: 261.63,
        secs: 2.5,
        peak: 0.10,
        offset_ms: 0,
    },
    Note {
        freq: 329.63,
        secs: 2.5,
        peak: 0.08,
        offset_ms: 100,
    },
    Note {
        freq: 392.00,
        secs: 2.5,
        peak: 0.06,
        offset_ms: 200,
    },
    Note {
        freq: 523.25,
        secs: 3.0,
        peak: 0.04,
        offset_ms: 300,
    },
];

const UNDO_NOTES: &[Note] = &[Note {
    freq: 220.0,
    secs: 0.4,
    peak: 0.05,
    offset_ms: 0,
}];

const PROGRESS_NOTES: &[Note] = &[Note {
    freq: 880.0,
    secs: 0.3,
    peak: 0.03,
    offset_ms: 0,
}];

impl CueKind {
    /// Cue played when a message of this kind is presented
    #[must_use]
    pub fn for_message(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Compliment => Self::Compliment,
            MessageKind::GoalCompletion => Self::Completion,
            MessageKind::Quote | MessageKind::Daily => Self::Quote,
        }
    }

    fn notes(self) -> &'static [Note] {
        match self {
            Self::Quote => QUOTE_NOTES,
            Self::Compliment => COMPLIMENT_NOTES,
            Self::Completion => COMPLETION_NOTES,
            Self::Undo => UNDO_NOTES,
            Self::Progress => PROGRESS_NOTES,
        }
    }
}

/// Fade and teardown timing for ambience sessions
#[derive(Clone, Copy, Debug)]
pub struct FadeTimings {
    /// Linear rise of the master gain on start
    pub fade_in: Duration,
    /// Exponential fall of the master gain on stop
    pub fade_out: Duration,
    /// How long after a stop the session's sink is torn down
    pub cleanup_delay: Duration,
}

impl Default for FadeTimings {
    fn default() -> Self {
        Self {
            fade_in: Duration::from_secs(2),
            fade_out: Duration::from_millis(1500),
            cleanup_delay: Duration::from_millis(1600),
        }
    }
}

impl FadeTimings {
    /// Short timings so lifecycle tests finish quickly
    #[must_use]
    pub fn fast() -> Self {
        Self {
            fade_in: Duration::from_millis(10),
            fade_out: Duration::from_millis(10),
            cleanup_delay: Duration::from_millis(30),
        }
    }
}

/// Counts sessions that have not been torn down yet
struct LiveGuard {
    counter: Arc<AtomicUsize>,
}

impl LiveGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Where a session's sound actually goes
enum Voice {
    /// A sink on the output device
    Device(Sink),
    /// Nowhere; the session is only tracked
    Muted,
}

/// An active ambience bed and its controls
struct AmbienceSession {
    id: u64,
    kind: AmbienceKind,
    gain: SharedGain,
    voice: Voice,
    _live: LiveGuard,
}

impl AmbienceSession {
    fn finish(self) {
        tracing::debug!("Ambience session {} torn down", self.id);
        if let Voice::Device(sink) = self.voice {
            sink.stop();
        }
    }
}

/// The open output device
struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Cue playback and ambience lifecycle
pub struct AudioEngine {
    output: Option<AudioOutput>,
    muted: bool,
    fades: FadeTimings,
    session: Option<AmbienceSession>,
    live: Arc<AtomicUsize>,
    next_session_id: u64,
    last_cue: Option<CueKind>,
}

impl AudioEngine {
    /// Engine that will open the default output device when first needed
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: None,
            muted: false,
            fades: FadeTimings::default(),
            session: None,
            live: Arc::new(AtomicUsize::new(0)),
            next_session_id: 0,
            last_cue: None,
        }
    }

    /// Engine that never opens a device
    #[must_use]
    pub fn muted() -> Self {
        let mut engine = Self::new();
        engine.muted = true;
        engine
    }

    /// Override the fade timings
    #[must_use]
    pub fn with_fades(mut self, fades: FadeTimings) -> Self {
        self.fades = fades;
        self
    }

    /// Whether this engine is muted
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// The currently playing bed, if any
    #[must_use]
    pub fn ambience(&self) -> Option<AmbienceKind> {
        self.session.as_ref().map(|session| session.kind)
    }

    /// Sessions that exist right now, fading ones included
    #[must_use]
    pub fn live_sessions(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// The most recently accepted cue
    ///
    /// Recorded whether or not the engine is muted.
    #[must_use]
    pub fn last_cue(&self) -> Option<CueKind> {
        self.last_cue
    }

    /// Play a one-shot cue
    ///
    /// Muted engines accept every cue silently.
    pub fn play_cue(&mut self, cue: CueKind) -> Result<(), AudioError> {
        self.last_cue = Some(cue);
        if self.muted {
            return Ok(());
        }
        let handle = self.ensure_output()?;
        for note in cue.notes() {
            let tone = Tone::new(note.freq, Duration::from_secs_f32(note.secs), note.peak);
            handle.play_raw(tone.delay(Duration::from_millis(note.offset_ms)))?;
        }
        tracing::debug!("Played cue {:?}", cue);
        Ok(())
    }

    /// Start an ambience bed, replacing any other
    ///
    /// The previous session fades out on its own while the new one fades
    /// in. Selecting the bed that is already playing keeps it untouched.
    pub fn start_ambience(&mut self, kind: AmbienceKind) -> Result<(), AudioError> {
        if self.session.as_ref().is_some_and(|s| s.kind == kind) {
            return Ok(());
        }
        self.stop_ambience();

        let gain = SharedGain::new(AMBIENT_LEVEL);
        let voice = if self.muted {
            Voice::Muted
        } else {
            let handle = self.ensure_output()?;
            let sink = Sink::try_new(&handle)?;
            let mut rng = StdRng::from_entropy();
            let fade_in = self.fades.fade_in;
            let fade_out = self.fades.fade_out;
            match kind {
                AmbienceKind::Rain => {
                    sink.append(Fader::new(synth::rain_bed(&mut rng), gain.clone(), fade_in, fade_out));
                }
                AmbienceKind::Wind => {
                    sink.append(Fader::new(synth::wind_bed(&mut rng), gain.clone(), fade_in, fade_out));
                }
                AmbienceKind::Chimes => {
                    sink.append(Fader::new(synth::chime_bed(&mut rng), gain.clone(), fade_in, fade_out));
                }
            }
            Voice::Device(sink)
        };

        self.next_session_id += 1;
        tracing::debug!("Ambience session {} started: {:?}", self.next_session_id, kind);
        self.session = Some(AmbienceSession {
            id: self.next_session_id,
            kind,
            gain,
            voice,
            _live: LiveGuard::new(Arc::clone(&self.live)),
        });
        Ok(())
    }

    /// Fade out and schedule teardown of the current bed
    pub fn stop_ambience(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        session.gain.set(0.0);
        let delay = self.fades.cleanup_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            session.finish();
        });
    }

    fn ensure_output(&mut self) -> Result<OutputStreamHandle, AudioError> {
        if let Some(output) = &self.output {
            return Ok(output.handle.clone());
        }
        let (stream, handle) = OutputStream::try_default()?;
        tracing::info!("Audio output opened");
        self.output = Some(AudioOutput {
            _stream: stream,
            handle: handle.clone(),
        });
        Ok(handle)
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}
