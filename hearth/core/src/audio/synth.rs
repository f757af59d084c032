//! Procedural Sound Sources
//!
//! Everything Ember plays is synthesized here, sample by sample, as rodio
//! [`Source`] implementations. No audio assets ship with the app.
//!
//! - [`Tone`]: a sine with a short linear attack and an exponential decay,
//!   the building block of every cue and chime.
//! - [`LoopingNoise`]: a pre-rendered leaky-integrator noise buffer looped
//!   forever, the raw bed for rain and wind.
//! - [`LowPass`]: an RBJ biquad lowpass, either fixed (rain) or with a
//!   slowly gusting cutoff (wind).
//! - [`ChimeField`]: an endless field of overlapping pentatonic chimes,
//!   scheduled in the sample domain so nothing outlives its session.
//! - [`Fader`]: the master gain of an ambience session, sliding toward a
//!   shared target so fade-in and fade-out need no timers.
//!
//! All sources are mono at [`SAMPLE_RATE`] and produce `f32` samples.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use rodio::Source;

/// Samples per second for every synthesized source
pub const SAMPLE_RATE: u32 = 44_100;

/// Master level ambient beds settle at
pub const AMBIENT_LEVEL: f32 = 0.05;

// Cue/chime envelope shape
const TONE_ATTACK: Duration = Duration::from_millis(50);
const TONE_FLOOR: f32 = 0.001;

// Fade envelope endpoints
const FADE_FLOOR: f32 = 0.001;
const SILENCE_FLOOR: f32 = 1.0e-4;

// Noise beds: 2 seconds of buffer, looped
const NOISE_SAMPLES: usize = (2 * SAMPLE_RATE) as usize;
const WIND_LEAK: f32 = 0.02;
const WIND_LEVEL: f32 = 3.5;
const RAIN_LEAK: f32 = 0.1;
const RAIN_LEVEL: f32 = 1.5;

// Filter tunings
const WIND_CUTOFF_HZ: f32 = 400.0;
const WIND_Q: f32 = 5.0;
const RAIN_CUTOFF_HZ: f32 = 1200.0;
const RAIN_Q: f32 = 1.0;

// Wind gusts: new random cutoff in [200, 1000] Hz every 4 s, ramped over 3 s.
// Coefficients are recomputed once per control block, not per sample.
const CONTROL_INTERVAL: u32 = 128;
const GUST_MIN_HZ: f32 = 200.0;
const GUST_SPAN_HZ: f32 = 800.0;
const GUST_INTERVAL_BLOCKS: u32 = 4 * SAMPLE_RATE / CONTROL_INTERVAL;
const GUST_RAMP_BLOCKS: u32 = 3 * SAMPLE_RATE / CONTROL_INTERVAL;

// Chimes: C-major pentatonic, one every 3 s, long randomized decays
const PENTATONIC: [f32; 5] = [523.25, 659.25, 783.99, 987.77, 1046.50];
const CHIME_INTERVAL_SAMPLES: u32 = 3 * SAMPLE_RATE;
const CHIME_ATTACK: Duration = Duration::from_secs(1);
const CHIME_LEVEL: f32 = 0.02;
const CHIME_MIN_DECAY_SECS: f32 = 4.0;
const CHIME_DECAY_SPAN_SECS: f32 = 4.0;

// ============================================
// Tone
// ============================================

/// A single decaying sine tone
///
/// The envelope rises linearly to `peak` over the attack, then decays
/// exponentially so the tail reaches the noise floor exactly when the
/// tone ends.
#[derive(Clone, Debug)]
pub struct Tone {
    phase: f32,
    phase_inc: f32,
    peak: f32,
    amp: f32,
    decay_ratio: f32,
    attack_samples: u32,
    total_samples: u32,
    position: u32,
    duration: Duration,
}

impl Tone {
    /// Tone with the standard 50 ms cue attack
    #[must_use]
    pub fn new(freq: f32, duration: Duration, peak: f32) -> Self {
        Self::with_attack(freq, duration, peak, TONE_ATTACK)
    }

    /// Tone with an explicit attack, used for slow chime swells
    #[must_use]
    pub fn with_attack(freq: f32, duration: Duration, peak: f32, attack: Duration) -> Self {
        let sample_rate = SAMPLE_RATE as f32;
        let total_samples = ((duration.as_secs_f32() * sample_rate) as u32).max(1);
        let attack_samples =
            ((attack.as_secs_f32() * sample_rate) as u32).min(total_samples.saturating_sub(1));
        let decay_samples = (total_samples - attack_samples).max(1);
        let decay_ratio = (TONE_FLOOR / peak).powf(1.0 / decay_samples as f32);

        Self {
            phase: 0.0,
            phase_inc: freq / sample_rate,
            peak,
            amp: peak,
            decay_ratio,
            attack_samples,
            total_samples,
            position: 0,
            duration,
        }
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.position >= self.total_samples {
            return None;
        }

        let env = if self.position < self.attack_samples {
            self.peak * (self.position + 1) as f32 / self.attack_samples as f32
        } else {
            self.amp *= self.decay_ratio;
            self.amp
        };

        let sample = (self.phase * std::f32::consts::TAU).sin() * env;
        self.phase = (self.phase + self.phase_inc).fract();
        self.position += 1;
        Some(sample)
    }
}

impl Source for Tone {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.duration)
    }
}

// ============================================
// Noise beds
// ============================================

/// Pre-rendered noise buffer, looped without end
#[derive(Clone, Debug)]
pub struct LoopingNoise {
    buffer: Vec<f32>,
    position: usize,
}

impl LoopingNoise {
    /// Dark rumbling noise for the wind bed
    #[must_use]
    pub fn wind(rng: &mut StdRng) -> Self {
        Self::from_buffer(noise_buffer(WIND_LEAK, WIND_LEVEL, NOISE_SAMPLES, rng))
    }

    /// Brighter patter noise for the rain bed
    #[must_use]
    pub fn rain(rng: &mut StdRng) -> Self {
        Self::from_buffer(noise_buffer(RAIN_LEAK, RAIN_LEVEL, NOISE_SAMPLES, rng))
    }

    pub(crate) fn from_buffer(buffer: Vec<f32>) -> Self {
        debug_assert!(!buffer.is_empty());
        Self {
            buffer,
            position: 0,
        }
    }
}

/// Render a leaky-integrator noise buffer
///
/// `y[n] = (y[n-1] + leak * white[n]) / (1 + leak)`, scaled by `level`.
/// Small leaks integrate harder and sound darker.
fn noise_buffer(leak: f32, level: f32, len: usize, rng: &mut StdRng) -> Vec<f32> {
    let mut last = 0.0_f32;
    (0..len)
        .map(|_| {
            let white = rng.gen::<f32>() * 2.0 - 1.0;
            last = (last + leak * white) / (1.0 + leak);
            last * level
        })
        .collect()
}

impl Iterator for LoopingNoise {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.buffer[self.position];
        self.position = (self.position + 1) % self.buffer.len();
        Some(sample)
    }
}

impl Source for LoopingNoise {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

// ============================================
// Lowpass filter
// ============================================

/// RBJ biquad lowpass over another source
///
/// Rain uses a fixed cutoff; wind adds a gust that retunes the cutoff
/// toward a new random target every few seconds.
#[derive(Debug)]
pub struct LowPass<S> {
    inner: S,
    cutoff: f32,
    q: f32,
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
    gust: Option<Gust>,
    control_countdown: u32,
}

/// Slow random retuning of a filter cutoff
#[derive(Debug)]
struct Gust {
    rng: StdRng,
    target: f32,
    ramp_ratio: f32,
    ramp_blocks_left: u32,
    blocks_until_pick: u32,
}

impl Gust {
    /// Advance one control block; returns the new cutoff while ramping
    fn advance(&mut self, cutoff: f32) -> Option<f32> {
        if self.blocks_until_pick == 0 {
            self.blocks_until_pick = GUST_INTERVAL_BLOCKS;
            self.target = GUST_MIN_HZ + self.rng.gen::<f32>() * GUST_SPAN_HZ;
            self.ramp_blocks_left = GUST_RAMP_BLOCKS;
            self.ramp_ratio = (self.target / cutoff).powf(1.0 / GUST_RAMP_BLOCKS as f32);
        } else {
            self.blocks_until_pick -= 1;
        }

        if self.ramp_blocks_left > 0 {
            self.ramp_blocks_left -= 1;
            if self.ramp_blocks_left == 0 {
                Some(self.target)
            } else {
                Some(cutoff * self.ramp_ratio)
            }
        } else {
            None
        }
    }
}

impl<S> LowPass<S>
where
    S: Source<Item = f32>,
{
    /// Lowpass with a fixed cutoff
    pub fn fixed(inner: S, cutoff: f32, q: f32) -> Self {
        let mut filter = Self {
            inner,
            cutoff,
            q,
            b0: 0.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            gust: None,
            control_countdown: 0,
        };
        filter.recompute();
        filter
    }

    /// Lowpass whose cutoff wanders, for gusting wind
    pub fn gusting(inner: S, cutoff: f32, q: f32, rng: StdRng) -> Self {
        let mut filter = Self::fixed(inner, cutoff, q);
        filter.gust = Some(Gust {
            rng,
            target: cutoff,
            ramp_ratio: 1.0,
            ramp_blocks_left: 0,
            blocks_until_pick: GUST_INTERVAL_BLOCKS,
        });
        filter
    }

    /// Current cutoff frequency in Hz
    #[must_use]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    fn recompute(&mut self) {
        let w0 = std::f32::consts::TAU * self.cutoff / SAMPLE_RATE as f32;
        let alpha = w0.sin() / (2.0 * self.q);
        let cos_w0 = w0.cos();
        let a0 = 1.0 + alpha;

        self.b0 = ((1.0 - cos_w0) / 2.0) / a0;
        self.b1 = (1.0 - cos_w0) / a0;
        self.b2 = self.b0;
        self.a1 = (-2.0 * cos_w0) / a0;
        self.a2 = (1.0 - alpha) / a0;
    }

    fn control_tick(&mut self) {
        let cutoff = self.cutoff;
        let retuned = match self.gust.as_mut() {
            Some(gust) => gust.advance(cutoff),
            None => None,
        };
        if let Some(new_cutoff) = retuned {
            self.cutoff = new_cutoff;
            self.recompute();
        }
    }
}

impl<S> Iterator for LowPass<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.control_countdown == 0 {
            self.control_countdown = CONTROL_INTERVAL;
            self.control_tick();
        }
        self.control_countdown -= 1;

        let x = self.inner.next()?;
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        Some(y)
    }
}

impl<S> Source for LowPass<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}

// ============================================
// Chimes
// ============================================

/// Endless field of overlapping pentatonic chimes
///
/// A new chime starts every three seconds with a random note and a long
/// random decay. Scheduling happens per sample, so the whole field lives
/// and dies with the one source object.
#[derive(Debug)]
pub struct ChimeField {
    rng: StdRng,
    until_next: u32,
    chimes: Vec<Tone>,
}

impl ChimeField {
    /// Empty field; the first chime arrives after one interval
    #[must_use]
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            until_next: CHIME_INTERVAL_SAMPLES,
            chimes: Vec::new(),
        }
    }
}

impl Iterator for ChimeField {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.until_next == 0 {
            self.until_next = CHIME_INTERVAL_SAMPLES;
            let freq = PENTATONIC[self.rng.gen_range(0..PENTATONIC.len())];
            let secs = CHIME_MIN_DECAY_SECS + self.rng.gen::<f32>() * CHIME_DECAY_SPAN_SECS;
            self.chimes.push(Tone::with_attack(
                freq,
                Duration::from_secs_f32(secs),
                CHIME_LEVEL,
                CHIME_ATTACK,
            ));
        }
        self.until_next -= 1;

        let mut mix = 0.0;
        let mut i = 0;
        while i < self.chimes.len() {
            match self.chimes[i].next() {
                Some(sample) => {
                    mix += sample;
                    i += 1;
                }
                None => {
                    self.chimes.swap_remove(i);
                }
            }
        }
        Some(mix)
    }
}

impl Source for ChimeField {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

// ============================================
// Master fade
// ============================================

/// Gain target shared between an ambience session and its fader
///
/// Stored as `f32` bits in an atomic so the audio thread reads it without
/// locking.
#[derive(Clone, Debug)]
pub struct SharedGain(Arc<AtomicU32>);

impl SharedGain {
    /// New target at the given level
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(Arc::new(AtomicU32::new(value.to_bits())))
    }

    /// Set the target level
    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Read the target level
    #[must_use]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// Master gain stage of an ambience session
///
/// Rises linearly toward the shared target and falls exponentially away
/// from it, one step per sample. Dropping the target to zero is the whole
/// fade-out mechanism; teardown just waits for the tail.
#[derive(Debug)]
pub struct Fader<S> {
    inner: S,
    target: SharedGain,
    gain: f32,
    rise_per_sample: f32,
    fall_ratio: f32,
}

impl<S> Fader<S>
where
    S: Source<Item = f32>,
{
    /// Fade `inner` toward `target`, silent at first
    pub fn new(inner: S, target: SharedGain, fade_in: Duration, fade_out: Duration) -> Self {
        let sample_rate = SAMPLE_RATE as f32;
        let rise_per_sample = AMBIENT_LEVEL / (fade_in.as_secs_f32() * sample_rate).max(1.0);
        let fall_ratio =
            (FADE_FLOOR / AMBIENT_LEVEL).powf(1.0 / (fade_out.as_secs_f32() * sample_rate).max(1.0));

        Self {
            inner,
            target,
            gain: 0.0,
            rise_per_sample,
            fall_ratio,
        }
    }
}

impl<S> Iterator for Fader<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let target = self.target.get();
        if self.gain < target {
            self.gain = (self.gain + self.rise_per_sample).min(target);
        } else if self.gain > target {
            self.gain = (self.gain * self.fall_ratio).max(target);
            if self.gain < SILENCE_FLOOR && target < SILENCE_FLOOR {
                self.gain = target;
            }
        }
        self.inner.next().map(|sample| sample * self.gain)
    }
}

impl<S> Source for Fader<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}

// ============================================
// Bed builders
// ============================================

/// Gusting filtered noise for wind
pub fn wind_bed(rng: &mut StdRng) -> LowPass<LoopingNoise> {
    use rand::SeedableRng;
    let gust_rng = StdRng::seed_from_u64(rng.gen());
    LowPass::gusting(LoopingNoise::wind(rng), WIND_CUTOFF_HZ, WIND_Q, gust_rng)
}

/// Fixed filtered noise for rain
pub fn rain_bed(rng: &mut StdRng) -> LowPass<LoopingNoise> {
    LowPass::fixed(LoopingNoise::rain(rng), RAIN_CUTOFF_HZ, RAIN_Q)
}

/// Pentatonic chime field
pub fn chime_bed(rng: &mut StdRng) -> ChimeField {
    use rand::SeedableRng;
    ChimeField::new(StdRng::seed_from_u64(rng.gen()))
}
