//! Mode pattern library.
//!
//! Discrete modes are step tables the LED state machine walks through;
//! continuous modes are closed-form functions of time (fades, the pulse
//! family) or of a per-LED pseudo-random sequence (the flicker family).

use crate::math8::{ease8_in_out, lerp8, scale8};
use crate::types::{Mode, ModeParams};

/// Intensity of [`Mode::Dim`] (about 19%).
pub const DIM_LEVEL: u8 = 48;

/// Baseline and band of the candle flicker.
const CANDLE_BASE: u8 = 140;
const CANDLE_SPAN: u8 = 100;

/// Random values below this blank the LED in glitch mode.
const GLITCH_DROPOUT_BELOW: u8 = 30;

/// Flicker/glitch re-evaluation interval: base plus a random term.
const JITTER_BASE_MS: u32 = 30;
const JITTER_SPAN_MS: u8 = 60;

/// One step of a discrete pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternStep {
    /// How long the step holds (ms).
    pub duration_ms: u16,
    /// Intensity shown during the step.
    pub intensity: u8,
    /// Show the secondary color instead of the primary.
    pub use_secondary: bool,
}

const fn on(duration_ms: u16, intensity: u8) -> PatternStep {
    PatternStep {
        duration_ms,
        intensity,
        use_secondary: false,
    }
}

const fn off(duration_ms: u16) -> PatternStep {
    on(duration_ms, 0)
}

const fn alt(duration_ms: u16, intensity: u8) -> PatternStep {
    PatternStep {
        duration_ms,
        intensity,
        use_secondary: true,
    }
}

pub const DOUBLE_BLINK: [PatternStep; 4] = [on(120, 255), off(120), on(120, 255), off(600)];

pub const TRIPLE_BLINK: [PatternStep; 6] = [
    on(90, 255),
    off(90),
    on(90, 255),
    off(90),
    on(90, 255),
    off(600),
];

pub const BEACON: [PatternStep; 2] = [on(80, 255), off(3920)];

pub const STROBE: [PatternStep; 2] = [on(50, 255), off(50)];

pub const HEARTBEAT: [PatternStep; 4] = [on(70, 255), off(70), on(70, 200), off(600)];

pub const ALTERNATE: [PatternStep; 4] = [on(120, 255), off(60), alt(120, 255), off(400)];

/// Returns the step table for a table-driven mode.
pub fn table_for(mode: Mode) -> Option<&'static [PatternStep]> {
    match mode {
        Mode::DoubleBlink => Some(&DOUBLE_BLINK),
        Mode::TripleBlink => Some(&TRIPLE_BLINK),
        Mode::Beacon => Some(&BEACON),
        Mode::Strobe => Some(&STROBE),
        Mode::Heartbeat => Some(&HEARTBEAT),
        Mode::Alternate => Some(&ALTERNATE),
        _ => None,
    }
}

/// Intensity of a one-shot fade `elapsed_ms` after it started.
///
/// Returns `None` once the fade is complete; the caller then locks the
/// terminal level and stops scheduling.
pub fn fade_level(mode: Mode, params: &ModeParams, elapsed_ms: u32) -> Option<u8> {
    let (from, to, duration) = match mode {
        Mode::FadeIn => (0, 255, params.rise_ms as u32),
        Mode::FadeOut => (255, 0, params.fall_ms as u32),
        _ => return None,
    };
    if elapsed_ms >= duration {
        None
    } else {
        Some(lerp8(from, to, elapsed_ms, duration))
    }
}

/// Terminal intensity of a completed fade.
pub fn fade_target(mode: Mode) -> u8 {
    if mode == Mode::FadeOut { 0 } else { 255 }
}

/// Intensity of the pulse family (soft/sharp pulse, breathing, throb) at `now`.
///
/// A triangle over `now mod period` between the level bounds; soft variants
/// are eased and breathing is additionally squared.
pub fn wave_level(mode: Mode, params: &ModeParams, now: u32) -> u8 {
    let period = (params.period_ms as u32).max(1);
    let position = now % period;
    let half = period / 2;

    let raw = if position < half {
        lerp8(params.min_level, params.max_level, position, half)
    } else {
        lerp8(params.max_level, params.min_level, position - half, half)
    };

    match mode {
        Mode::PulseSoft | Mode::Throb => ease8_in_out(raw),
        Mode::Breathing => {
            let eased = ease8_in_out(raw);
            scale8(eased, eased)
        }
        _ => raw,
    }
}

/// 16-tap Galois LFSR driving the flicker family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr(u32);

impl Lfsr {
    const SEED: u32 = 0xA_BCDE;
    const TAPS: u32 = 0xB400;
    const SALT: u32 = 7919;

    /// Generator for LED `index`; each index gets its own sequence.
    pub const fn for_led(index: u8) -> Self {
        Self(Self::SEED ^ (index as u32).wrapping_mul(Self::SALT))
    }

    /// Advances one step and returns the low byte.
    pub fn next_u8(&mut self) -> u8 {
        let feedback = (self.0 & 1).wrapping_neg() & Self::TAPS;
        self.0 = (self.0 >> 1) ^ feedback;
        (self.0 & 0xFF) as u8
    }
}

/// Candle intensity: a warm baseline plus a bounded random term.
pub fn candle_level(random: u8) -> u8 {
    CANDLE_BASE + random % CANDLE_SPAN
}

/// Glitch intensity: mostly full, occasionally dark.
pub fn glitch_level(random: u8) -> u8 {
    if random < GLITCH_DROPOUT_BELOW { 0 } else { 255 }
}

/// Randomized delay before the next flicker/glitch update.
pub fn jitter_ms(random: u8) -> u32 {
    JITTER_BASE_MS + (random % JITTER_SPAN_MS) as u32
}
