//! Core value types: colors, modes and mode parameters.

use crate::error::LedError;
use palette::Srgb;

/// An 8-bit RGB color. Equality is exact.
pub type Color = Srgb<u8>;

/// Temporal intensity behavior of an LED.
///
/// Modes never encode color; the LED's primary and secondary colors are
/// configured separately (directly or through a preset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    Off = 0,
    Solid,
    Dim,
    BlinkSlow,
    BlinkFast,
    DoubleBlink,
    TripleBlink,
    Beacon,
    Strobe,
    FadeIn,
    FadeOut,
    PulseSoft,
    PulseSharp,
    Breathing,
    Heartbeat,
    Throb,
    FlickerCandle,
    Glitch,
    Alternate,
}

impl Mode {
    /// Every mode, in discriminant order.
    pub const ALL: [Mode; 19] = [
        Mode::Off,
        Mode::Solid,
        Mode::Dim,
        Mode::BlinkSlow,
        Mode::BlinkFast,
        Mode::DoubleBlink,
        Mode::TripleBlink,
        Mode::Beacon,
        Mode::Strobe,
        Mode::FadeIn,
        Mode::FadeOut,
        Mode::PulseSoft,
        Mode::PulseSharp,
        Mode::Breathing,
        Mode::Heartbeat,
        Mode::Throb,
        Mode::FlickerCandle,
        Mode::Glitch,
        Mode::Alternate,
    ];

    /// Lowercase name, as accepted by `str::parse`.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Off => "off",
            Mode::Solid => "solid",
            Mode::Dim => "dim",
            Mode::BlinkSlow => "blinkslow",
            Mode::BlinkFast => "blinkfast",
            Mode::DoubleBlink => "doubleblink",
            Mode::TripleBlink => "tripleblink",
            Mode::Beacon => "beacon",
            Mode::Strobe => "strobe",
            Mode::FadeIn => "fadein",
            Mode::FadeOut => "fadeout",
            Mode::PulseSoft => "pulsesoft",
            Mode::PulseSharp => "pulsesharp",
            Mode::Breathing => "breathing",
            Mode::Heartbeat => "heartbeat",
            Mode::Throb => "throb",
            Mode::FlickerCandle => "flicker",
            Mode::Glitch => "glitch",
            Mode::Alternate => "alternate",
        }
    }

    /// Static modes settle on a fixed intensity and stop scheduling.
    pub const fn is_static(self) -> bool {
        matches!(self, Mode::Off | Mode::Solid | Mode::Dim)
    }
}

impl TryFrom<u8> for Mode {
    type Error = LedError;

    fn try_from(value: u8) -> Result<Self, LedError> {
        Mode::ALL
            .get(value as usize)
            .copied()
            .ok_or(LedError::invalid_config(value as i32, "unknown mode"))
    }
}

impl core::str::FromStr for Mode {
    type Err = LedError;

    fn from_str(s: &str) -> Result<Self, LedError> {
        Mode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or(LedError::invalid_config(0, "unknown mode name"))
    }
}

/// Per-mode tunables.
///
/// Stored sanitized: see [`ModeParams::sanitized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeParams {
    /// Total period for repeating modes (ms).
    pub period_ms: u16,

    /// On-time for simple blink modes (ms).
    pub on_ms: u16,

    /// Rise time for fade-in (ms).
    pub rise_ms: u16,

    /// Fall time for fade-out (ms).
    pub fall_ms: u16,

    /// Lower intensity bound for continuous modes.
    pub min_level: u8,

    /// Upper intensity bound for continuous modes.
    pub max_level: u8,
}

impl Default for ModeParams {
    fn default() -> Self {
        Self {
            period_ms: 1000,
            on_ms: 500,
            rise_ms: 800,
            fall_ms: 800,
            min_level: 0,
            max_level: 255,
        }
    }
}

impl ModeParams {
    /// Default parameters for `mode`.
    pub fn defaults_for(mode: Mode) -> Self {
        let base = Self::default();
        match mode {
            Mode::BlinkSlow => Self {
                period_ms: 1000,
                on_ms: 500,
                ..base
            },
            Mode::BlinkFast => Self {
                period_ms: 250,
                on_ms: 125,
                ..base
            },
            Mode::Strobe => Self {
                period_ms: 100,
                on_ms: 50,
                ..base
            },
            Mode::FadeIn => Self {
                rise_ms: 1000,
                ..base
            },
            Mode::FadeOut => Self {
                fall_ms: 1000,
                ..base
            },
            Mode::PulseSoft => Self {
                period_ms: 2000,
                min_level: 0,
                max_level: 255,
                ..base
            },
            Mode::PulseSharp => Self {
                period_ms: 800,
                min_level: 0,
                max_level: 255,
                ..base
            },
            Mode::Breathing => Self {
                period_ms: 3000,
                min_level: 20,
                max_level: 255,
                ..base
            },
            Mode::Throb => Self {
                period_ms: 4000,
                min_level: 0,
                max_level: 255,
                ..base
            },
            _ => base,
        }
    }

    /// Clamps the parameters into the ranges the evaluators rely on.
    ///
    /// Period is at least 2, on-time at most the period, the level band is
    /// ordered, and the ramp a fade uses is at least 1 ms.
    pub fn sanitized(mut self, mode: Mode) -> Self {
        if self.period_ms < 2 {
            self.period_ms = 2;
        }
        if self.on_ms > self.period_ms {
            self.on_ms = self.period_ms;
        }
        if self.max_level < self.min_level {
            core::mem::swap(&mut self.min_level, &mut self.max_level);
        }
        if mode == Mode::FadeIn && self.rise_ms == 0 {
            self.rise_ms = 1;
        }
        if mode == Mode::FadeOut && self.fall_ms == 0 {
            self.fall_ms = 1;
        }
        self
    }
}
