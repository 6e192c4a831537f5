//! Millisecond timestamps with wraparound-safe deadline handling.
//!
//! Timestamps are free-running `u32` millisecond counters (the shape of an
//! Arduino-style `millis()`), so they wrap roughly every 49.7 days. All
//! comparisons go through [`deadline_reached`], which stays correct across
//! the wrap as long as the deadline lies within half the counter range of
//! "now".

/// Trait for abstracting time sources.
pub trait TimeSource {
    /// Returns the current time in milliseconds.
    fn now_ms(&self) -> u32;
}

/// Returns true once `now` is at or past `target`.
///
/// The difference is taken modulo 2^32 and read back as signed, so a
/// deadline a few milliseconds after the counter wraps still compares as
/// "in the future".
#[inline]
pub const fn deadline_reached(now: u32, target: u32) -> bool {
    (now.wrapping_sub(target) as i32) >= 0
}

/// When an LED next needs to be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NextUpdate {
    /// Evaluate on the next tick, whatever its timestamp.
    Immediate,

    /// Evaluate once the tick time reaches this timestamp.
    At(u32),

    /// Static output; nothing to do until a setter changes the LED.
    Never,
}

impl NextUpdate {
    /// Returns true if an evaluation is due at `now`.
    #[inline]
    pub fn is_due(self, now: u32) -> bool {
        match self {
            NextUpdate::Immediate => true,
            NextUpdate::At(target) => deadline_reached(now, target),
            NextUpdate::Never => false,
        }
    }
}
