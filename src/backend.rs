//! Transmission backends.
//!
//! The engine hands finished frames to a [`LedBackend`]. Backends own the
//! wire encoding and channel-order remapping; the engine only ever works in
//! canonical RGB.

use crate::config::{ColorOrder, Config};
use crate::error::Result;
use crate::types::Color;

/// Trait for abstracting the LED transmission hardware.
///
/// Implementations must never block: when the hardware is still busy with
/// the previous frame, `show` returns a `ResourceBusy` error and the engine
/// retries on its next tick.
pub trait LedBackend {
    /// Brings up the hardware for `config`.
    fn begin(&mut self, config: &Config) -> Result<()>;

    /// Releases the hardware. Called at most once per successful `begin`.
    fn end(&mut self);

    /// Non-blocking readiness probe.
    fn can_show(&self) -> bool;

    /// Transmits `frame` (canonical RGB) to LEDs wired in `order`.
    fn show(&mut self, frame: &[Color], order: ColorOrder) -> Result<()>;
}

/// Backend that accepts and discards every frame.
///
/// Useful on a host and in tests where only the engine state matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl LedBackend for NullBackend {
    fn begin(&mut self, _config: &Config) -> Result<()> {
        Ok(())
    }

    fn end(&mut self) {}

    fn can_show(&self) -> bool {
        true
    }

    fn show(&mut self, _frame: &[Color], _order: ColorOrder) -> Result<()> {
        Ok(())
    }
}

#[cfg(feature = "smart-leds")]
pub use self::smart::SmartLedsBackend;

#[cfg(feature = "smart-leds")]
mod smart {
    use super::LedBackend;
    use crate::config::{ColorOrder, Config};
    use crate::error::{LedError, Result};
    use crate::types::Color;
    use smart_leds::{RGB8, SmartLedsWrite};

    /// Adapter over any `smart-leds` driver (WS2812 over SPI, RMT, PIO, ...).
    ///
    /// Such drivers take RGB values and emit them in GRB order, so LEDs
    /// configured as [`ColorOrder::Rgb`] get their red and green swapped
    /// before the write.
    pub struct SmartLedsBackend<W> {
        writer: W,
        led_count: usize,
        started: bool,
    }

    impl<W> SmartLedsBackend<W> {
        pub fn new(writer: W) -> Self {
            Self {
                writer,
                led_count: 0,
                started: false,
            }
        }

        /// Returns the wrapped driver.
        pub fn writer(&self) -> &W {
            &self.writer
        }
    }

    impl<W> LedBackend for SmartLedsBackend<W>
    where
        W: SmartLedsWrite,
        RGB8: Into<W::Color>,
    {
        fn begin(&mut self, config: &Config) -> Result<()> {
            self.led_count = config.led_count as usize;
            self.started = true;
            Ok(())
        }

        fn end(&mut self) {
            if self.started {
                let blank = core::iter::repeat_n(RGB8::default(), self.led_count);
                // best effort: the strip is going away either way
                let _ = self.writer.write(blank);
                self.started = false;
            }
        }

        fn can_show(&self) -> bool {
            self.started
        }

        fn show(&mut self, frame: &[Color], order: ColorOrder) -> Result<()> {
            if !self.started {
                return Err(LedError::not_initialized());
            }
            if frame.len() > self.led_count {
                return Err(LedError::invalid_config(
                    frame.len() as i32,
                    "count exceeds configured ledCount",
                ));
            }

            let pixels = frame.iter().map(|&color| {
                let mapped = order.remap_for(ColorOrder::Grb, color);
                RGB8::new(mapped.red, mapped.green, mapped.blue)
            });
            self.writer
                .write(pixels)
                .map_err(|_| LedError::hardware_fault(0, "led driver write failed"))
        }
    }
}
