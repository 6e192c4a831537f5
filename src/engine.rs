//! The status LED engine: LED slots, frame buffer and the cooperative tick.

use crate::backend::LedBackend;
use crate::colors::BLACK;
use crate::config::{Config, MAX_LED_COUNT};
use crate::error::{LedError, Result};
use crate::led::{LedSnapshot, LedState, OverrideTransition};
use crate::preset::{self, Preset};
use crate::time::TimeSource;
use crate::types::{Color, Mode, ModeParams};
use heapless::Vec;

/// Longest temporary override; deadlines further out would read as already past.
pub const MAX_OVERRIDE_MS: u32 = i32::MAX as u32;

/// Drives up to [`MAX_LED_COUNT`] status LEDs from a cooperative loop.
///
/// Setters mutate one LED slot; [`tick`](Engine::tick) advances every slot,
/// writes changed colors into the frame buffer and hands the frame to the
/// backend when it changed and the backend is ready. Nothing blocks: a busy
/// backend just leaves the frame dirty for the next tick.
///
/// The engine is not thread-safe. Call all methods from one context.
///
/// # Example
/// ```
/// use status_led::{Config, Engine, NullBackend, Preset};
///
/// let mut engine = Engine::new(NullBackend);
/// engine
///     .begin(Config::default().with_data_pin(48).with_led_count(3))
///     .unwrap();
/// engine.set_preset(0, Preset::Ready).unwrap();
///
/// for now in (0..1000).step_by(10) {
///     engine.tick(now);
/// }
/// ```
pub struct Engine<B: LedBackend> {
    backend: B,
    config: Config,
    initialized: bool,
    last_status: Result<()>,
    last_tick_ms: u32,
    frame_dirty: bool,
    leds: Vec<LedState, MAX_LED_COUNT>,
    frame: Vec<Color, MAX_LED_COUNT>,
}

impl<B: LedBackend> Engine<B> {
    /// Creates an uninitialized engine that will transmit through `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: Config::default(),
            initialized: false,
            last_status: Ok(()),
            last_tick_ms: 0,
            frame_dirty: false,
            leds: Vec::new(),
            frame: Vec::new(),
        }
    }

    /// Validates `config`, resets every LED to `Off` and starts the backend.
    ///
    /// Can be called again (after or without [`end`](Engine::end)) to
    /// reinitialize. The first tick after success transmits a blank frame.
    ///
    /// # Errors
    /// * `InvalidConfig` - a field is out of range; engine state is untouched
    /// * any error from the backend's `begin`; the engine is left uninitialized
    pub fn begin(&mut self, config: Config) -> Result<()> {
        if let Err(err) = config.validate() {
            #[cfg(feature = "defmt")]
            defmt::warn!("status-led: rejected config: {}", err);
            return self.record(Err(err));
        }

        self.end();

        self.config = config;
        self.last_tick_ms = 0;
        self.frame_dirty = false;
        self.leds.clear();
        self.frame.clear();
        for index in 0..config.led_count {
            // capacity was checked by validate()
            let _ = self.leds.push(LedState::new(index));
            let _ = self.frame.push(BLACK);
        }

        if let Err(err) = self.backend.begin(&self.config) {
            #[cfg(feature = "defmt")]
            defmt::error!("status-led: backend begin failed: {}", err);
            return self.record(Err(err));
        }

        self.initialized = true;
        self.frame_dirty = true;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "status-led: started {} LEDs on pin {}",
            config.led_count,
            config.data_pin
        );

        self.record(Ok(()))
    }

    /// Stops the engine and releases the backend. Safe to call repeatedly.
    pub fn end(&mut self) {
        if self.initialized {
            self.backend.end();
            self.initialized = false;
        }
    }

    /// Advances every LED to `now_ms` and transmits the frame if it changed.
    ///
    /// Does nothing before a successful [`begin`](Engine::begin).
    pub fn tick(&mut self, now_ms: u32) {
        if !self.initialized {
            return;
        }

        self.last_tick_ms = now_ms;
        let smooth_step_ms = self.config.smooth_step_ms;

        for index in 0..self.leds.len() {
            let led = &mut self.leds[index];
            let transition = led.update_override(now_ms);
            let advanced = led.evaluate(now_ms, smooth_step_ms);

            if let Some(transition) = transition {
                log_transition(index, transition);
            }
            if transition.is_some() || advanced {
                self.refresh(index);
            }
        }

        self.transmit();
    }

    /// Ticks with the current time of `time_source`.
    pub fn service<T: TimeSource>(&mut self, time_source: &T) {
        self.tick(time_source.now_ms());
    }

    /// Sets the mode of LED `index` with that mode's default parameters.
    pub fn set_mode(&mut self, index: usize, mode: Mode) -> Result<()> {
        self.set_mode_with(index, mode, ModeParams::defaults_for(mode))
    }

    /// Sets the mode of LED `index` with custom parameters.
    ///
    /// Parameters are sanitized on the way in. The LED leaves its preset;
    /// a running temporary override keeps running and still restores the
    /// state it captured when it started.
    pub fn set_mode_with(&mut self, index: usize, mode: Mode, params: ModeParams) -> Result<()> {
        let result = self.led_mut(index).map(|led| {
            led.clear_preset();
            led.set_mode(mode, params);
        });
        self.record(result)
    }

    /// Sets the primary color of LED `index`.
    pub fn set_color(&mut self, index: usize, color: Color) -> Result<()> {
        let result = self.led_mut(index).map(|led| {
            led.clear_preset();
            led.set_color(color);
        });
        self.refresh_on_success(index, result)
    }

    /// Sets the secondary color used by composite modes.
    pub fn set_secondary_color(&mut self, index: usize, color: Color) -> Result<()> {
        let result = self.led_mut(index).map(|led| {
            led.clear_preset();
            led.set_secondary_color(color);
        });
        self.refresh_on_success(index, result)
    }

    /// Applies `preset` to LED `index`, cancelling any temporary override.
    pub fn set_preset(&mut self, index: usize, preset: Preset) -> Result<()> {
        let result = self.led_mut(index).and_then(|led| {
            let def = find_preset(preset)?;
            led.cancel_override();
            led.apply_preset(def);
            Ok(())
        });
        self.refresh_on_success(index, result)
    }

    /// Sets the preset LED `index` falls back to.
    ///
    /// Applied immediately only while the LED is idle (mode `Off`, no
    /// preset); otherwise stored.
    pub fn set_default_preset(&mut self, index: usize, preset: Preset) -> Result<()> {
        let result = self.led_mut(index).and_then(|led| {
            let def = find_preset(preset)?;
            led.set_default_preset(preset);
            if led.is_idle() {
                led.apply_preset(def);
            }
            Ok(())
        });
        self.refresh_on_success(index, result)
    }

    /// Shows `preset` on LED `index` for `duration_ms`, then restores.
    ///
    /// The override takes effect on the next tick. Issued while another
    /// override is running, it replaces that override's preset and duration
    /// but restores the state captured before the first one.
    ///
    /// # Errors
    /// `InvalidConfig` for a bad index, a zero duration or one longer than
    /// [`MAX_OVERRIDE_MS`].
    pub fn set_temporary_preset(
        &mut self,
        index: usize,
        preset: Preset,
        duration_ms: u32,
    ) -> Result<()> {
        let result = self.led_mut(index).and_then(|led| {
            if duration_ms == 0 {
                return Err(LedError::invalid_config(0, "durationMs must be > 0"));
            }
            if duration_ms > MAX_OVERRIDE_MS {
                return Err(LedError::invalid_config(
                    i32::MAX,
                    "durationMs exceeds half the clock range",
                ));
            }
            find_preset(preset)?;
            led.request_override(preset, duration_ms);
            Ok(())
        });
        self.record(result)
    }

    /// Sets the brightness of LED `index` (applied on top of its mode).
    pub fn set_brightness(&mut self, index: usize, level: u8) -> Result<()> {
        let result = self.led_mut(index).map(|led| led.set_brightness(level));
        self.refresh_on_success(index, result)
    }

    /// Sets the brightness applied to every LED.
    pub fn set_global_brightness(&mut self, level: u8) -> Result<()> {
        if !self.initialized {
            return self.record(Err(LedError::not_initialized()));
        }
        self.config.global_brightness = level;
        for index in 0..self.leds.len() {
            self.refresh(index);
        }
        self.record(Ok(()))
    }

    /// Returns a snapshot of LED `index`.
    ///
    /// Remaining override time is measured against the last tick's time.
    pub fn snapshot(&self, index: usize) -> Result<LedSnapshot> {
        if !self.initialized {
            return Err(LedError::not_initialized());
        }
        self.leds
            .get(index)
            .map(|led| led.snapshot(self.last_tick_ms))
            .ok_or(index_error(index))
    }

    /// Returns true after a successful `begin` and until `end`.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of configured LEDs.
    pub fn led_count(&self) -> usize {
        self.leds.len()
    }

    /// Returns the outcome of the last setter, or the last transmit failure.
    pub fn last_status(&self) -> Result<()> {
        self.last_status
    }

    /// Returns the frame buffer as last computed.
    pub fn frame(&self) -> &[Color] {
        &self.frame
    }

    /// Returns true if the frame still has to be transmitted.
    pub fn is_frame_dirty(&self) -> bool {
        self.frame_dirty
    }

    /// Returns a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns a mutable reference to the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn led_mut(&mut self, index: usize) -> Result<&mut LedState> {
        if !self.initialized {
            return Err(LedError::not_initialized());
        }
        self.leds.get_mut(index).ok_or(index_error(index))
    }

    pub(crate) fn record(&mut self, result: Result<()>) -> Result<()> {
        self.last_status = result;
        result
    }

    fn refresh_on_success(&mut self, index: usize, result: Result<()>) -> Result<()> {
        if result.is_ok() {
            self.refresh(index);
        }
        self.record(result)
    }

    /// Recomputes the output color of LED `index` into the frame.
    fn refresh(&mut self, index: usize) {
        let (Some(led), Some(slot)) = (self.leds.get(index), self.frame.get_mut(index)) else {
            return;
        };
        let color = led.output(self.config.global_brightness);
        if *slot != color {
            *slot = color;
            self.frame_dirty = true;
        }
    }

    fn transmit(&mut self) {
        if !self.frame_dirty || !self.backend.can_show() {
            return;
        }
        match self.backend.show(&self.frame, self.config.color_order) {
            Ok(()) => self.frame_dirty = false,
            Err(err) if err.is_busy() => {}
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("status-led: show failed: {}", err);
                self.last_status = Err(err);
            }
        }
    }
}

impl<B: LedBackend> Drop for Engine<B> {
    fn drop(&mut self) {
        self.end();
    }
}

fn find_preset(preset: Preset) -> Result<&'static preset::PresetDef> {
    preset::lookup(preset).ok_or(LedError::invalid_config(preset as i32, "unknown preset"))
}

fn index_error(index: usize) -> LedError {
    LedError::invalid_config(index as i32, "index out of range")
}

fn log_transition(index: usize, transition: OverrideTransition) {
    #[cfg(feature = "defmt")]
    match transition {
        OverrideTransition::Activated(preset) => {
            defmt::debug!("status-led: led {} override {} started", index, preset);
        }
        OverrideTransition::Expired(preset) => {
            defmt::debug!("status-led: led {} override ended, back to {}", index, preset);
        }
    }
    #[cfg(not(feature = "defmt"))]
    let _ = (index, transition);
}
