//! Per-LED state machine.
//!
//! [`LedState`] owns everything one LED slot needs between ticks: the mode
//! and its sanitized parameters, colors, animation phase, deadlines, the
//! flicker generator and the one-level temporary override. The engine calls
//! into it from setters and once per tick; it never touches the frame buffer
//! itself, the engine reads [`LedState::output`] after each change.

use crate::colors::BLACK;
use crate::math8::scale8;
use crate::pattern::{self, DIM_LEVEL, Lfsr};
use crate::preset::{self, Preset, PresetDef};
use crate::time::{NextUpdate, deadline_reached};
use crate::types::{Color, Mode, ModeParams};

/// Read-only view of one LED, returned by [`Engine::snapshot`](crate::Engine::snapshot).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedSnapshot {
    pub mode: Mode,
    pub preset: Preset,
    pub default_preset: Preset,
    pub color: Color,
    pub secondary_color: Color,
    pub brightness: u8,
    pub intensity: u8,
    pub temp_active: bool,
    /// Override time left as of the last tick; 0 when none or already due.
    pub temp_remaining_ms: u32,
}

/// What a temporary override expires back into.
#[derive(Debug, Clone, Copy)]
struct ResumeState {
    mode: Mode,
    params: ModeParams,
    color: Color,
    secondary: Color,
    brightness: u8,
    preset: Preset,
}

#[derive(Debug, Clone, Copy)]
struct TemporaryOverride {
    pending: bool,
    active: bool,
    preset: Preset,
    duration_ms: u32,
    until_ms: u32,
    resume: ResumeState,
}

/// A temporary-override transition taken during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverrideTransition {
    Activated(Preset),
    Expired(Preset),
}

#[derive(Debug, Clone)]
pub(crate) struct LedState {
    mode: Mode,
    params: ModeParams,
    color: Color,
    secondary: Color,
    use_secondary: bool,
    intensity: u8,
    phase: u8,
    lfsr: Lfsr,
    mode_start_ms: u32,
    phase_end_ms: u32,
    next_update: NextUpdate,
    brightness: u8,
    preset: Preset,
    default_preset: Preset,
    temp: TemporaryOverride,
}

impl LedState {
    /// A blank LED: mode `Off`, black, full per-LED brightness.
    pub(crate) fn new(index: u8) -> Self {
        Self {
            mode: Mode::Off,
            params: ModeParams::default(),
            color: BLACK,
            secondary: BLACK,
            use_secondary: false,
            intensity: 0,
            phase: 0,
            lfsr: Lfsr::for_led(index),
            mode_start_ms: 0,
            phase_end_ms: 0,
            next_update: NextUpdate::Immediate,
            brightness: 255,
            preset: Preset::Off,
            default_preset: Preset::Off,
            temp: TemporaryOverride {
                pending: false,
                active: false,
                preset: Preset::Off,
                duration_ms: 0,
                until_ms: 0,
                resume: ResumeState {
                    mode: Mode::Off,
                    params: ModeParams::default(),
                    color: BLACK,
                    secondary: BLACK,
                    brightness: 255,
                    preset: Preset::Off,
                },
            },
        }
    }

    /// Idle LEDs pick up their default preset as soon as one is set.
    pub(crate) fn is_idle(&self) -> bool {
        self.mode == Mode::Off && self.preset == Preset::Off
    }

    /// Switches mode; the new mode starts on the next tick.
    pub(crate) fn set_mode(&mut self, mode: Mode, params: ModeParams) {
        self.mode = mode;
        self.params = params.sanitized(mode);
        self.restart();
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub(crate) fn set_secondary_color(&mut self, color: Color) {
        self.secondary = color;
    }

    pub(crate) fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    pub(crate) fn clear_preset(&mut self) {
        self.preset = Preset::Off;
    }

    pub(crate) fn set_default_preset(&mut self, preset: Preset) {
        self.default_preset = preset;
    }

    /// Applies a catalog entry: colors plus the mode with its defaults.
    pub(crate) fn apply_preset(&mut self, def: &PresetDef) {
        self.preset = def.preset;
        self.color = def.primary;
        self.secondary = def.secondary;
        self.set_mode(def.mode, ModeParams::defaults_for(def.mode));
    }

    /// Queues `preset` for `duration_ms`; it takes over on the next tick.
    pub(crate) fn request_override(&mut self, preset: Preset, duration_ms: u32) {
        self.temp.preset = preset;
        self.temp.duration_ms = duration_ms;
        self.temp.pending = true;
    }

    /// Drops any pending or running override without restoring.
    pub(crate) fn cancel_override(&mut self) {
        self.temp.pending = false;
        self.temp.active = false;
    }

    /// Runs the override state machine for this tick.
    ///
    /// A pending override snapshots the current state (only when no override
    /// is running already, so the first snapshot survives a replacement) and
    /// takes over. A running override whose deadline has passed restores the
    /// snapshot verbatim.
    pub(crate) fn update_override(&mut self, now: u32) -> Option<OverrideTransition> {
        let mut transition = None;

        if self.temp.pending {
            if !self.temp.active {
                self.temp.resume = ResumeState {
                    mode: self.mode,
                    params: self.params,
                    color: self.color,
                    secondary: self.secondary,
                    brightness: self.brightness,
                    preset: self.preset,
                };
            }
            if let Some(def) = preset::lookup(self.temp.preset) {
                self.apply_preset(def);
            }
            self.temp.pending = false;
            self.temp.active = true;
            self.temp.until_ms = now.wrapping_add(self.temp.duration_ms);
            transition = Some(OverrideTransition::Activated(self.temp.preset));
        }

        if self.temp.active && deadline_reached(now, self.temp.until_ms) {
            let resume = self.temp.resume;
            self.temp.active = false;
            self.mode = resume.mode;
            self.params = resume.params;
            self.color = resume.color;
            self.secondary = resume.secondary;
            self.brightness = resume.brightness;
            self.preset = resume.preset;
            self.restart();

            if self.is_idle() && self.default_preset != Preset::Off {
                if let Some(def) = preset::lookup(self.default_preset) {
                    self.apply_preset(def);
                }
            }
            transition = Some(OverrideTransition::Expired(self.preset));
        }

        transition
    }

    /// Advances the mode if an evaluation is due.
    ///
    /// Returns true when intensity or color selection may have changed.
    pub(crate) fn evaluate(&mut self, now: u32, smooth_step_ms: u16) -> bool {
        if !self.next_update.is_due(now) {
            return false;
        }
        if self.next_update == NextUpdate::Immediate {
            self.mode_start_ms = now;
            self.phase_end_ms = now;
        }

        self.use_secondary = false;
        let smooth_step = smooth_step_ms as u32;

        match self.mode {
            Mode::Off => self.settle(0),
            Mode::Solid => self.settle(255),
            Mode::Dim => self.settle(DIM_LEVEL),
            Mode::BlinkSlow | Mode::BlinkFast => self.step_blink(now),
            Mode::DoubleBlink
            | Mode::TripleBlink
            | Mode::Beacon
            | Mode::Strobe
            | Mode::Heartbeat
            | Mode::Alternate => self.step_table(now),
            Mode::FadeIn | Mode::FadeOut => {
                let elapsed = now.wrapping_sub(self.mode_start_ms);
                match pattern::fade_level(self.mode, &self.params, elapsed) {
                    Some(level) => {
                        self.intensity = level;
                        self.next_update = NextUpdate::At(now.wrapping_add(smooth_step));
                    }
                    None => self.settle(pattern::fade_target(self.mode)),
                }
            }
            Mode::PulseSoft | Mode::PulseSharp | Mode::Breathing | Mode::Throb => {
                self.intensity = pattern::wave_level(self.mode, &self.params, now);
                self.next_update = NextUpdate::At(now.wrapping_add(smooth_step));
            }
            Mode::FlickerCandle | Mode::Glitch => {
                let random = self.lfsr.next_u8();
                self.intensity = if self.mode == Mode::FlickerCandle {
                    pattern::candle_level(random)
                } else {
                    pattern::glitch_level(random)
                };
                self.next_update = NextUpdate::At(now.wrapping_add(pattern::jitter_ms(random)));
            }
        }

        true
    }

    /// Color this LED should show, after intensity, per-LED and global brightness.
    pub(crate) fn output(&self, global_brightness: u8) -> Color {
        let base = if self.use_secondary {
            self.secondary
        } else {
            self.color
        };
        let level = scale8(scale8(self.intensity, self.brightness), global_brightness);
        Color::new(
            scale8(base.red, level),
            scale8(base.green, level),
            scale8(base.blue, level),
        )
    }

    pub(crate) fn snapshot(&self, last_tick_ms: u32) -> LedSnapshot {
        let temp_remaining_ms =
            if self.temp.active && !deadline_reached(last_tick_ms, self.temp.until_ms) {
                self.temp.until_ms.wrapping_sub(last_tick_ms)
            } else {
                0
            };

        LedSnapshot {
            mode: self.mode,
            preset: self.preset,
            default_preset: self.default_preset,
            color: self.color,
            secondary_color: self.secondary,
            brightness: self.brightness,
            intensity: self.intensity,
            temp_active: self.temp.active,
            temp_remaining_ms,
        }
    }

    fn restart(&mut self) {
        self.phase = 0;
        self.use_secondary = false;
        self.next_update = NextUpdate::Immediate;
    }

    fn settle(&mut self, level: u8) {
        self.intensity = level;
        self.next_update = NextUpdate::Never;
    }

    fn step_blink(&mut self, now: u32) {
        let on_ms = self.params.on_ms as u32;
        let off_ms = (self.params.period_ms as u32).saturating_sub(on_ms);

        // a zero-length half is skipped
        let lit = match self.phase {
            0 => on_ms > 0,
            _ => off_ms == 0,
        };

        if lit {
            self.phase = 1;
            self.intensity = 255;
            self.schedule_step(now, on_ms);
        } else {
            self.phase = 0;
            self.intensity = 0;
            self.schedule_step(now, off_ms);
        }
    }

    fn step_table(&mut self, now: u32) {
        let Some(table) = pattern::table_for(self.mode) else {
            self.settle(0);
            return;
        };
        let index = self.phase as usize % table.len();
        let step = table[index];

        self.intensity = step.intensity;
        self.use_secondary = step.use_secondary;
        self.phase = ((index + 1) % table.len()) as u8;
        self.schedule_step(now, step.duration_ms as u32);
    }

    /// Schedules the next phase boundary `hold_ms` after the previous one,
    /// re-anchoring at `now` if the caller fell behind by a whole step.
    fn schedule_step(&mut self, now: u32, hold_ms: u32) {
        let next = self.phase_end_ms.wrapping_add(hold_ms);
        self.phase_end_ms = if deadline_reached(now, next) {
            now.wrapping_add(hold_ms)
        } else {
            next
        };
        self.next_update = NextUpdate::At(self.phase_end_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(led: &mut LedState, now: u32) -> u8 {
        led.evaluate(now, 20);
        led.snapshot(now).intensity
    }

    #[test]
    fn static_modes_stop_scheduling() {
        let mut led = LedState::new(0);
        led.set_mode(Mode::Dim, ModeParams::default());
        assert!(led.evaluate(0, 20));
        assert_eq!(led.intensity, DIM_LEVEL);
        assert_eq!(led.next_update, NextUpdate::Never);
        assert!(!led.evaluate(10_000, 20));
    }

    #[test]
    fn blink_holds_phase_boundaries_without_drift() {
        let mut led = LedState::new(0);
        led.set_mode(Mode::BlinkFast, ModeParams::defaults_for(Mode::BlinkFast));
        assert_eq!(run(&mut led, 0), 255);
        assert_eq!(run(&mut led, 130), 0);
        // next rising edge stays on the 250 ms grid despite the late tick
        assert_eq!(run(&mut led, 249), 0);
        assert_eq!(run(&mut led, 250), 255);
    }

    #[test]
    fn blink_with_full_on_time_stays_lit() {
        let mut led = LedState::new(0);
        let params = ModeParams {
            period_ms: 100,
            on_ms: 100,
            ..ModeParams::default()
        };
        led.set_mode(Mode::BlinkSlow, params);
        for now in (0..1000).step_by(25) {
            assert_eq!(run(&mut led, now), 255);
        }
    }

    #[test]
    fn blink_with_zero_on_time_stays_dark() {
        let mut led = LedState::new(0);
        let params = ModeParams {
            period_ms: 100,
            on_ms: 0,
            ..ModeParams::default()
        };
        led.set_mode(Mode::BlinkSlow, params);
        for now in (0..1000).step_by(25) {
            assert_eq!(run(&mut led, now), 0);
        }
    }

    #[test]
    fn table_walk_wraps_to_first_step() {
        let mut led = LedState::new(0);
        led.set_mode(Mode::Strobe, ModeParams::default());
        assert_eq!(run(&mut led, 0), 255);
        assert_eq!(run(&mut led, 50), 0);
        assert_eq!(run(&mut led, 100), 255);
        assert_eq!(run(&mut led, 150), 0);
    }

    #[test]
    fn alternate_switches_to_secondary_color() {
        let mut led = LedState::new(0);
        led.apply_preset(preset::lookup(Preset::AlarmPolice).unwrap());
        led.evaluate(0, 20);
        assert_eq!(led.output(255), crate::colors::RED);
        led.evaluate(120, 20);
        assert_eq!(led.output(255), BLACK);
        led.evaluate(180, 20);
        assert_eq!(led.output(255), crate::colors::BLUE);
    }

    #[test]
    fn output_applies_brightness_chain() {
        let mut led = LedState::new(0);
        led.set_color(Color::new(200, 100, 0));
        led.set_mode(Mode::Solid, ModeParams::default());
        led.evaluate(0, 20);
        assert_eq!(led.output(255), Color::new(200, 100, 0));
        led.set_brightness(128);
        assert_eq!(led.output(255), Color::new(100, 50, 0));
        assert_eq!(led.output(0), BLACK);
    }

    #[test]
    fn flicker_reschedules_within_jitter_window() {
        let mut led = LedState::new(3);
        led.set_mode(Mode::FlickerCandle, ModeParams::default());
        led.evaluate(1000, 20);
        match led.next_update {
            NextUpdate::At(at) => assert!((1030..1090).contains(&at)),
            other => panic!("unexpected schedule {:?}", other),
        }
        assert!(led.intensity >= 140);
    }
}
