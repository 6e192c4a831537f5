//! Command-based control for the engine.
//!
//! Commands are plain values, so they can be queued from another context
//! (an interrupt-fed `heapless::Deque`, a channel) and applied from the loop
//! that owns the engine.

use crate::backend::LedBackend;
use crate::engine::Engine;
use crate::error::Result;
use crate::preset::Preset;
use crate::types::{Color, Mode, ModeParams};

/// Actions for controlling one LED.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LedAction {
    /// Set mode with its default parameters.
    SetMode(Mode),
    /// Set mode with custom parameters.
    SetModeWith(Mode, ModeParams),
    /// Set primary color.
    SetColor(Color),
    /// Set secondary color.
    SetSecondaryColor(Color),
    /// Apply preset.
    SetPreset(Preset),
    /// Set default preset.
    SetDefaultPreset(Preset),
    /// Apply preset for a duration (ms), then restore.
    SetTemporaryPreset(Preset, u32),
    /// Set per-LED brightness.
    SetBrightness(u8),
    /// Set global brightness. The command's index is ignored.
    SetGlobalBrightness(u8),
}

/// Command targeting a specific LED.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedCommand {
    pub index: usize,
    pub action: LedAction,
}

impl LedCommand {
    /// Creates command.
    pub fn new(index: usize, action: LedAction) -> Self {
        Self { index, action }
    }
}

impl<B: LedBackend> Engine<B> {
    /// Applies `command` through the matching setter.
    pub fn handle_command(&mut self, command: LedCommand) -> Result<()> {
        let index = command.index;
        match command.action {
            LedAction::SetMode(mode) => self.set_mode(index, mode),
            LedAction::SetModeWith(mode, params) => self.set_mode_with(index, mode, params),
            LedAction::SetColor(color) => self.set_color(index, color),
            LedAction::SetSecondaryColor(color) => self.set_secondary_color(index, color),
            LedAction::SetPreset(preset) => self.set_preset(index, preset),
            LedAction::SetDefaultPreset(preset) => self.set_default_preset(index, preset),
            LedAction::SetTemporaryPreset(preset, duration_ms) => {
                self.set_temporary_preset(index, preset, duration_ms)
            }
            LedAction::SetBrightness(level) => self.set_brightness(index, level),
            LedAction::SetGlobalBrightness(level) => self.set_global_brightness(level),
        }
    }
}
