#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Engine`**: Owns up to ten LED slots and the frame buffer; call `tick` from your loop
//! - **`Mode`**: Temporal intensity behavior (blinks, fades, pulses, flicker), color-free
//! - **`ModeParams`**: Per-mode timing and intensity band, sanitized on assignment
//! - **`Preset`**: Semantic status bundling a mode with one or two colors
//! - **`LedBackend`**: Trait to implement for your transmission hardware
//! - **`TimeSource`**: Trait to implement for your millisecond clock
//! - **`LedSnapshot`**: Read-only view of one LED
//! - **`LedCommand`**: Setter calls as values, for queued control
//!
//! Colors are `Srgb<u8>`. Each LED's output is its current color scaled by
//! the mode intensity, the LED brightness and the global brightness.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod backend;
pub mod colors;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod led;
pub mod math8;
pub mod pattern;
pub mod preset;
pub mod time;
pub mod types;

pub use backend::{LedBackend, NullBackend};
#[cfg(feature = "smart-leds")]
pub use backend::SmartLedsBackend;
pub use command::{LedAction, LedCommand};
pub use config::{ColorOrder, Config, MAX_LED_COUNT};
pub use engine::{Engine, MAX_OVERRIDE_MS};
pub use error::{ErrorKind, LedError, Result};
pub use led::LedSnapshot;
pub use preset::{Preset, PresetDef};
pub use time::{TimeSource, deadline_reached};
pub use types::{Color, Mode, ModeParams};
