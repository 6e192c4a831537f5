//! Shared test infrastructure for status-led integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use status_led::{Color, ColorOrder, Config, Engine, LedBackend, LedError, Result, TimeSource};

// ============================================================================
// Mock Backend
// ============================================================================

/// Mock backend that records every transmitted frame
pub struct MockBackend {
    frames: heapless::Vec<heapless::Vec<Color, 10>, 64>,
    last_order: Option<ColorOrder>,
    pub begin_calls: u32,
    pub end_calls: u32,
    pub show_calls: u32,
    /// `can_show` result
    pub ready: bool,
    /// Returned by `show` while set
    pub show_error: Option<LedError>,
    /// Returned by `begin` while set
    pub begin_error: Option<LedError>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            frames: heapless::Vec::new(),
            last_order: None,
            begin_calls: 0,
            end_calls: 0,
            show_calls: 0,
            ready: true,
            show_error: None,
            begin_error: None,
        }
    }

    /// Frames successfully transmitted, oldest first
    pub fn frames(&self) -> &[heapless::Vec<Color, 10>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[Color]> {
        self.frames.last().map(|frame| frame.as_slice())
    }

    pub fn last_order(&self) -> Option<ColorOrder> {
        self.last_order
    }
}

impl LedBackend for MockBackend {
    fn begin(&mut self, _config: &Config) -> Result<()> {
        self.begin_calls += 1;
        match self.begin_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn end(&mut self) {
        self.end_calls += 1;
    }

    fn can_show(&self) -> bool {
        self.ready
    }

    fn show(&mut self, frame: &[Color], order: ColorOrder) -> Result<()> {
        self.show_calls += 1;
        if let Some(err) = self.show_error {
            return Err(err);
        }
        let mut copy = heapless::Vec::new();
        for &color in frame {
            let _ = copy.push(color);
        }
        let _ = self.frames.push(copy);
        self.last_order = Some(order);
        Ok(())
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<u32>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(0),
        }
    }

    /// Advance time by the given number of milliseconds, wrapping like a hardware counter
    pub fn advance(&self, ms: u32) {
        self.current_time
            .set(self.current_time.get().wrapping_add(ms));
    }

    pub fn set_time(&self, ms: u32) {
        self.current_time.set(ms);
    }
}

impl TimeSource for MockTimeSource {
    fn now_ms(&self) -> u32 {
        self.current_time.get()
    }
}

// ============================================================================
// Re-export color constants from library for test convenience
// ============================================================================

#[allow(unused_imports)]
pub use status_led::colors::{AMBER, BLACK, BLUE, CYAN, GREEN, ORANGE, PURPLE, RED};

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Valid configuration for `count` LEDs
pub fn config(count: u8) -> Config {
    Config::default().with_data_pin(48).with_led_count(count)
}

/// Engine over a fresh mock backend, already started with `count` LEDs
pub fn started(count: u8) -> Engine<MockBackend> {
    let mut engine = Engine::new(MockBackend::new());
    engine.begin(config(count)).unwrap();
    engine
}

/// Current intensity of LED `index`
pub fn intensity(engine: &Engine<MockBackend>, index: usize) -> u8 {
    engine.snapshot(index).unwrap().intensity
}

/// Ticks every `step` ms from `from` (inclusive) to `to` (exclusive)
pub fn run(engine: &mut Engine<MockBackend>, from: u32, to: u32, step: u32) {
    let mut now = from;
    while now < to {
        engine.tick(now);
        now += step;
    }
}
