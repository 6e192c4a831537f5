//! Engine configuration.
//!
//! All hardware parameters are injected through [`Config`]; the library never
//! assumes a pin or channel.

use crate::error::{LedError, Result};
use crate::types::Color;

/// Maximum number of LEDs one engine drives.
pub const MAX_LED_COUNT: usize = 10;

/// Highest accepted data pin number.
pub const MAX_DATA_PIN: i32 = 48;

/// Highest accepted hardware (RMT) channel.
pub const MAX_CHANNEL: u8 = 3;

/// Accepted range for the continuous-mode step interval (ms).
pub const SMOOTH_STEP_RANGE_MS: core::ops::RangeInclusive<u16> = 5..=1000;

/// Channel byte order on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ColorOrder {
    /// Green, red, blue (typical WS2812).
    #[default]
    Grb = 0,
    /// Red, green, blue.
    Rgb = 1,
}

impl ColorOrder {
    /// Lays out `color` in this wire order.
    #[inline]
    pub fn to_wire(self, color: Color) -> [u8; 3] {
        match self {
            ColorOrder::Grb => [color.green, color.red, color.blue],
            ColorOrder::Rgb => [color.red, color.green, color.blue],
        }
    }

    /// Re-expresses `color` so that a device emitting `device` order puts the
    /// channels on the wire the way this order expects.
    #[inline]
    pub fn remap_for(self, device: ColorOrder, color: Color) -> Color {
        if self == device {
            color
        } else {
            Color::new(color.green, color.red, color.blue)
        }
    }
}

impl TryFrom<u8> for ColorOrder {
    type Error = LedError;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(ColorOrder::Grb),
            1 => Ok(ColorOrder::Rgb),
            other => Err(LedError::invalid_config(other as i32, "colorOrder out of range")),
        }
    }
}

/// Configuration passed to [`Engine::begin`](crate::Engine::begin).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// GPIO pin for the LED data line. `-1` means unset.
    pub data_pin: i32,

    /// Number of LEDs on the bus, `1..=MAX_LED_COUNT`.
    pub led_count: u8,

    /// Channel order of the LEDs on the bus.
    pub color_order: ColorOrder,

    /// Hardware channel driving the data line, `0..=MAX_CHANNEL`.
    pub channel: u8,

    /// Brightness applied on top of every LED's own brightness.
    pub global_brightness: u8,

    /// Re-evaluation interval for continuous modes (ms).
    pub smooth_step_ms: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_pin: -1,
            led_count: 0,
            color_order: ColorOrder::Grb,
            channel: 0,
            global_brightness: 255,
            smooth_step_ms: 20,
        }
    }
}

impl Config {
    pub fn with_data_pin(mut self, pin: i32) -> Self {
        self.data_pin = pin;
        self
    }

    pub fn with_led_count(mut self, count: u8) -> Self {
        self.led_count = count;
        self
    }

    pub fn with_color_order(mut self, order: ColorOrder) -> Self {
        self.color_order = order;
        self
    }

    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_global_brightness(mut self, level: u8) -> Self {
        self.global_brightness = level;
        self
    }

    pub fn with_smooth_step_ms(mut self, step_ms: u16) -> Self {
        self.smooth_step_ms = step_ms;
        self
    }

    /// Checks every field against its accepted range.
    ///
    /// # Errors
    /// `InvalidConfig` naming the first offending field, with its value as detail.
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_DATA_PIN).contains(&self.data_pin) {
            return Err(LedError::invalid_config(self.data_pin, "dataPin out of range"));
        }
        if self.led_count == 0 || self.led_count as usize > MAX_LED_COUNT {
            return Err(LedError::invalid_config(
                self.led_count as i32,
                "ledCount out of range",
            ));
        }
        if self.channel > MAX_CHANNEL {
            return Err(LedError::invalid_config(
                self.channel as i32,
                "rmtChannel out of range",
            ));
        }
        if !SMOOTH_STEP_RANGE_MS.contains(&self.smooth_step_ms) {
            return Err(LedError::invalid_config(
                self.smooth_step_ms as i32,
                "smoothStepMs out of range",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn valid() -> Config {
        Config::default().with_data_pin(1).with_led_count(1)
    }

    #[test]
    fn default_config_is_incomplete() {
        assert!(Config::default().validate().is_err());
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn rejects_each_out_of_range_field() {
        let cases = [
            (valid().with_data_pin(-1), -1),
            (valid().with_data_pin(300), 300),
            (valid().with_led_count(0), 0),
            (valid().with_led_count(11), 11),
            (valid().with_channel(4), 4),
            (valid().with_smooth_step_ms(4), 4),
            (valid().with_smooth_step_ms(1001), 1001),
        ];
        for (config, detail) in cases {
            let err = config.validate().unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidConfig);
            assert_eq!(err.detail, detail);
        }
    }

    #[test]
    fn color_order_from_raw() {
        assert_eq!(ColorOrder::try_from(0), Ok(ColorOrder::Grb));
        assert_eq!(ColorOrder::try_from(1), Ok(ColorOrder::Rgb));
        let err = ColorOrder::try_from(99).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidConfig);
        assert_eq!(err.detail, 99);
    }

    #[test]
    fn wire_order_permutes_channels() {
        let color = Color::new(1, 2, 3);
        assert_eq!(ColorOrder::Grb.to_wire(color), [2, 1, 3]);
        assert_eq!(ColorOrder::Rgb.to_wire(color), [1, 2, 3]);
        assert_eq!(ColorOrder::Rgb.remap_for(ColorOrder::Grb, color), Color::new(2, 1, 3));
        assert_eq!(ColorOrder::Grb.remap_for(ColorOrder::Grb, color), color);
    }
}
