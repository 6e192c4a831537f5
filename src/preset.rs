//! Semantic status presets and their static catalog.

use crate::colors::{AMBER, BLACK, BLUE, CYAN, GREEN, ORANGE, PURPLE, RED};
use crate::error::LedError;
use crate::types::{Color, Mode};

/// Semantic LED status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Preset {
    Off = 0,
    Ready,
    Busy,
    Warning,
    Error,
    Critical,
    Updating,
    Info,
    Maintenance,
    AlarmPolice,
    HazardAmber,
}

impl Preset {
    /// Every preset, in discriminant order.
    pub const ALL: [Preset; 11] = [
        Preset::Off,
        Preset::Ready,
        Preset::Busy,
        Preset::Warning,
        Preset::Error,
        Preset::Critical,
        Preset::Updating,
        Preset::Info,
        Preset::Maintenance,
        Preset::AlarmPolice,
        Preset::HazardAmber,
    ];

    /// Lowercase name, as accepted by `str::parse`.
    pub const fn name(self) -> &'static str {
        match self {
            Preset::Off => "off",
            Preset::Ready => "ready",
            Preset::Busy => "busy",
            Preset::Warning => "warning",
            Preset::Error => "error",
            Preset::Critical => "critical",
            Preset::Updating => "updating",
            Preset::Info => "info",
            Preset::Maintenance => "maintenance",
            Preset::AlarmPolice => "police",
            Preset::HazardAmber => "hazard",
        }
    }
}

/// ```
/// use status_led::Preset;
///
/// assert_eq!(Preset::try_from(9), Ok(Preset::AlarmPolice));
/// assert!(Preset::try_from(11).is_err());
/// ```
impl TryFrom<u8> for Preset {
    type Error = LedError;

    fn try_from(value: u8) -> Result<Self, LedError> {
        Preset::ALL
            .get(value as usize)
            .copied()
            .ok_or(LedError::invalid_config(value as i32, "unknown preset"))
    }
}

impl core::str::FromStr for Preset {
    type Err = LedError;

    fn from_str(s: &str) -> Result<Self, LedError> {
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.name() == s)
            .ok_or(LedError::invalid_config(0, "unknown preset name"))
    }
}

/// A catalog entry: the mode and colors a preset stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetDef {
    pub preset: Preset,
    pub mode: Mode,
    pub primary: Color,
    /// Shown by steps that select the secondary color; black otherwise.
    pub secondary: Color,
}

impl PresetDef {
    const fn new(preset: Preset, mode: Mode, primary: Color) -> Self {
        Self {
            preset,
            mode,
            primary,
            secondary: BLACK,
        }
    }

    const fn with_secondary(mut self, secondary: Color) -> Self {
        self.secondary = secondary;
        self
    }
}

/// The preset catalog.
pub const PRESETS: [PresetDef; 11] = [
    PresetDef::new(Preset::Off, Mode::Off, BLACK),
    PresetDef::new(Preset::Ready, Mode::Solid, GREEN),
    PresetDef::new(Preset::Busy, Mode::PulseSoft, ORANGE),
    PresetDef::new(Preset::Warning, Mode::BlinkSlow, AMBER),
    PresetDef::new(Preset::Error, Mode::BlinkFast, RED),
    PresetDef::new(Preset::Critical, Mode::Strobe, RED),
    PresetDef::new(Preset::Updating, Mode::Breathing, CYAN),
    PresetDef::new(Preset::Info, Mode::Solid, BLUE),
    PresetDef::new(Preset::Maintenance, Mode::DoubleBlink, PURPLE),
    PresetDef::new(Preset::AlarmPolice, Mode::Alternate, RED).with_secondary(BLUE),
    PresetDef::new(Preset::HazardAmber, Mode::DoubleBlink, AMBER),
];

/// Looks up the catalog entry for `preset`.
pub fn lookup(preset: Preset) -> Option<&'static PresetDef> {
    PRESETS.iter().find(|def| def.preset == preset)
}
