//! Named colors used by the preset catalog.

use crate::types::Color;

pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);
pub const GREEN: Color = Color::new(0, 255, 0);
pub const ORANGE: Color = Color::new(255, 128, 0);
pub const AMBER: Color = Color::new(255, 180, 0);
pub const RED: Color = Color::new(255, 0, 0);
pub const CYAN: Color = Color::new(0, 255, 255);
pub const BLUE: Color = Color::new(0, 0, 255);
pub const PURPLE: Color = Color::new(128, 0, 255);
