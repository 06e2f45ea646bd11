// Theme module - Color constants and theme re-exports
//
// Palette shared by every panel. Phase and log colors are derived from it in
// the default submodule.

pub mod default;

use ratatui::style::Color;

/// Primary accent color - used for borders, titles, pending phases
/// RGB: (187, 154, 247)
pub const NEON_PURPLE: Color = Color::Rgb(187, 154, 247);

/// In-flight indicator - used for SYN-SENT and socket calls
/// RGB: (255, 158, 100)
pub const PUMPKIN_ORANGE: Color = Color::Rgb(255, 158, 100);

/// Danger indicator - used for errors
/// RGB: (247, 118, 142)
pub const BLOOD_RED: Color = Color::Rgb(247, 118, 142);

/// Healthy indicator - used for ESTABLISHED and completed phases
/// RGB: (158, 206, 106)
pub const TOXIC_GREEN: Color = Color::Rgb(158, 206, 106);

/// Neutral text - used for general text and CLOSED states
/// RGB: (169, 177, 214)
pub const BONE_WHITE: Color = Color::Rgb(169, 177, 214);

/// Selection background in lists
pub const DEEP_INDIGO: Color = Color::Rgb(47, 51, 77);

pub use default::*;
