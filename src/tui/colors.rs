//! Color constants for the terminal user interface.
//!
//! A muted sage palette; terminals without true colour fall back to the nearest match.

use ratatui::style::Color;

/// Screen title and edit action
pub const ACCENT_DARK: Color = Color::Rgb(58, 90, 64);
/// Save action and the Add button border
pub const ACCENT: Color = Color::Rgb(92, 118, 80);
/// Borders around fields and rows
pub const BORDER: Color = Color::Rgb(163, 177, 138);
/// Task text
pub const TEXT: Color = Color::Rgb(46, 59, 46);
/// Placeholder and empty-state text
pub const PLACEHOLDER: Color = Color::Rgb(107, 143, 113);
/// Delete action
pub const DANGER: Color = Color::Rgb(138, 59, 59);
/// Background of the selected row
pub const CARD: Color = Color::Rgb(231, 239, 230);
