//! Colors used by the token field widget.

use ratatui::style::Color;

/// Primary green - accent for focus and highlights
pub const ACCENT: Color = Color::Rgb(0, 255, 163); // #00FFA3

/// Main background - deep void
pub const VOID: Color = Color::Rgb(10, 22, 40); // #0A1628

/// Surface level 0 - darkest surface
pub const SURFACE_0: Color = Color::Rgb(13, 27, 42); // #0D1B2A

/// Surface level 1 - mid surface
pub const SURFACE_1: Color = Color::Rgb(27, 40, 56); // #1B2838

/// Surface level 2 - light surface
pub const SURFACE_2: Color = Color::Rgb(36, 59, 83); // #243B53

/// Primary text - white
pub const TEXT: Color = Color::Rgb(255, 255, 255); // #FFFFFF

/// Dimmed text - secondary text color
pub const TEXT_DIM: Color = Color::Rgb(130, 154, 177); // #829AB1

/// Muted text - placeholder and remove marks
pub const TEXT_MUTED: Color = Color::Rgb(72, 101, 129); // #486581

/// Colors for one token field.
///
/// Use `Default::default()` for the dark theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Caret, focused token, highlighted row, border
    pub accent: Color,
    /// Normal text color
    pub text: Color,
    /// Secondary/dimmed text color
    pub text_dim: Color,
    /// Placeholder and remove-mark color
    pub text_muted: Color,
    /// Dropdown background
    pub surface: Color,
    /// Token chip background
    pub chip: Color,
    /// Highlighted row background
    pub highlight: Color,
    /// Text drawn on accent backgrounds
    pub void: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            accent: ACCENT,
            text: TEXT,
            text_dim: TEXT_DIM,
            text_muted: TEXT_MUTED,
            surface: SURFACE_0,
            chip: SURFACE_1,
            highlight: SURFACE_2,
            void: VOID,
        }
    }
}

impl ColorScheme {
    /// Same scheme with a different accent.
    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    /// Light variant.
    pub fn light() -> Self {
        Self {
            accent: Color::Rgb(0, 150, 100),
            text: Color::Rgb(30, 30, 30),
            text_dim: Color::Rgb(100, 100, 100),
            text_muted: Color::Rgb(150, 150, 150),
            surface: Color::Rgb(255, 255, 255),
            chip: Color::Rgb(230, 230, 230),
            highlight: Color::Rgb(210, 235, 225),
            void: Color::Rgb(255, 255, 255),
        }
    }
}
