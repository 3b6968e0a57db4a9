//! Color theme and styling definitions using ratatui colors

use crate::error::{Result, RotatorError};
use ratatui::style::{Color, Modifier, Style};

/// Names accepted by [`ColorTheme::from_name`]
pub const THEME_NAMES: [&str; 3] = ["default", "monochrome", "high-contrast"];

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Inactive banner text (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Banner carrying the active marker
    pub active_banner: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Error/warning text
    pub error_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None, // Use terminal default
            active_banner: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::Red,
        }
    }
}

impl ColorTheme {
    /// Look up a theme by its command-line name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "default" => Ok(Self::default()),
            "monochrome" => Ok(Self::monochrome()),
            "high-contrast" => Ok(Self::high_contrast()),
            other => Err(RotatorError::ui(format!(
                "unknown theme '{}' (expected one of: {})",
                other,
                THEME_NAMES.join(", ")
            ))),
        }
    }

    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            active_banner: Style::default().add_modifier(Modifier::REVERSED),
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            normal_text: Some(Color::White),
            active_banner: Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::White,
            status_fg: Color::Black,
            error_text: Color::LightRed,
        }
    }

    /// Style for an inactive banner row
    pub fn inactive_banner(&self) -> Style {
        match self.normal_text {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }
}
