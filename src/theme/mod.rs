//! Colour palette for the terminal UI

mod tokyo_night;

pub use tokyo_night::TOKYO_NIGHT;

use ratatui::style::Color;

/// A color theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        TOKYO_NIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_tokyo_night() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Tokyo Night");
    }
}
