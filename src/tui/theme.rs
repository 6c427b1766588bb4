use crate::config::ThemeConfig;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Resolved styles for the result browser.
///
/// Built once from [`ThemeConfig`] and shared by reference with every render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub header: Style,
    pub footer: Style,
    pub border: Style,
    pub selected_border: Style,
    pub selected_background: Color,
    pub title: Style,
    pub url: Style,
    pub snippet: Style,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = ThemeConfig::default();
        let accent = parse_color(&config.accent, &defaults.accent);
        let accent_bright = parse_color(&config.accent_bright, &defaults.accent_bright);
        let success = parse_color(&config.success, &defaults.success);
        let muted = parse_color(&config.muted, &defaults.muted);
        let text = parse_color(&config.text, &defaults.text);
        let selected_background = parse_color(&config.selected_background, &defaults.selected_background);

        Self {
            header: Style::default()
                .fg(text)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            footer: Style::default()
                .fg(muted)
                .add_modifier(Modifier::ITALIC),
            border: Style::default().fg(muted),
            selected_border: Style::default().fg(accent_bright),
            selected_background,
            title: Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD),
            url: Style::default()
                .fg(success)
                .add_modifier(Modifier::UNDERLINED),
            snippet: Style::default().fg(text),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn parse_color(value: &str, fallback: &str) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        tracing::warn!(color = %value, "invalid theme color, using default");
        Color::from_str(fallback).unwrap_or(Color::Reset)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_and_named_colors() {
        let config = ThemeConfig {
            accent: "#102030".to_string(),
            success: "green".to_string(),
            ..ThemeConfig::default()
        };

        let theme = Theme::from_config(&config);

        assert_eq!(theme.title.fg, Some(Color::Rgb(0x10, 0x20, 0x30)));
        assert_eq!(theme.header.bg, Some(Color::Rgb(0x10, 0x20, 0x30)));
        assert_eq!(theme.url.fg, Some(Color::Green));
    }

    #[test]
    fn test_invalid_color_falls_back_to_default() {
        let config = ThemeConfig {
            muted: "not-a-colour".to_string(),
            ..ThemeConfig::default()
        };

        let theme = Theme::from_config(&config);

        assert_eq!(theme.border.fg, Some(Color::Rgb(0x88, 0x88, 0x88)));
    }
}
