use serde::{Deserialize, Serialize};

/// Colour settings as written in the config file.
///
/// Values are `#RRGGBB` or ratatui colour names; they are resolved once
/// into a [`crate::tui::Theme`] at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Header background and result titles
    #[serde(default = "default_accent")]
    pub accent: String,

    /// Border of the selected result
    #[serde(default = "default_accent_bright")]
    pub accent_bright: String,

    /// Result URLs
    #[serde(default = "default_success")]
    pub success: String,

    /// Unselected borders and the footer
    #[serde(default = "default_muted")]
    pub muted: String,

    /// Snippets and header text
    #[serde(default = "default_text")]
    pub text: String,

    /// Background of the selected result
    #[serde(default = "default_selected_background")]
    pub selected_background: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: default_accent(),
            accent_bright: default_accent_bright(),
            success: default_success(),
            muted: default_muted(),
            text: default_text(),
            selected_background: default_selected_background(),
        }
    }
}

fn default_accent() -> String {
    "#7D56F4".to_string()
}

fn default_accent_bright() -> String {
    "#9D76FF".to_string()
}

fn default_success() -> String {
    "#04B575".to_string()
}

fn default_muted() -> String {
    "#888888".to_string()
}

fn default_text() -> String {
    "#FFFFFF".to_string()
}

fn default_selected_background() -> String {
    "#2D2D2D".to_string()
}
