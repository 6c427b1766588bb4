use crate::config::theme::ThemeConfig;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Engine used when `--engine` is not given (ddg, wiki, hn, reddit)
    #[serde(default = "default_engine")]
    pub default_engine: String,

    /// Default result limit (0 = unbounded)
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Enable debug logging to a file
    #[serde(default)]
    pub debug: bool,

    /// Debug log file or directory (defaults next to the config file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// How many rotated log files to keep (0 = keep everything)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_engine: default_engine(),
            limit: default_limit(),
            debug: false,
            debug_log_path: None,
            debug_log_rotation: None,
            debug_log_keep: None,
            http: HttpConfig::default(),
            browser: BrowserConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Outbound request settings shared by every provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client identifier sent to providers that require one
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Result browser behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Widest a result box may grow, in columns
    #[serde(default = "default_max_item_width")]
    pub max_item_width: u16,

    /// Lines moved per mouse wheel step
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,

    /// Leave the browser after opening a result
    #[serde(default)]
    pub quit_on_open: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            max_item_width: default_max_item_width(),
            scroll_lines: default_scroll_lines(),
            quit_on_open: false,
        }
    }
}

/// Debug log rotation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    /// Append to a single file
    None,
    /// One file per day
    Daily,
    /// One file per run
    Session,
}

fn default_engine() -> String {
    "ddg".to_string()
}

fn default_limit() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("atlas/{} (terminal search client)", env!("CARGO_PKG_VERSION"))
}

fn default_max_item_width() -> u16 {
    100
}

fn default_scroll_lines() -> u16 {
    3
}
