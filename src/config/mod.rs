pub mod settings;
pub mod theme;

pub use settings::{BrowserConfig, Config, DebugLogRotation, HttpConfig};
pub use theme::ThemeConfig;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the default configuration file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("atlas");

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from `path`, or write and return the defaults if it does not exist
pub fn load_or_create_config(path: &Path) -> Result<Config> {
    if path.exists() {
        return load_config(path);
    }

    let config = Config::default();
    save_config(path, &config)?;

    eprintln!("Created default config at: {}", path.display());

    Ok(config)
}

/// Load configuration from an existing file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Save configuration to file, creating the parent directory if needed
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    let content = toml::to_string_pretty(config)
        .context("Failed to serialize config")?;
    fs::write(path, content)
        .context("Failed to write config file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_or_create_config(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_saved_config_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.default_engine = "reddit".to_string();
        config.limit = 25;
        config.debug = true;
        config.debug_log_rotation = Some(DebugLogRotation::None);
        config.http.timeout_secs = 3;
        config.theme.accent = "cyan".to_string();
        save_config(&path, &config).unwrap();

        assert_eq!(load_or_create_config(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "limit = \"many\"").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
