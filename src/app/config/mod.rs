use std::fs;
use std::path::{Path, PathBuf};

pub mod display;
pub mod user;

pub use display::DisplayConfig;
pub use user::{StoreConfig, TerminalConfig, UserConfig};

use crate::error::{BoardError, Result};

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("singboard");

        // Ensure it exists
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }

        dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_theme_path() -> PathBuf {
        Self::get_config_dir().join("theme.toml")
    }

    /// Load `config.toml`, creating it with defaults when missing. A broken
    /// file falls back to defaults with a warning.
    pub fn load() -> UserConfig {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            let config = UserConfig::default();
            if let Ok(content) = toml::to_string_pretty(&config) {
                let _ = fs::write(&config_path, content);
            }
            return config;
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default config");
                UserConfig::default()
            }
        }
    }

    /// Strict load of an explicit file.
    pub fn load_from(path: &Path) -> Result<UserConfig> {
        let content = fs::read_to_string(path).map_err(|source| BoardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: UserConfig =
            toml::from_str(&content).map_err(|source| BoardError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.display.validate()?;
        Ok(config)
    }

    /// Default config as TOML, for `--generate-config`.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&UserConfig::default()).unwrap_or_default()
    }
}
