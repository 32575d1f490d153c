use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::display::DisplayConfig;

/// User-editable configuration (read-only after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

/// Where the producer writes the song data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// A directory (one file per key) or a `.json` file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("singboard")
        .join("store")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// How virtual pixels map onto terminal cells, plus a few labels 🖥️
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub title: String,
    pub now_singing_label: String,
    /// Glyph drawn at the decoration anchor; empty disables it
    pub decoration_glyph: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            cell_width_px: 10.0,
            cell_height_px: 20.0,
            title: " 🎤 Sung Songs ".to_string(),
            now_singing_label: "♫ now singing".to_string(),
            decoration_glyph: "✦".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert_eq!(config.terminal, TerminalConfig::default());
        assert_eq!(config.display, DisplayConfig::default());
        assert!(config.store.path.ends_with("singboard/store"));
    }

    #[test]
    fn test_sections_override_independently() {
        let config: UserConfig = toml::from_str(
            r#"
            [store]
            path = "/tmp/board.json"

            [display]
            max_frame_height = 400.0
            "#,
        )
        .unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/board.json"));
        assert_eq!(config.display.max_frame_height, Some(400.0));
        assert_eq!(config.terminal.cell_height_px, 20.0);
    }
}
