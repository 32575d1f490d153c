use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::board::arbiter::DisplayMode;

/// Catppuccin Mocha by default, overridable via `theme.toml` 🎨
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
        }
    }
}

impl Theme {
    /// Frame border colour per display mode.
    pub fn mode_accent(&self, mode: Option<DisplayMode>) -> Color {
        match mode {
            Some(DisplayMode::Fixed) => self.blue,
            Some(DisplayMode::OnlyCurrent) => self.green,
            Some(DisplayMode::Natural) | Some(DisplayMode::Empty) | None => self.magenta,
        }
    }
}

// Helper for serialization/deserialization
#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

/// Read the theme at `path`, writing the default one there if it is missing.
pub fn load_theme(path: &Path) -> Theme {
    if !path.exists() {
        let default_theme = Theme::default();
        let wrapper = ThemeFile {
            theme: default_theme.clone(),
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(toml_str) = toml::to_string_pretty(&wrapper) {
            let _ = fs::write(path, toml_str);
        }
        return default_theme;
    }

    let Ok(content) = fs::read_to_string(path) else {
        return Theme::default();
    };
    // Nested [theme] first, then a flat file
    if let Ok(wrapper) = toml::from_str::<ThemeFile>(&content) {
        return wrapper.theme;
    }
    match toml::from_str::<Theme>(&content) {
        Ok(theme) => theme,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "bad theme file, using default");
            Theme::default()
        }
    }
}
