use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{BoardError, Result};

/// Every tunable of the layout / scroll engine 🎛️
///
/// Distances are surface pixels, times are milliseconds. Stored under
/// `[display]` in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Pixels moved per scroll tick
    pub scroll_speed: f64,
    /// Pause at the top / bottom before reversing
    pub scroll_pause_ms: u64,
    /// Change-detector poll period
    pub update_interval_ms: u64,
    /// Scroll tick period
    pub scroll_interval_ms: u64,
    /// Delay between rendering new content and measuring it
    pub settle_delay_ms: u64,
    /// Extra decoration pass after the current song changes
    pub decoration_refresh_ms: u64,
    pub resize_debounce_ms: u64,

    /// Gap between the scroll viewport and a pinned current song
    pub extra_space_buffer: f64,
    /// Added to each entry's bottom when checking it is fully visible
    pub scroll_visibility_offset: f64,
    /// Added to measured content so overflow is detected a bit early
    pub safety_margin: f64,
    /// Viewport bottom padding in natural mode without a current song
    pub natural_mode_bottom_padding: f64,
    /// Extra scroll range so the last entry clears the bottom edge
    pub extra_scroll_space: f64,
    /// How far past the computed maximum the scroll may go
    pub bottom_scroll_buffer: f64,
    /// Upward shift of the current song when nothing has been sung yet
    pub only_current_top_margin: f64,

    /// Vertical space reserved outside the frame (title, footer...)
    pub frame_reserved_height: f64,
    /// Fixed frame height limit; overrides `frame_reserved_height`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frame_height: Option<f64>,

    pub decoration_inset: f64,
    pub decoration_overlap: f64,
    /// Scroll distance between decoration re-syncs
    pub decoration_sync_step: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scroll_speed: 1.0,
            scroll_pause_ms: 1000,
            update_interval_ms: 500,
            scroll_interval_ms: 50,
            settle_delay_ms: 50,
            decoration_refresh_ms: 100,
            resize_debounce_ms: 250,
            extra_space_buffer: 30.0,
            scroll_visibility_offset: 180.0,
            safety_margin: 80.0,
            natural_mode_bottom_padding: 40.0,
            extra_scroll_space: 20.0,
            bottom_scroll_buffer: 5.0,
            only_current_top_margin: 40.0,
            frame_reserved_height: 200.0,
            max_frame_height: None,
            decoration_inset: 40.0,
            decoration_overlap: 100.0,
            decoration_sync_step: 50.0,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.scroll_interval_ms == 0 {
            return Err(BoardError::InvalidConfig(
                "scroll_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.update_interval_ms == 0 {
            return Err(BoardError::InvalidConfig(
                "update_interval_ms must be greater than 0".to_string(),
            ));
        }
        if !(self.scroll_speed > 0.0) {
            return Err(BoardError::InvalidConfig(format!(
                "scroll_speed must be positive, got {}",
                self.scroll_speed
            )));
        }
        Ok(())
    }

    pub fn scroll_interval(&self) -> Duration {
        Duration::from_millis(self.scroll_interval_ms)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn decoration_refresh(&self) -> Duration {
        Duration::from_millis(self.decoration_refresh_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}
