//! Session configuration parsed from environment variables.
//!
//! All variables are optional. Unparsable numbers are an error rather than a
//! silent fallback, so a typo in a deployment shows up at startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_AI_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_AI_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FONT: &str = "Arial";
pub const DEFAULT_FONT_SIZE: u32 = 16;
pub const DEFAULT_CANVAS_WIDTH: u32 = 1920;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    /// Image generation endpoint. `None` selects the placeholder generator.
    pub url: Option<String>,
    pub timeouts: AiTimeouts,
}

/// Presentation settings from the settings panel.
///
/// Only text restyling touches board data; canvas size is handed to the
/// renderer and never constrains item geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub font: String,
    pub font_size: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub ai: AiConfig,
    /// Directory for saved boards. `None` means saves are only logged.
    pub save_dir: Option<PathBuf>,
    /// Name of the board the session starts with.
    pub default_board: String,
    pub settings: Settings,
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `MOODBOARD_AI_URL`: image generation endpoint
    /// - `MOODBOARD_AI_TIMEOUT_SECS`: default 60
    /// - `MOODBOARD_AI_CONNECT_TIMEOUT_SECS`: default 10
    /// - `MOODBOARD_SAVE_DIR`: write saved boards here as JSON
    /// - `MOODBOARD_DEFAULT_BOARD`: default `"Board 1"`
    /// - `MOODBOARD_FONT`, `MOODBOARD_FONT_SIZE`: default `Arial`, 16
    /// - `MOODBOARD_CANVAS_WIDTH`, `MOODBOARD_CANVAS_HEIGHT`: default 1920×1080
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a numeric variable is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a numeric value is not a number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = non_blank("MOODBOARD_AI_URL").map(|u| u.trim_end_matches('/').to_string());
        let timeouts = AiTimeouts {
            request_secs: parse_or(&lookup, "MOODBOARD_AI_TIMEOUT_SECS", DEFAULT_AI_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "MOODBOARD_AI_CONNECT_TIMEOUT_SECS", DEFAULT_AI_CONNECT_TIMEOUT_SECS)?,
        };
        let save_dir = non_blank("MOODBOARD_SAVE_DIR").map(PathBuf::from);
        let default_board =
            non_blank("MOODBOARD_DEFAULT_BOARD").unwrap_or_else(|| canvas::consts::DEFAULT_BOARD_NAME.to_string());
        let settings = Settings {
            font: non_blank("MOODBOARD_FONT").unwrap_or_else(|| DEFAULT_FONT.to_string()),
            font_size: parse_or(&lookup, "MOODBOARD_FONT_SIZE", DEFAULT_FONT_SIZE)?,
            canvas_width: parse_or(&lookup, "MOODBOARD_CANVAS_WIDTH", DEFAULT_CANVAS_WIDTH)?,
            canvas_height: parse_or(&lookup, "MOODBOARD_CANVAS_HEIGHT", DEFAULT_CANVAS_HEIGHT)?,
        };

        Ok(Self { ai: AiConfig { url, timeouts }, save_dir, default_board, settings })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig {
                url: None,
                timeouts: AiTimeouts {
                    request_secs: DEFAULT_AI_REQUEST_TIMEOUT_SECS,
                    connect_secs: DEFAULT_AI_CONNECT_TIMEOUT_SECS,
                },
            },
            save_dir: None,
            default_board: canvas::consts::DEFAULT_BOARD_NAME.to_string(),
            settings: Settings::default(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Parse(format!("{key}: expected a number, got '{raw}'"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
