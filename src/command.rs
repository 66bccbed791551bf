//! Input commands: one JSON object per line on stdin.
//!
//! Every command carries an `op` tag naming the operation, e.g.
//! `{"op":"pointer_down","x":60,"y":124}` or `{"op":"generate","prompt":"fog"}`.
//! Coordinates on pointer commands are screen coordinates; the controller's
//! viewport maps them onto the board.

use canvas::doc::{BoardId, ItemId, PartialItem};
use canvas::input::Button;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("malformed command: {0}")]
    Decode(String),
}

impl CommandError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "E_BAD_COMMAND",
        }
    }
}

/// Mouse button as named on the wire. Omitted means primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl From<PointerButton> for Button {
    fn from(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => Self::Primary,
            PointerButton::Middle => Self::Middle,
            PointerButton::Secondary => Self::Secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    // --- Boards ---
    CreateBoard {
        name: String,
    },
    SelectBoard {
        id: BoardId,
    },
    RenameBoard {
        id: BoardId,
        name: String,
    },
    ListBoards,

    // --- Item creation ---
    /// `content` is a ready-to-render reference (URL or data URI).
    AddImage {
        content: String,
        x: Option<f64>,
        y: Option<f64>,
    },
    AddText {
        text: Option<String>,
    },
    AddVideo {
        url: String,
    },
    Generate {
        prompt: String,
    },

    // --- Item edits ---
    EditText {
        id: ItemId,
        content: String,
    },
    UpdateItem {
        id: ItemId,
        fields: PartialItem,
    },
    DeleteItem {
        id: ItemId,
    },
    Focus {
        id: ItemId,
    },
    Blur,

    // --- Raw input ---
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    KeyDown {
        key: String,
    },
    Scroll {
        x: f64,
        y: f64,
    },

    // --- Settings panel ---
    SetFont {
        font: String,
    },
    SetFontSize {
        size: u32,
    },
    SetCanvasSize {
        width: u32,
        height: u32,
    },

    Save,
    Render,
}

/// Decode one input line.
///
/// # Errors
///
/// Returns [`CommandError::Decode`] if the line is not a known command.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    serde_json::from_str(line).map_err(|e| CommandError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;
