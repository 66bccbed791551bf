//! Input model: mouse buttons, keys, and the interaction state machine.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. Dragging and resizing are mutually exclusive; focus lives
//! separately in `UiState` because it can overlap either gesture and survives
//! after the gesture ends.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{BoardId, ItemId, Position, Size};
use crate::hit::ResizeAnchor;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Keys that remove the focused item.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The single focused item, if any.
    pub focused_id: Option<ItemId>,
    /// Cursor last reported to the host.
    pub cursor: Option<&'static str>,
}

/// Internal state for the input state machine.
///
/// Each active variant records the board it started on; a gesture whose board
/// is no longer active is abandoned instead of writing into another board.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an item.
    Dragging {
        /// Id of the item being dragged.
        id: ItemId,
        /// Board the gesture started on.
        board_id: BoardId,
        /// Board-space pointer position at pointer-down.
        start: Point,
        /// Item position at pointer-down.
        orig: Position,
    },
    /// The user is resizing an item by one of its eight handles.
    Resizing {
        /// Id of the item being resized.
        id: ItemId,
        /// Board the gesture started on.
        board_id: BoardId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// Board-space pointer position at pointer-down.
        start: Point,
        /// Item position at pointer-down.
        orig_pos: Position,
        /// Item size at pointer-down.
        orig_size: Size,
    },
}

impl InputState {
    /// Id of the item under manipulation, if a gesture is active.
    #[must_use]
    pub fn active_item(&self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
