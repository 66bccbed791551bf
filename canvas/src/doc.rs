//! Document model: boards, their items, and the in-memory store.
//!
//! This module defines the data types that describe what is on a moodboard
//! (`Board`, `Item`, `ItemKind`), a sparse-update type for incremental edits
//! (`PartialItem`), and the runtime store that owns every board for the
//! session (`BoardStore`).
//!
//! All item mutation is scoped to the *active* board: none of the item
//! operations take a board id. Exactly one board is active at any time and the
//! store never holds zero boards, because boards can be created and renamed
//! but never removed.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Unique identifier for an item.
pub type ItemId = Uuid;

/// Opaque board identifier, allocated in increasing order by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(pub u64);

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of content an item carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Image referenced by URL or inline data URI.
    Image,
    /// Editable text, stored as an HTML fragment.
    Text,
    /// Embedded video; `content` holds the raw source URL.
    Video,
}

/// Top-left corner of an item in board-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of an item in pixels. Both are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and greater than zero.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A positioned, sized, type-tagged unit of content on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier; never reused within a board.
    pub id: ItemId,
    /// Content variant.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Variant-specific payload (image reference, HTML text, or raw video URL).
    pub content: String,
    /// Top-left corner in board-local pixels.
    pub position: Position,
    /// Bounding box size.
    pub size: Size,
    /// Paint-order key; higher values paint above lower ones.
    pub z_index: i64,
}

/// A named, isolated canvas holding its own items in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub items: Vec<Item>,
}

impl Board {
    /// Look up an item on this board.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == *id)
    }
}

/// Sparse update for an item. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialItem {
    /// New position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// New size, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// New content, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New z-index, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl PartialItem {
    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.size.is_none() && self.content.is_none() && self.z_index.is_none()
    }
}

/// In-memory store of every board in the session.
#[derive(Debug, Clone)]
pub struct BoardStore {
    boards: Vec<Board>,
    /// Index into `boards`; valid because boards are never removed.
    active: usize,
    next_board_id: u64,
}

impl BoardStore {
    /// Create a store holding a single empty board named `default_name`,
    /// which becomes the active board.
    #[must_use]
    pub fn new(default_name: &str) -> Self {
        let first = Board { id: BoardId(1), name: default_name.to_string(), items: Vec::new() };
        Self { boards: vec![first], active: 0, next_board_id: 2 }
    }

    // --- Boards ---

    /// Append a new empty board and make it active.
    ///
    /// Returns `None` without creating anything when `name` is blank.
    pub fn create_board(&mut self, name: &str) -> Option<BoardId> {
        if name.trim().is_empty() {
            debug!("create_board: rejected blank name");
            return None;
        }
        let id = BoardId(self.next_board_id);
        self.next_board_id += 1;
        self.boards.push(Board { id, name: name.to_string(), items: Vec::new() });
        self.active = self.boards.len() - 1;
        debug!(%id, name, "board created");
        Some(id)
    }

    /// Make `id` the active board. Returns false (and changes nothing) if no
    /// such board exists.
    pub fn select_board(&mut self, id: BoardId) -> bool {
        let Some(index) = self.boards.iter().position(|b| b.id == id) else {
            debug!(%id, "select_board: unknown board");
            return false;
        };
        self.active = index;
        true
    }

    /// Rename a board. Blank names and unknown ids are refused.
    pub fn rename_board(&mut self, id: BoardId, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        let Some(board) = self.boards.iter_mut().find(|b| b.id == id) else {
            return false;
        };
        board.name = name.to_string();
        true
    }

    /// Id of the active board.
    #[must_use]
    pub fn active_id(&self) -> BoardId {
        self.boards[self.active].id
    }

    /// The active board.
    #[must_use]
    pub fn active_board(&self) -> &Board {
        &self.boards[self.active]
    }

    /// All boards in creation order.
    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Look up any board by id.
    #[must_use]
    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    /// Number of boards. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Always false.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    // --- Items (active board only) ---

    /// Items of the active board in creation order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.active_board().items
    }

    /// Look up an item on the active board.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.active_board().item(id)
    }

    /// Append an item to the active board.
    ///
    /// Returns false if an item with the same id already lives on the active
    /// board, or if the item's size is not strictly positive.
    pub fn add_item(&mut self, item: Item) -> bool {
        if !item.size.is_valid() {
            debug!(item_id = %item.id, "add_item: rejected invalid size");
            return false;
        }
        let board = &mut self.boards[self.active];
        if board.items.iter().any(|existing| existing.id == item.id) {
            debug!(item_id = %item.id, board_id = %board.id, "add_item: duplicate id");
            return false;
        }
        board.items.push(item);
        true
    }

    /// Merge `partial` into the item with `id` on the active board.
    ///
    /// Returns false if the item does not exist (a stale reference, e.g. an
    /// update racing a delete) or if the update carries an invalid size.
    pub fn update_item(&mut self, id: &ItemId, partial: &PartialItem) -> bool {
        if partial.size.is_some_and(|size| !size.is_valid()) {
            debug!(item_id = %id, "update_item: rejected invalid size");
            return false;
        }
        let board = &mut self.boards[self.active];
        let Some(item) = board.items.iter_mut().find(|item| item.id == *id) else {
            debug!(item_id = %id, board_id = %board.id, "update_item: stale reference");
            return false;
        };
        if let Some(position) = partial.position {
            item.position = position;
        }
        if let Some(size) = partial.size {
            item.size = size;
        }
        if let Some(ref content) = partial.content {
            item.content.clone_from(content);
        }
        if let Some(z) = partial.z_index {
            item.z_index = z;
        }
        true
    }

    /// Remove the item with `id` from the active board, returning it if it was
    /// present.
    pub fn delete_item(&mut self, id: &ItemId) -> Option<Item> {
        let board = &mut self.boards[self.active];
        let index = board.items.iter().position(|item| item.id == *id)?;
        Some(board.items.remove(index))
    }

    /// Rewrite the content of every text item on every board.
    ///
    /// This is the one operation that reaches past the active board; it is
    /// driven by the presentation settings, never by item interaction.
    /// Returns the number of items rewritten.
    pub fn restyle_text(&mut self, mut restyle: impl FnMut(&str) -> String) -> usize {
        let mut count = 0;
        for item in self.boards.iter_mut().flat_map(|b| b.items.iter_mut()) {
            if item.kind == ItemKind::Text {
                item.content = restyle(&item.content);
                count += 1;
            }
        }
        count
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_BOARD_NAME)
    }
}
