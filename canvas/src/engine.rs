//! Canvas controller: the interaction engine over the active board.
//!
//! `CanvasController` owns the `BoardStore` and turns discrete input events
//! (pointer down/move/up, keys, focus requests) into store mutations. Every
//! mutation is applied immediately and reported back to the host as an
//! [`Action`], so the host can refresh its view without diffing.
//!
//! Z-order promotion uses one counter for the whole session. Each promotion
//! increments it and assigns the new value, so the most recently touched item
//! always paints on top and no two promotions tie.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::debug;

use crate::camera::{Point, Viewport};
use crate::consts::MIN_ITEM_SIZE;
use crate::doc::{BoardId, BoardStore, Item, ItemId, ItemKind, PartialItem, Position, Size};
use crate::hit::{HitPart, ResizeAnchor, hit_test};
use crate::input::{Button, InputState, Key, UiState};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Action {
    ItemCreated { item: Item },
    ItemUpdated { id: ItemId, fields: PartialItem },
    ItemDeleted { id: ItemId },
    FocusChanged { id: Option<ItemId> },
    BoardCreated { id: BoardId, name: String },
    BoardSelected { id: BoardId },
    BoardRenamed { id: BoardId, name: String },
    SetCursor { cursor: String },
}

/// Interaction engine for the item set of the active board.
pub struct CanvasController {
    pub store: BoardStore,
    pub ui: UiState,
    pub input: InputState,
    pub viewport: Viewport,
    z_counter: i64,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new(BoardStore::default())
    }
}

impl CanvasController {
    /// Wrap a store. The z-order counter starts at the active board's item
    /// count, or at its highest z-index if that is larger.
    #[must_use]
    pub fn new(store: BoardStore) -> Self {
        let count = i64::try_from(store.items().len()).unwrap_or(i64::MAX);
        let top = store.items().iter().map(|item| item.z_index).max().unwrap_or(0);
        Self {
            store,
            ui: UiState::default(),
            input: InputState::default(),
            viewport: Viewport::default(),
            z_counter: count.max(top),
        }
    }

    // --- Boards ---

    /// Create a board and switch to it.
    ///
    /// Returns `None` when the name is blank; nothing changes in that case,
    /// not even focus.
    pub fn create_board(&mut self, name: &str) -> Option<Vec<Action>> {
        let id = self.store.create_board(name)?;
        let mut actions = self.leave_board();
        actions.push(Action::BoardCreated { id, name: name.to_string() });
        actions.push(Action::BoardSelected { id });
        Some(actions)
    }

    /// Switch the active board. Unknown ids are ignored.
    ///
    /// Any gesture in progress ends and focus is cleared, since both refer to
    /// items of the board being left.
    pub fn select_board(&mut self, id: BoardId) -> Vec<Action> {
        if self.store.board(id).is_none() {
            debug!(%id, "select_board: unknown board");
            return Vec::new();
        }
        let mut actions = self.leave_board();
        self.store.select_board(id);
        actions.push(Action::BoardSelected { id });
        actions
    }

    /// Rename a board. Blank names and unknown ids are ignored.
    pub fn rename_board(&mut self, id: BoardId, name: &str) -> Option<Action> {
        self.store
            .rename_board(id, name)
            .then(|| Action::BoardRenamed { id, name: name.to_string() })
    }

    fn leave_board(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        self.set_focus(None).into_iter().collect()
    }

    // --- Items ---

    /// Insert a new item into the active board.
    pub fn add_item(&mut self, item: Item) -> Option<Action> {
        let created = item.clone();
        if !self.store.add_item(item) {
            return None;
        }
        self.observe_z(created.z_index);
        Some(Action::ItemCreated { item: created })
    }

    /// Merge fields into an item on the active board. Stale ids are ignored.
    ///
    /// An explicit `z_index` is allowed; the promotion counter is raised to
    /// it so the next promotion still lands above every sibling.
    pub fn update_item(&mut self, id: &ItemId, fields: PartialItem) -> Option<Action> {
        if !self.store.update_item(id, &fields) {
            return None;
        }
        if let Some(z) = fields.z_index {
            self.observe_z(z);
        }
        Some(Action::ItemUpdated { id: *id, fields })
    }

    /// Keep the promotion counter at or above every z-index on any board.
    fn observe_z(&mut self, z: i64) {
        self.z_counter = self.z_counter.max(z);
    }

    /// Replace the content of a text item.
    pub fn edit_text(&mut self, id: &ItemId, content: &str) -> Option<Action> {
        if self.store.item(id)?.kind != ItemKind::Text {
            return None;
        }
        self.update_item(id, PartialItem { content: Some(content.to_string()), ..Default::default() })
    }

    /// Permanently remove an item from the active board.
    ///
    /// Clears focus and abandons the gesture if either referred to it.
    pub fn delete_item(&mut self, id: &ItemId) -> Vec<Action> {
        if self.store.delete_item(id).is_none() {
            debug!(item_id = %id, "delete_item: stale reference");
            return Vec::new();
        }
        let mut actions = vec![Action::ItemDeleted { id: *id }];
        if self.input.active_item() == Some(*id) {
            self.input = InputState::Idle;
        }
        if self.ui.focused_id == Some(*id) {
            actions.extend(self.set_focus(None));
        }
        actions
    }

    // --- Focus and z-order ---

    /// Focus an item and bring it to the front.
    pub fn focus(&mut self, id: &ItemId) -> Vec<Action> {
        let Some(promoted) = self.promote(id) else {
            return Vec::new();
        };
        let mut actions: Vec<Action> = self.set_focus(Some(*id)).into_iter().collect();
        actions.push(promoted);
        actions
    }

    /// Drop focus. Geometry and z-order are untouched.
    pub fn blur(&mut self) -> Vec<Action> {
        self.set_focus(None).into_iter().collect()
    }

    /// Assign the next z-index to `id`. Returns `None` if the item is absent.
    pub fn promote(&mut self, id: &ItemId) -> Option<Action> {
        self.store.item(id)?;
        self.z_counter += 1;
        self.update_item(id, PartialItem { z_index: Some(self.z_counter), ..Default::default() })
    }

    fn set_focus(&mut self, id: Option<ItemId>) -> Option<Action> {
        if self.ui.focused_id == id {
            return None;
        }
        self.ui.focused_id = id;
        Some(Action::FocusChanged { id })
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        // A pointer-down without a matching pointer-up ends the old gesture.
        self.input = InputState::Idle;

        let pt = self.viewport.screen_to_board(screen_pt);
        let Some(hit) = hit_test(pt, self.store.items()) else {
            return self.blur();
        };
        let Some(item) = self.store.item(&hit.item_id) else {
            return Vec::new();
        };
        let (orig_pos, orig_size) = (item.position, item.size);
        let board_id = self.store.active_id();

        let cursor = match hit.part {
            HitPart::DeleteButton => return self.delete_item(&hit.item_id),
            HitPart::Body => {
                self.input = InputState::Dragging { id: hit.item_id, board_id, start: pt, orig: orig_pos };
                "move"
            }
            HitPart::ResizeHandle(anchor) => {
                self.input = InputState::Resizing {
                    id: hit.item_id,
                    board_id,
                    anchor,
                    start: pt,
                    orig_pos,
                    orig_size,
                };
                anchor.cursor()
            }
        };

        let mut actions = self.focus(&hit.item_id);
        actions.extend(self.set_cursor(cursor));
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let pt = self.viewport.screen_to_board(screen_pt);
        if self.input.is_idle() {
            let cursor = match hit_test(pt, self.store.items()).map(|hit| hit.part) {
                None => "default",
                Some(HitPart::Body) => "move",
                Some(HitPart::DeleteButton) => "pointer",
                Some(HitPart::ResizeHandle(anchor)) => anchor.cursor(),
            };
            return self.set_cursor(cursor).into_iter().collect();
        }
        self.apply_gesture(pt).into_iter().collect()
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || self.input.is_idle() {
            return Vec::new();
        }
        let pt = self.viewport.screen_to_board(screen_pt);
        let mut actions: Vec<Action> = self.apply_gesture(pt).into_iter().collect();
        self.input = InputState::Idle;
        actions.extend(self.set_cursor("default"));
        actions
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if key.is_escape() {
            return self.blur();
        }
        if key.is_delete() {
            if let Some(id) = self.ui.focused_id {
                return self.delete_item(&id);
            }
        }
        Vec::new()
    }

    /// Apply the active gesture for a pointer at board point `pt`.
    ///
    /// Abandons the gesture if its board is no longer active or its item is
    /// gone.
    fn apply_gesture(&mut self, pt: Point) -> Option<Action> {
        let (id, board_id, fields) = match self.input {
            InputState::Idle => return None,
            InputState::Dragging { id, board_id, start, orig } => {
                let position = Position::new(orig.x + pt.x - start.x, orig.y + pt.y - start.y);
                (id, board_id, PartialItem { position: Some(position), ..Default::default() })
            }
            InputState::Resizing { id, board_id, anchor, start, orig_pos, orig_size } => {
                let (position, size) = resize(anchor, orig_pos, orig_size, pt.x - start.x, pt.y - start.y);
                (id, board_id, PartialItem { position: Some(position), size: Some(size), ..Default::default() })
            }
        };

        if board_id != self.store.active_id() {
            debug!(item_id = %id, %board_id, "gesture abandoned: board switched");
            self.input = InputState::Idle;
            return None;
        }
        let action = self.update_item(&id, fields);
        if action.is_none() {
            self.input = InputState::Idle;
        }
        action
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Option<Action> {
        if self.ui.cursor == Some(cursor) {
            return None;
        }
        self.ui.cursor = Some(cursor);
        Some(Action::SetCursor { cursor: cursor.to_string() })
    }

    // --- Queries ---

    /// The currently focused item, if any.
    #[must_use]
    pub fn focused(&self) -> Option<ItemId> {
        self.ui.focused_id
    }

    /// Last z-index handed out by promotion.
    #[must_use]
    pub fn z_counter(&self) -> i64 {
        self.z_counter
    }

    /// Look up an item on the active board.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.store.item(id)
    }
}

/// New geometry for a resize by `(dx, dy)` from the original box.
///
/// The edge opposite the handle stays fixed; neither dimension drops below
/// `MIN_ITEM_SIZE`.
fn resize(anchor: ResizeAnchor, pos: Position, size: Size, dx: f64, dy: f64) -> (Position, Size) {
    let (mut left, mut top) = (pos.x, pos.y);
    let (mut width, mut height) = (size.width, size.height);
    let right = pos.x + size.width;
    let bottom = pos.y + size.height;

    if anchor.moves_left() {
        left = (pos.x + dx).min(right - MIN_ITEM_SIZE);
        width = right - left;
    } else if anchor.moves_right() {
        width = (size.width + dx).max(MIN_ITEM_SIZE);
    }

    if anchor.moves_top() {
        top = (pos.y + dy).min(bottom - MIN_ITEM_SIZE);
        height = bottom - top;
    } else if anchor.moves_bottom() {
        height = (size.height + dy).max(MIN_ITEM_SIZE);
    }

    (Position::new(left, top), Size::new(width, height))
}
