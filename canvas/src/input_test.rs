use uuid::Uuid;

use super::*;

// =============================================================
// Key
// =============================================================

#[test]
fn delete_and_backspace_are_delete_keys() {
    assert!(Key("Delete".into()).is_delete());
    assert!(Key("Backspace".into()).is_delete());
    assert!(!Key("Escape".into()).is_delete());
}

#[test]
fn escape_key() {
    assert!(Key("Escape".into()).is_escape());
    assert!(!Key("Enter".into()).is_escape());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert!(state.is_idle());
    assert_eq!(state.active_item(), None);
}

#[test]
fn dragging_reports_active_item() {
    let id = Uuid::new_v4();
    let state = InputState::Dragging {
        id,
        board_id: BoardId(1),
        start: Point::new(0.0, 0.0),
        orig: Position::new(10.0, 10.0),
    };
    assert!(!state.is_idle());
    assert_eq!(state.active_item(), Some(id));
}

#[test]
fn resizing_reports_active_item() {
    let id = Uuid::new_v4();
    let state = InputState::Resizing {
        id,
        board_id: BoardId(1),
        anchor: ResizeAnchor::Se,
        start: Point::new(0.0, 0.0),
        orig_pos: Position::new(0.0, 0.0),
        orig_size: Size::new(10.0, 10.0),
    };
    assert_eq!(state.active_item(), Some(id));
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default_has_no_focus() {
    let ui = UiState::default();
    assert!(ui.focused_id.is_none());
    assert!(ui.cursor.is_none());
}
