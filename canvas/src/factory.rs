//! Item construction with per-kind default geometry.
//!
//! Every constructor returns a fully initialized `Item` with a fresh id and
//! `z_index` 0. Creation never fails: video URLs are stored verbatim and only
//! resolved at render time (see [`crate::media`]).

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use uuid::Uuid;

use crate::consts::{
    DEFAULT_ITEM_X, DEFAULT_ITEM_Y, IMAGE_HEIGHT, IMAGE_WIDTH, TEXT_HEIGHT, TEXT_PLACEHOLDER, TEXT_WIDTH,
    VIDEO_HEIGHT, VIDEO_WIDTH,
};
use crate::doc::{Item, ItemKind, Position, Size};

fn default_position() -> Position {
    Position::new(DEFAULT_ITEM_X, DEFAULT_ITEM_Y)
}

fn build(kind: ItemKind, content: String, position: Position, size: Size) -> Item {
    Item { id: Uuid::new_v4(), kind, content, position, size, z_index: 0 }
}

/// Create an image item from a ready-to-render reference (URL or data URI).
#[must_use]
pub fn create_image(content_ref: &str, position: Option<Position>) -> Item {
    build(
        ItemKind::Image,
        content_ref.to_string(),
        position.unwrap_or_else(default_position),
        Size::new(IMAGE_WIDTH, IMAGE_HEIGHT),
    )
}

/// Create a text item, falling back to the placeholder text.
#[must_use]
pub fn create_text(initial_text: Option<&str>) -> Item {
    build(
        ItemKind::Text,
        initial_text.unwrap_or(TEXT_PLACEHOLDER).to_string(),
        default_position(),
        Size::new(TEXT_WIDTH, TEXT_HEIGHT),
    )
}

/// Create a video item. The raw URL is kept as-is, even if it will not resolve.
#[must_use]
pub fn create_video(raw_url: &str) -> Item {
    build(ItemKind::Video, raw_url.to_string(), default_position(), Size::new(VIDEO_WIDTH, VIDEO_HEIGHT))
}

/// Create an image item from a generated image reference.
#[must_use]
pub fn create_from_ai_result(image_ref: &str) -> Item {
    create_image(image_ref, None)
}
