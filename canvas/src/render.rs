//! Render dispatch: one positioned node per item, in paint order.
//!
//! The host draws nodes bottom to top. Only the payload differs by item kind,
//! and `render_item` is the single place that switches on it. Video URLs are
//! resolved here; one that does not resolve yields an empty embed rather than
//! an error.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::doc::{Board, Item, ItemId, ItemKind};
use crate::hit::paint_order;
use crate::media;

/// Variant-specific payload of a rendered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeContent {
    Image { src: String },
    Text { html: String },
    /// `embed_url` is `None` when the source URL did not resolve.
    Video { embed_url: Option<String> },
}

/// A positioned item ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: ItemId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i64,
    pub focused: bool,
    pub content: NodeContent,
}

/// Build the draw list for a board.
#[must_use]
pub fn render_board(board: &Board, focused: Option<ItemId>) -> Vec<RenderNode> {
    paint_order(&board.items)
        .into_iter()
        .map(|item| render_item(item, focused == Some(item.id)))
        .collect()
}

/// Build the draw node for one item.
#[must_use]
pub fn render_item(item: &Item, focused: bool) -> RenderNode {
    let content = match item.kind {
        ItemKind::Image => NodeContent::Image { src: item.content.clone() },
        ItemKind::Text => NodeContent::Text { html: item.content.clone() },
        ItemKind::Video => NodeContent::Video { embed_url: media::embed_url(&item.content) },
    };
    RenderNode {
        id: item.id,
        x: item.position.x,
        y: item.position.y,
        width: item.size.width,
        height: item.size.height,
        z_index: item.z_index,
        focused,
        content,
    }
}
