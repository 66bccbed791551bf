#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::{DELETE_BUTTON_PX, HANDLE_RADIUS_PX};
use crate::doc::{Item, ItemId};

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
    DeleteButton,
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub item_id: ItemId,
    pub part: HitPart,
}

/// Items in paint order: ascending `z_index`, ties broken by insertion order.
#[must_use]
pub fn paint_order(items: &[Item]) -> Vec<&Item> {
    let mut ordered: Vec<&Item> = items.iter().collect();
    // Stable sort keeps insertion order for equal z.
    ordered.sort_by_key(|item| item.z_index);
    ordered
}

/// Test which item (if any) is under `pt`, topmost first.
///
/// Within an item the delete button wins over resize handles, which win over
/// the body. Handles extend `HANDLE_RADIUS_PX` outside the item's edges.
#[must_use]
pub fn hit_test(pt: Point, items: &[Item]) -> Option<Hit> {
    paint_order(items)
        .into_iter()
        .rev()
        .find_map(|item| hit_item(pt, item).map(|part| Hit { item_id: item.id, part }))
}

fn hit_item(pt: Point, item: &Item) -> Option<HitPart> {
    let left = item.position.x;
    let top = item.position.y;
    let right = left + item.size.width;
    let bottom = top + item.size.height;
    let r = HANDLE_RADIUS_PX;

    if pt.x < left - r || pt.x > right + r || pt.y < top - r || pt.y > bottom + r {
        return None;
    }

    if pt.x >= right - DELETE_BUTTON_PX && pt.x <= right && pt.y >= top && pt.y <= top + DELETE_BUTTON_PX {
        return Some(HitPart::DeleteButton);
    }

    let near_left = (pt.x - left).abs() <= r;
    let near_right = (pt.x - right).abs() <= r;
    let near_top = (pt.y - top).abs() <= r;
    let near_bottom = (pt.y - bottom).abs() <= r;

    let anchor = match (near_top, near_bottom, near_left, near_right) {
        (true, _, true, _) => Some(ResizeAnchor::Nw),
        (true, _, _, true) => Some(ResizeAnchor::Ne),
        (_, true, true, _) => Some(ResizeAnchor::Sw),
        (_, true, _, true) => Some(ResizeAnchor::Se),
        (true, _, _, _) => Some(ResizeAnchor::N),
        (_, true, _, _) => Some(ResizeAnchor::S),
        (_, _, true, _) => Some(ResizeAnchor::W),
        (_, _, _, true) => Some(ResizeAnchor::E),
        _ => None,
    };
    if let Some(anchor) = anchor {
        return Some(HitPart::ResizeHandle(anchor));
    }

    let inside = pt.x >= left && pt.x <= right && pt.y >= top && pt.y <= bottom;
    inside.then_some(HitPart::Body)
}
