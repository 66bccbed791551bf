#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::HEADER_HEIGHT_PX;
use crate::doc::Position;

/// A point in either screen or board space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Position> for Point {
    fn from(p: Position) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Maps screen coordinates onto the scrollable board surface.
///
/// The board sits below the toolbar (`header_height`) and may be scrolled by
/// `scroll_x` / `scroll_y`. There is no zoom: one screen pixel is one board
/// pixel.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub header_height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { header_height: HEADER_HEIGHT_PX, scroll_x: 0.0, scroll_y: 0.0 }
    }
}

impl Viewport {
    /// Convert a screen-space point (CSS pixels) to board-local coordinates.
    #[must_use]
    pub fn screen_to_board(&self, screen: Point) -> Point {
        Point { x: screen.x + self.scroll_x, y: screen.y - self.header_height + self.scroll_y }
    }

    /// Convert a board-local point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn board_to_screen(&self, board: Point) -> Point {
        Point { x: board.x - self.scroll_x, y: board.y + self.header_height - self.scroll_y }
    }
}
