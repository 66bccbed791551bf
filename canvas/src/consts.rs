//! Shared numeric constants for the canvas crate.

// ── Boards ──────────────────────────────────────────────────────

/// Name of the board every session starts with.
pub const DEFAULT_BOARD_NAME: &str = "Board 1";

// ── Item defaults ───────────────────────────────────────────────

/// Default top-left corner for newly created items, in board pixels.
pub const DEFAULT_ITEM_X: f64 = 50.0;
pub const DEFAULT_ITEM_Y: f64 = 50.0;

/// Default image item size (also used for AI-generated images).
pub const IMAGE_WIDTH: f64 = 200.0;
pub const IMAGE_HEIGHT: f64 = 200.0;

/// Default text item size.
pub const TEXT_WIDTH: f64 = 200.0;
pub const TEXT_HEIGHT: f64 = 100.0;

/// Default video item size (16:9).
pub const VIDEO_WIDTH: f64 = 320.0;
pub const VIDEO_HEIGHT: f64 = 180.0;

/// Content of a freshly added text item.
pub const TEXT_PLACEHOLDER: &str = "New Text";

// ── Resizing ────────────────────────────────────────────────────

/// Smallest width or height a resize gesture can produce.
pub const MIN_ITEM_SIZE: f64 = 10.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit slop in pixels around item edges and corners for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Side length of the square delete button in an item's top-right corner.
pub const DELETE_BUTTON_PX: f64 = 20.0;

// ── Viewport ────────────────────────────────────────────────────

/// Height of the toolbar chrome above the canvas.
pub const HEADER_HEIGHT_PX: f64 = 64.0;

// ── Media ───────────────────────────────────────────────────────

/// Required length of a platform video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// Prefix for the embeddable player URL.
pub const EMBED_URL_PREFIX: &str = "https://www.youtube.com/embed/";
