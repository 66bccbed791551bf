//! Board/item model and canvas interaction engine for the moodboard editor.
//!
//! This crate owns everything about a session's boards that is not
//! presentation: the entity graph (boards containing items), item
//! construction, video URL resolution, and the interaction state machine that
//! turns pointer input into drag, resize, focus and z-order changes. The host
//! wires input events to [`engine::CanvasController`] and reacts to the
//! [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction engine over the active board |
//! | [`doc`] | Boards, items, and the in-memory board store |
//! | [`factory`] | Item construction with per-kind defaults |
//! | [`media`] | Video URL → embed identifier resolution |
//! | [`camera`] | Screen ↔ board coordinate conversion |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing items, resize handles and delete buttons |
//! | [`render`] | Per-kind render dispatch in paint order |
//! | [`consts`] | Default geometry, handle sizes, media constants |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod factory;
pub mod hit;
pub mod input;
pub mod media;
pub mod render;
