//! Session state: the single-threaded owner of every board.
//!
//! DESIGN
//! ======
//! `Session` turns decoded commands into controller calls and forwards the
//! resulting actions to the event channel. It is owned by the event loop and
//! never shared, so no locking is involved. The one asynchronous operation,
//! image generation, runs in a spawned task; its `Completion` comes back
//! through the loop and is applied with `complete_generation`, which inserts
//! into whichever board is active at that moment.
//!
//! Every failure is handled here: a rejected or failed operation becomes a
//! `Notice` event and leaves the boards untouched.

use std::collections::HashSet;
use std::sync::Arc;

use canvas::camera::Point;
use canvas::doc::{BoardId, BoardStore, Position};
use canvas::engine::{Action, CanvasController};
use canvas::factory;
use canvas::input::Key;
use canvas::render::{RenderNode, render_board};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::command::{self, Command};
use crate::config::{AppConfig, Settings};
use crate::services::ai::{Completion, ImageGenerator, Prompt, spawn_generation};
use crate::services::persistence::BoardSink;

/// Generated images land at a random point in `[X.0, X.1) × [Y.0, Y.1)`.
const AI_DROP_X: (f64, f64) = (20.0, 420.0);
const AI_DROP_Y: (f64, f64) = (20.0, 320.0);

// =============================================================================
// EVENTS
// =============================================================================

/// One line of output. Canvas actions and session events share the `event`
/// tag namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Event {
    Canvas(Action),
    Session(SessionEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// User-visible message for a rejected or failed operation.
    Notice { code: String, message: String },
    Saved { board_id: BoardId },
    Boards { boards: Vec<BoardSummary>, active: BoardId },
    Scene { board_id: BoardId, nodes: Vec<RenderNode>, settings: Settings },
    SettingsChanged { settings: Settings },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    pub item_count: usize,
}

// =============================================================================
// SESSION
// =============================================================================

pub struct Session {
    controller: CanvasController,
    settings: Settings,
    generator: Arc<dyn ImageGenerator>,
    sink: Arc<dyn BoardSink>,
    events: mpsc::UnboundedSender<Event>,
    completions: mpsc::UnboundedSender<Completion>,
    /// Generation requests issued but not yet completed.
    pending: HashSet<Uuid>,
    rng: StdRng,
}

impl Session {
    #[must_use]
    pub fn new(
        config: &AppConfig,
        generator: Arc<dyn ImageGenerator>,
        sink: Arc<dyn BoardSink>,
        events: mpsc::UnboundedSender<Event>,
        completions: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        Self {
            controller: CanvasController::new(BoardStore::new(&config.default_board)),
            settings: config.settings.clone(),
            generator,
            sink,
            events,
            completions,
            pending: HashSet::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the random source used for generated item placement.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn controller(&self) -> &CanvasController {
        &self.controller
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of generation requests still in flight.
    #[must_use]
    pub fn pending_generations(&self) -> usize {
        self.pending.len()
    }

    /// Decode and apply one input line. Blank lines are ignored.
    pub fn handle_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        match command::parse(line) {
            Ok(cmd) => self.dispatch(cmd),
            Err(e) => {
                warn!(error = %e, "session: bad command");
                self.notice(e.error_code(), e.to_string());
            }
        }
    }

    pub fn dispatch(&mut self, cmd: Command) {
        debug!(?cmd, "session: dispatch");
        match cmd {
            Command::CreateBoard { name } => match self.controller.create_board(&name) {
                Some(actions) => self.emit_actions(actions),
                None => self.notice("E_EMPTY_BOARD_NAME", "Board name cannot be empty".into()),
            },
            Command::SelectBoard { id } => {
                let actions = self.controller.select_board(id);
                self.emit_actions(actions);
            }
            Command::RenameBoard { id, name } => {
                let action = self.controller.rename_board(id, &name);
                self.emit_actions(action);
            }
            Command::ListBoards => self.emit_boards(),

            Command::AddImage { content, x, y } => {
                if content.trim().is_empty() {
                    self.notice("E_EMPTY_IMAGE", "Image content cannot be empty".into());
                    return;
                }
                let position = x.zip(y).map(|(x, y)| Position::new(x, y));
                let action = self.controller.add_item(factory::create_image(&content, position));
                self.emit_actions(action);
            }
            Command::AddText { text } => {
                let action = self.controller.add_item(factory::create_text(text.as_deref()));
                self.emit_actions(action);
            }
            Command::AddVideo { url } => {
                if url.trim().is_empty() {
                    self.notice("E_EMPTY_VIDEO_URL", "Video URL cannot be empty".into());
                    return;
                }
                let action = self.controller.add_item(factory::create_video(&url));
                self.emit_actions(action);
            }
            Command::Generate { prompt } => {
                self.generate(&prompt);
            }

            Command::EditText { id, content } => {
                let action = self.controller.edit_text(&id, &content);
                self.emit_actions(action);
            }
            Command::UpdateItem { id, fields } => {
                let action = self.controller.update_item(&id, fields);
                self.emit_actions(action);
            }
            Command::DeleteItem { id } => {
                let actions = self.controller.delete_item(&id);
                self.emit_actions(actions);
            }
            Command::Focus { id } => {
                let actions = self.controller.focus(&id);
                self.emit_actions(actions);
            }
            Command::Blur => {
                let actions = self.controller.blur();
                self.emit_actions(actions);
            }

            Command::PointerDown { x, y, button } => {
                let actions = self.controller.on_pointer_down(Point::new(x, y), button.into());
                self.emit_actions(actions);
            }
            Command::PointerMove { x, y } => {
                let actions = self.controller.on_pointer_move(Point::new(x, y));
                self.emit_actions(actions);
            }
            Command::PointerUp { x, y, button } => {
                let actions = self.controller.on_pointer_up(Point::new(x, y), button.into());
                self.emit_actions(actions);
            }
            Command::KeyDown { key } => {
                let actions = self.controller.on_key_down(&Key(key));
                self.emit_actions(actions);
            }
            Command::Scroll { x, y } => {
                self.controller.viewport.scroll_x = x;
                self.controller.viewport.scroll_y = y;
            }

            Command::SetFont { font } => self.set_font(&font),
            Command::SetFontSize { size } => self.set_font_size(size),
            Command::SetCanvasSize { width, height } => self.set_canvas_size(width, height),

            Command::Save => self.save(),
            Command::Render => self.emit_scene(),
        }
    }

    // --- Generation ---

    /// Start a generation request. Returns its id, or `None` if the prompt
    /// was rejected before any request was issued.
    pub fn generate(&mut self, raw_prompt: &str) -> Option<Uuid> {
        let prompt = match Prompt::new(raw_prompt) {
            Ok(prompt) => prompt,
            Err(e) => {
                debug!("session: generation refused, empty prompt");
                self.notice(e.error_code(), "Please enter a prompt".into());
                return None;
            }
        };
        let request_id = Uuid::new_v4();
        self.pending.insert(request_id);
        let _task = spawn_generation(Arc::clone(&self.generator), request_id, prompt, self.completions.clone());
        info!(%request_id, pending = self.pending.len(), "session: generation requested");
        Some(request_id)
    }

    /// Apply a finished generation to the active board.
    pub fn complete_generation(&mut self, completion: Completion) {
        let Completion { request_id, result } = completion;
        if !self.pending.remove(&request_id) {
            debug!(%request_id, "session: completion for unknown request");
            return;
        }
        match result {
            Ok(image_ref) => {
                let mut item = factory::create_from_ai_result(&image_ref);
                item.position = self.random_drop_position();
                let item_id = item.id;
                let action = self.controller.add_item(item);
                info!(%request_id, %item_id, board_id = %self.controller.store.active_id(), "session: generated image added");
                self.emit_actions(action);
            }
            Err(e) => {
                warn!(%request_id, error = %e, code = e.error_code(), retryable = e.retryable(), "session: generation failed");
                self.notice(e.error_code(), format!("Failed to generate image: {e}"));
            }
        }
    }

    fn random_drop_position(&mut self) -> Position {
        Position::new(
            self.rng.random_range(AI_DROP_X.0..AI_DROP_X.1),
            self.rng.random_range(AI_DROP_Y.0..AI_DROP_Y.1),
        )
    }

    // --- Settings ---

    fn set_font(&mut self, font: &str) {
        let font = font.trim();
        if font.is_empty() {
            self.notice("E_EMPTY_FONT", "Font cannot be empty".into());
            return;
        }
        self.settings.font = font.to_string();
        let open = format!("<span style=\"font-family: {font};\">");
        let restyled = self.controller.store.restyle_text(|html| format!("{open}{html}</span>"));
        info!(font, restyled, "session: font changed");
        self.emit_settings_and_scene();
    }

    fn set_font_size(&mut self, size: u32) {
        if size == 0 {
            self.notice("E_BAD_FONT_SIZE", "Font size must be positive".into());
            return;
        }
        self.settings.font_size = size;
        let open = format!("<span style=\"font-size: {size}px;\">");
        let restyled = self.controller.store.restyle_text(|html| format!("{open}{html}</span>"));
        info!(size, restyled, "session: font size changed");
        self.emit_settings_and_scene();
    }

    fn set_canvas_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            self.notice("E_BAD_CANVAS_SIZE", "Canvas size must be positive".into());
            return;
        }
        self.settings.canvas_width = width;
        self.settings.canvas_height = height;
        self.emit(Event::Session(SessionEvent::SettingsChanged { settings: self.settings.clone() }));
    }

    // --- Save ---

    fn save(&self) {
        let board = self.controller.store.active_board();
        match self.sink.save(board) {
            Ok(()) => {
                let board_id = board.id;
                self.emit(Event::Session(SessionEvent::Saved { board_id }));
            }
            Err(e) => {
                warn!(board_id = %board.id, error = %e, "session: save failed");
                self.notice(e.error_code(), format!("Failed to save board: {e}"));
            }
        }
    }

    // --- Output ---

    fn emit(&self, event: Event) {
        if self.events.send(event).is_err() {
            debug!("session: event receiver closed");
        }
    }

    fn emit_actions(&self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.emit(Event::Canvas(action));
        }
    }

    fn notice(&self, code: &str, message: String) {
        self.emit(Event::Session(SessionEvent::Notice { code: code.to_string(), message }));
    }

    fn emit_boards(&self) {
        let store = &self.controller.store;
        let boards = store
            .boards()
            .iter()
            .map(|b| BoardSummary { id: b.id, name: b.name.clone(), item_count: b.items.len() })
            .collect();
        self.emit(Event::Session(SessionEvent::Boards { boards, active: store.active_id() }));
    }

    fn emit_scene(&self) {
        let board = self.controller.store.active_board();
        let nodes = render_board(board, self.controller.focused());
        self.emit(Event::Session(SessionEvent::Scene { board_id: board.id, nodes, settings: self.settings.clone() }));
    }

    fn emit_settings_and_scene(&self) {
        self.emit(Event::Session(SessionEvent::SettingsChanged { settings: self.settings.clone() }));
        self.emit_scene();
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
