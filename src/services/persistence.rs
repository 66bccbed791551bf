//! Persistence service: the "save board" hook.
//!
//! DESIGN
//! ======
//! The session hands the active board to a `BoardSink` and does not care what
//! the sink does with it. Without a save directory the sink only logs the
//! board. With one, each board is written as pretty JSON to
//! `<dir>/board-<id>.json`, overwriting the previous save of the same board.
//! The file holds exactly the serialized `Board`/`Item` shape.
//!
//! Saves are synchronous: a board is small, and the event loop's only
//! suspension point is AI generation.

use std::path::PathBuf;
use std::sync::Arc;

use canvas::doc::Board;
use tracing::{debug, info};

use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("board write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("board encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl PersistError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_SAVE_IO",
            Self::Encode(_) => "E_SAVE_ENCODE",
        }
    }
}

/// Receiver of saved boards.
pub trait BoardSink: Send + Sync {
    /// Persist (or otherwise consume) a snapshot of `board`.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] if the board could not be stored.
    fn save(&self, board: &Board) -> Result<(), PersistError>;
}

/// Sink that only logs what would have been saved.
pub struct LogSink;

impl BoardSink for LogSink {
    fn save(&self, board: &Board) -> Result<(), PersistError> {
        info!(board_id = %board.id, name = %board.name, items = board.items.len(), "saving board");
        debug!(board = %serde_json::to_string(board)?, "board snapshot");
        Ok(())
    }
}

/// Sink that writes one JSON file per board.
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path a board is saved to.
    #[must_use]
    pub fn path_for(&self, board: &Board) -> PathBuf {
        self.dir.join(format!("board-{}.json", board.id))
    }
}

impl BoardSink for JsonFileSink {
    fn save(&self, board: &Board) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(board);
        let json = serde_json::to_vec_pretty(board)?;
        std::fs::write(&path, json)?;
        info!(board_id = %board.id, path = %path.display(), items = board.items.len(), "board saved");
        Ok(())
    }
}

/// Pick the sink for a configuration.
#[must_use]
pub fn sink_from_config(config: &AppConfig) -> Arc<dyn BoardSink> {
    match &config.save_dir {
        Some(dir) => Arc::new(JsonFileSink::new(dir.clone())),
        None => Arc::new(LogSink),
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
