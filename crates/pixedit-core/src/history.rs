//! Linear undo history.
//!
//! The stack holds every image state reachable by undo; the last element is
//! the current image. The log is an append-only audit trail of actions,
//! undos included, so after an undo the log is longer than the stack.

use tracing::{debug, info};

use crate::types::{EditError, Image};

/// Log entry recorded for a successful undo.
pub const UNDO_ENTRY: &str = "undo";

/// Result of an undo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The top state was removed; the previous one is current again.
    Reverted,
    /// Only the originally loaded image remains, nothing was removed.
    NothingToUndo,
}

/// Image states plus the log of actions that produced them.
#[derive(Debug, Clone, Default)]
pub struct History {
    stack: Vec<Image>,
    log: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything and start over from `image` with an empty log.
    pub fn reset(&mut self, image: Image) {
        self.stack.clear();
        self.log.clear();
        self.stack.push(image);
    }

    /// Record a new current state.
    pub fn push(&mut self, image: Image, description: impl Into<String>) {
        let description = description.into();
        debug!(depth = self.stack.len() + 1, %description, "History push");
        self.stack.push(image);
        self.log.push(description);
    }

    /// Step back one state. The loaded image itself is never removed.
    pub fn undo(&mut self) -> Result<UndoOutcome, EditError> {
        match self.stack.len() {
            0 => Err(EditError::EmptyHistory),
            1 => {
                info!("Nothing to undo");
                Ok(UndoOutcome::NothingToUndo)
            }
            _ => {
                self.stack.pop();
                self.log.push(UNDO_ENTRY.to_string());
                debug!(depth = self.stack.len(), "History undo");
                Ok(UndoOutcome::Reverted)
            }
        }
    }

    /// The current image.
    pub fn current(&self) -> Result<&Image, EditError> {
        self.stack.last().ok_or(EditError::EmptyHistory)
    }

    /// All recorded actions, oldest first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Number of states on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
