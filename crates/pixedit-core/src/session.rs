//! One editing run: the loaded image, its history and the output settings.

use std::path::Path;

use tracing::{info, instrument};

use crate::codec::{load_image, save_image, DEFAULT_JPEG_QUALITY};
use crate::history::{History, UndoOutcome};
use crate::operation::Operation;
use crate::types::{EditError, Image};

/// Mutable state of a single editing session.
///
/// Every operation goes through the session, so several sessions can live
/// side by side without sharing anything.
#[derive(Debug, Clone)]
pub struct Session {
    history: History,
    jpeg_quality: u8,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            history: History::new(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Quality used when saving to a `.jpg`/`.jpeg` path.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Decode `path` and start a fresh history from it.
    ///
    /// On failure the previous state is left untouched.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&Image, EditError> {
        let image = load_image(path.as_ref())?;
        info!(width = image.width, height = image.height, "Image loaded");
        self.start(image);
        self.history.current()
    }

    /// Start a fresh history from an image already in memory.
    pub fn start(&mut self, image: Image) {
        self.history.reset(image);
    }

    pub fn current(&self) -> Result<&Image, EditError> {
        self.history.current()
    }

    /// Apply `op` to the current image and make the result current.
    ///
    /// Nothing is recorded if the transform fails.
    #[instrument(skip_all, fields(op = op.name()))]
    pub fn apply(&mut self, op: &Operation) -> Result<&Image, EditError> {
        let edited = op.apply(self.history.current()?)?;
        let description = op.to_string();
        info!(%description, width = edited.width, height = edited.height, "Operation applied");
        self.history.push(edited, description);
        self.history.current()
    }

    pub fn undo(&mut self) -> Result<UndoOutcome, EditError> {
        self.history.undo()
    }

    /// Descriptions of every action taken since the last load.
    pub fn log(&self) -> &[String] {
        self.history.log()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Encode the current image to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditError> {
        save_image(self.history.current()?, path, self.jpeg_quality)
    }
}
