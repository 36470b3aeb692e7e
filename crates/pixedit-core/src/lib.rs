//! pixedit core - image editing library
//!
//! This crate provides the editing functionality behind the `pixedit` tools:
//! decoding and encoding, per-pixel transforms, padding, blending, a linear
//! undo history and the session that ties them together.

pub mod adjustments;
pub mod blend;
pub mod border;
pub mod codec;
pub mod config;
pub mod history;
pub mod logo;
pub mod operation;
pub mod preview;
pub mod session;
pub mod types;

pub use adjustments::ThresholdMethod;
pub use border::{BorderMode, Padding};
pub use config::EditorConfig;
pub use history::{History, UndoOutcome};
pub use operation::Operation;
pub use preview::{FilePreview, NoPreview, Preview};
pub use session::Session;
pub use types::{EditError, Image};
