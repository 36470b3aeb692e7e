//! Editor configuration.
//!
//! Settings come from the environment so the editor itself keeps a purely
//! interactive command line:
//!
//! | Variable                   | Default          |
//! |----------------------------|------------------|
//! | `PIXEDIT_PREVIEW`          | `1` (`0`/`off` disables previews) |
//! | `PIXEDIT_PREVIEW_DIR`      | `<tmp>/pixedit`  |
//! | `PIXEDIT_PREVIEW_MAX_EDGE` | `512`            |
//! | `PIXEDIT_JPEG_QUALITY`     | `90`             |

use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::codec::DEFAULT_JPEG_QUALITY;
use crate::preview::{FilePreview, NoPreview, Preview};

pub const ENV_PREVIEW: &str = "PIXEDIT_PREVIEW";
pub const ENV_PREVIEW_DIR: &str = "PIXEDIT_PREVIEW_DIR";
pub const ENV_PREVIEW_MAX_EDGE: &str = "PIXEDIT_PREVIEW_MAX_EDGE";
pub const ENV_JPEG_QUALITY: &str = "PIXEDIT_JPEG_QUALITY";

/// Settings for an interactive editing run.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Write a before/after preview after every edit.
    pub preview_enabled: bool,
    /// Directory that receives preview images.
    pub preview_dir: PathBuf,
    /// Longest edge of each half of a preview, in pixels.
    pub preview_max_edge: u32,
    /// Quality for JPEG output (1-100).
    pub jpeg_quality: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            preview_enabled: true,
            preview_dir: std::env::temp_dir().join("pixedit"),
            preview_max_edge: 512,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EditorConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Unset or invalid values keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_PREVIEW) {
            match value.trim().to_ascii_lowercase().as_str() {
                "0" | "off" | "false" | "no" => config.preview_enabled = false,
                "1" | "on" | "true" | "yes" => config.preview_enabled = true,
                other => warn!(key = ENV_PREVIEW, value = other, "Ignoring invalid setting"),
            }
        }
        if let Some(dir) = lookup(ENV_PREVIEW_DIR).filter(|d| !d.trim().is_empty()) {
            config.preview_dir = PathBuf::from(dir);
        }
        if let Some(edge) = parse_setting::<u32>(&lookup, ENV_PREVIEW_MAX_EDGE) {
            if edge > 0 {
                config.preview_max_edge = edge;
            } else {
                warn!(key = ENV_PREVIEW_MAX_EDGE, "Ignoring zero preview size");
            }
        }
        if let Some(quality) = parse_setting::<u8>(&lookup, ENV_JPEG_QUALITY) {
            config.jpeg_quality = quality.clamp(1, 100);
        }

        config
    }

    /// Build the preview sink these settings describe.
    pub fn preview(&self) -> Box<dyn Preview> {
        if self.preview_enabled {
            Box::new(FilePreview::new(&self.preview_dir, self.preview_max_edge))
        } else {
            Box::new(NoPreview)
        }
    }
}

fn parse_setting<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring invalid setting");
            None
        }
    }
}
