//! Border extension (padding) around an image.
//!
//! Three edge policies are supported:
//! - `constant`: new pixels are white
//! - `reflect`: the border mirrors the image, edge pixel included (`fedcba|abcdef`)
//! - `replicate`: the outermost row/column is repeated (`aaaaaa|abcdef`)

use std::fmt;
use std::str::FromStr;

use image::{Rgb, RgbImage};
use tracing::warn;

use crate::types::{EditError, Image};

/// Fill color for [`BorderMode::Constant`].
pub const BORDER_FILL: [u8; 3] = [255, 255, 255];

/// Largest padded image, in pixels, that [`add_padding`] will allocate.
pub const MAX_PADDED_PIXELS: u64 = 1 << 28;

/// How pixels outside the source image are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Solid white.
    #[default]
    Constant,
    /// Mirror image of the edge, edge pixel included.
    Reflect,
    /// Repeat the edge pixel.
    Replicate,
}

impl BorderMode {
    /// Parse a mode name, falling back to [`BorderMode::Constant`] for
    /// anything unrecognized.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(mode = name, "Unknown border mode, using constant fill");
            BorderMode::default()
        })
    }

    /// Map a coordinate that may lie outside `0..len` back into the source.
    ///
    /// Returns `None` when the pixel should take the constant fill.
    fn source_index(self, i: i64, len: u32) -> Option<u32> {
        let n = len as i64;
        if (0..n).contains(&i) {
            return Some(i as u32);
        }
        match self {
            BorderMode::Constant => None,
            BorderMode::Replicate => Some(i.clamp(0, n - 1) as u32),
            BorderMode::Reflect => {
                let m = i.rem_euclid(2 * n);
                let idx = if m < n { m } else { 2 * n - 1 - m };
                Some(idx as u32)
            }
        }
    }
}

impl FromStr for BorderMode {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constant" => Ok(BorderMode::Constant),
            "reflect" => Ok(BorderMode::Reflect),
            "replicate" => Ok(BorderMode::Replicate),
            other => Err(EditError::InvalidParameter(format!(
                "unknown border mode {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for BorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorderMode::Constant => f.write_str("constant"),
            BorderMode::Reflect => f.write_str("reflect"),
            BorderMode::Replicate => f.write_str("replicate"),
        }
    }
}

/// Border widths in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Padding {
    pub fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Padded size, or `None` if it exceeds [`MAX_PADDED_PIXELS`].
    fn padded_dimensions(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        let w = width.checked_add(self.left)?.checked_add(self.right)?;
        let h = height.checked_add(self.top)?.checked_add(self.bottom)?;
        if (w as u64) * (h as u64) > MAX_PADDED_PIXELS {
            return None;
        }
        Some((w, h))
    }
}

/// Extend `image` by `padding` using `mode` for the new pixels.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` for an empty source image or when
/// the padded image would exceed [`MAX_PADDED_PIXELS`].
pub fn add_padding(image: &Image, padding: Padding, mode: BorderMode) -> Result<Image, EditError> {
    if image.is_empty() {
        return Err(EditError::InvalidParameter(
            "cannot pad an empty image".to_string(),
        ));
    }
    let (out_w, out_h) = padding
        .padded_dimensions(image.width, image.height)
        .ok_or_else(|| {
            EditError::InvalidParameter(format!(
                "padded image would exceed {} pixels",
                MAX_PADDED_PIXELS
            ))
        })?;

    let src = image
        .to_rgb_image()
        .ok_or_else(|| EditError::InvalidParameter("pixel buffer size mismatch".to_string()))?;

    let padded = RgbImage::from_fn(out_w, out_h, |x, y| {
        let sx = mode.source_index(x as i64 - padding.left as i64, src.width());
        let sy = mode.source_index(y as i64 - padding.top as i64, src.height());
        match (sx, sy) {
            (Some(sx), Some(sy)) => *src.get_pixel(sx, sy),
            _ => Rgb(BORDER_FILL),
        }
    });

    Ok(Image::from_rgb_image(padded))
}
