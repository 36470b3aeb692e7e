//! Before/after previews.
//!
//! A preview puts the previous image and the edited one next to each other on
//! a white canvas. Where it ends up depends on the [`Preview`] implementation.

use std::path::PathBuf;

use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use tracing::{debug, instrument};

use crate::codec::save_image;
use crate::types::{EditError, Image};

/// Horizontal space between the two halves of a preview.
pub const PREVIEW_GAP: u32 = 8;

/// File name used by [`FilePreview`].
pub const PREVIEW_FILE_NAME: &str = "preview.png";

/// One half of a preview: `image` shrunk so neither edge exceeds `max_edge`.
/// Smaller images are used as they are.
fn preview_half(image: &Image, max_edge: u32) -> Result<RgbImage, EditError> {
    let rgb = image
        .to_rgb_image()
        .ok_or_else(|| EditError::InvalidParameter("pixel buffer size mismatch".to_string()))?;
    if rgb.width() <= max_edge && rgb.height() <= max_edge {
        return Ok(rgb);
    }
    Ok(DynamicImage::ImageRgb8(rgb)
        .resize(max_edge, max_edge, FilterType::Triangle)
        .into_rgb8())
}

/// Place `before` and `after` side by side, each scaled to fit `max_edge`.
pub fn side_by_side(before: &Image, after: &Image, max_edge: u32) -> Result<Image, EditError> {
    let max_edge = max_edge.max(1);
    let left = preview_half(before, max_edge)?;
    let right = preview_half(after, max_edge)?;

    let width = left.width() + PREVIEW_GAP + right.width();
    let height = left.height().max(right.height());
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    image::imageops::replace(&mut canvas, &left, 0, 0);
    image::imageops::replace(&mut canvas, &right, (left.width() + PREVIEW_GAP) as i64, 0);

    Ok(Image::from_rgb_image(canvas))
}

/// Somewhere to show a before/after pair.
pub trait Preview {
    /// Show the pair. Returns the file written, if the preview went to disk.
    fn show(&mut self, before: &Image, after: &Image, title: &str) -> Result<Option<PathBuf>, EditError>;
}

/// Writes each preview to `<dir>/preview.png`, replacing the previous one.
#[derive(Debug, Clone)]
pub struct FilePreview {
    dir: PathBuf,
    max_edge: u32,
}

impl FilePreview {
    pub fn new(dir: impl Into<PathBuf>, max_edge: u32) -> Self {
        Self {
            dir: dir.into(),
            max_edge: max_edge.max(1),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(PREVIEW_FILE_NAME)
    }
}

impl Preview for FilePreview {
    #[instrument(skip(self, before, after))]
    fn show(&mut self, before: &Image, after: &Image, title: &str) -> Result<Option<PathBuf>, EditError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| EditError::Io(e.to_string()))?;
        let composite = side_by_side(before, after, self.max_edge)?;
        let path = self.path();
        save_image(&composite, &path, 100)?;
        debug!(path = %path.display(), "Preview written");
        Ok(Some(path))
    }
}

/// Discards previews.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreview;

impl Preview for NoPreview {
    fn show(&mut self, _before: &Image, _after: &Image, _title: &str) -> Result<Option<PathBuf>, EditError> {
        Ok(None)
    }
}
