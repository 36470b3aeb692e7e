//! Core types shared by the editing pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Error types for loading, editing and saving images.
#[derive(Debug, Error)]
pub enum EditError {
    /// The file is missing or could not be decoded as an image.
    #[error("Image not found: {} ({reason})", path.display())]
    ImageNotFound { path: PathBuf, reason: String },

    /// History was queried before any image was loaded.
    #[error("No image loaded")]
    EmptyHistory,

    /// A menu selection that does not name an option.
    #[error("Invalid menu choice: {0}")]
    InvalidMenuChoice(String),

    /// A number was expected but the input could not be parsed.
    #[error("Not a valid number: {input:?}")]
    MalformedNumber { input: String },

    /// A parameter parsed correctly but is outside its accepted range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Encoding the image for output failed.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// I/O error while writing a file.
    #[error("I/O error: {0}")]
    Io(String),
}

/// An RGB image held in memory.
///
/// Transforms never modify an `Image` in place; each one returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl Image {
    /// Create a new Image with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an image where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&rgb);
        }
        Self::new(width, height, pixels)
    }

    /// Create an Image from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// RGB value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
