//! Image decoding from files and memory.

use std::path::Path;

use image::ImageReader;
use tracing::{debug, instrument};

use crate::types::{EditError, Image};

/// Decode the image at `path` into RGB pixels.
///
/// # Errors
///
/// Returns `EditError::ImageNotFound` if the file does not exist, cannot be
/// read, or is not in a supported format.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_image(path: impl AsRef<Path>) -> Result<Image, EditError> {
    let path = path.as_ref();
    let not_found = |reason: String| EditError::ImageNotFound {
        path: path.to_path_buf(),
        reason,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| not_found(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| not_found(e.to_string()))?;

    let img = reader.decode().map_err(|e| not_found(e.to_string()))?;

    let image = Image::from_rgb_image(img.into_rgb8());
    debug!(width = image.width, height = image.height, "Image decoded");
    Ok(image)
}
