//! Image encoding for output.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::{info, instrument};

use crate::types::{EditError, Image};

/// JPEG quality used when nothing else is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
///
/// # Errors
///
/// Returns `EditError::Encode` if the dimensions are zero, the pixel buffer
/// does not match them, or the encoder fails.
pub fn encode_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, EditError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EditError::Encode(format!(
            "invalid dimensions {}x{}",
            width, height
        )));
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if image.pixels.len() != expected_len {
        return Err(EditError::Encode(format!(
            "expected {} bytes of pixel data, got {}",
            expected_len,
            image.pixels.len()
        )));
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&image.pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EditError::Encode(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Write `image` to `path`.
///
/// The format follows the file extension. JPEG output uses `jpeg_quality`.
///
/// # Errors
///
/// Returns `EditError::Encode` for unknown extensions or encoder failures,
/// and `EditError::Io` if the file cannot be written.
#[instrument(skip_all, fields(path = %path.as_ref().display(), width = image.width, height = image.height))]
pub fn save_image(image: &Image, path: impl AsRef<Path>, jpeg_quality: u8) -> Result<(), EditError> {
    let path = path.as_ref();
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false);

    if is_jpeg {
        let bytes = encode_jpeg(image, jpeg_quality)?;
        std::fs::write(path, bytes).map_err(|e| EditError::Io(e.to_string()))?;
    } else {
        let rgb = image
            .to_rgb_image()
            .ok_or_else(|| EditError::Encode("pixel buffer size mismatch".to_string()))?;
        rgb.save(path).map_err(|e| match e {
            image::ImageError::IoError(io) => EditError::Io(io.to_string()),
            other => EditError::Encode(other.to_string()),
        })?;
    }

    info!("Image saved");
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Encoding always produces a JPEG stream for valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=50, 1u32..=50),
            quality in 1u8..=100,
        ) {
            let img = Image::filled(width, height, [128, 64, 32]);
            let jpeg_bytes = encode_jpeg(&img, quality).unwrap();

            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
            let len = jpeg_bytes.len();
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
        }
    }
}
