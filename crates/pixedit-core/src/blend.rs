//! Linear blending of two images.
//!
//! `result = (1 - alpha) * base + alpha * other`, rounded to the nearest
//! 8-bit value. The second image is resized to the base dimensions first.

use std::path::Path;

use image::imageops::FilterType;
use image::Rgb;
use tracing::debug;

use crate::codec::load_image;
use crate::types::{EditError, Image};

/// Check that `alpha` is a usable blend weight.
pub fn validate_alpha(alpha: f32) -> Result<f32, EditError> {
    if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(EditError::InvalidParameter(format!(
            "alpha must be between 0 and 1, got {}",
            alpha
        )))
    }
}

#[inline]
fn mix(base: u8, other: u8, alpha: f32) -> u8 {
    ((1.0 - alpha) * base as f32 + alpha * other as f32)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Blend `other` over `base` with weight `alpha` for `other`.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `alpha` is outside 0-1 or either
/// image is empty.
pub fn blend_images(base: &Image, other: &Image, alpha: f32) -> Result<Image, EditError> {
    let alpha = validate_alpha(alpha)?;
    if base.is_empty() || other.is_empty() {
        return Err(EditError::InvalidParameter(
            "cannot blend an empty image".to_string(),
        ));
    }

    let invalid = || EditError::InvalidParameter("pixel buffer size mismatch".to_string());
    let base_rgb = base.to_rgb_image().ok_or_else(invalid)?;
    let mut other_rgb = other.to_rgb_image().ok_or_else(invalid)?;
    if other_rgb.dimensions() != base_rgb.dimensions() {
        other_rgb = image::imageops::resize(&other_rgb, base.width, base.height, FilterType::Triangle);
    }

    let blended = imageproc::map::map_colors2(&base_rgb, &other_rgb, |p: Rgb<u8>, q: Rgb<u8>| {
        Rgb([
            mix(p[0], q[0], alpha),
            mix(p[1], q[1], alpha),
            mix(p[2], q[2], alpha),
        ])
    });

    Ok(Image::from_rgb_image(blended))
}

/// Load the image at `path` and blend it over `base`.
///
/// # Errors
///
/// Returns `EditError::ImageNotFound` if the second image cannot be decoded.
pub fn blend_with_file(base: &Image, path: impl AsRef<Path>, alpha: f32) -> Result<Image, EditError> {
    let alpha = validate_alpha(alpha)?;
    let other = load_image(path.as_ref())?;
    debug!(
        other_width = other.width,
        other_height = other.height,
        alpha,
        "Blending with second image"
    );
    blend_images(base, &other, alpha)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = Image> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let size = (w as usize) * (h as usize) * 3;
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |pixels| Image::new(w, h, pixels))
        })
    }

    proptest! {
        /// Property: Blending an image with itself leaves it unchanged.
        #[test]
        fn prop_self_blend_is_identity(img in image_strategy(), alpha in 0.0f32..=1.0) {
            prop_assert_eq!(blend_images(&img, &img, alpha).unwrap(), img);
        }

        /// Property: Output dimensions always match the base image.
        #[test]
        fn prop_output_matches_base_dimensions(
            base in image_strategy(),
            other in image_strategy(),
            alpha in 0.0f32..=1.0,
        ) {
            let result = blend_images(&base, &other, alpha).unwrap();
            prop_assert_eq!((result.width, result.height), (base.width, base.height));
        }
    }
}
