//! Tonal adjustments applied to every pixel of an image.
//!
//! - Brightness: signed offset per channel
//! - Contrast: positive scale factor per channel
//! - Grayscale: BT.601 luma, expanded back to three channels
//! - Threshold: fixed cutoff on luma, binary or inverted
//!
//! Every function returns a new image; results are clamped to 0-255.

use std::fmt;
use std::str::FromStr;

use image::{DynamicImage, GrayImage, Luma, Rgb};
use imageproc::contrast::ThresholdType;

use crate::types::{EditError, Image};

/// Largest brightness offset with any effect. Larger offsets are clamped to it.
pub const MAX_BRIGHTNESS_OFFSET: i32 = 255;

/// Luma cutoff used by [`threshold`]. Values strictly above it count as bright.
pub const THRESHOLD_CUTOFF: u8 = 127;

/// How [`threshold`] maps bright and dark pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMethod {
    /// Bright pixels become white, the rest black.
    Binary,
    /// Bright pixels become black, the rest white.
    Inverse,
}

impl ThresholdMethod {
    fn to_threshold_type(self) -> ThresholdType {
        match self {
            ThresholdMethod::Binary => ThresholdType::Binary,
            ThresholdMethod::Inverse => ThresholdType::BinaryInverted,
        }
    }
}

impl FromStr for ThresholdMethod {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(ThresholdMethod::Binary),
            "inverse" | "inv" | "binary_inv" => Ok(ThresholdMethod::Inverse),
            other => Err(EditError::InvalidParameter(format!(
                "unknown threshold method {:?} (expected binary or inverse)",
                other
            ))),
        }
    }
}

impl fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdMethod::Binary => f.write_str("binary"),
            ThresholdMethod::Inverse => f.write_str("inverse"),
        }
    }
}

fn to_rgb(image: &Image) -> Result<image::RgbImage, EditError> {
    image
        .to_rgb_image()
        .ok_or_else(|| EditError::InvalidParameter("pixel buffer size mismatch".to_string()))
}

/// BT.601 luma: `0.299 R + 0.587 G + 0.114 B`, rounded.
fn luma(image: &Image) -> Result<GrayImage, EditError> {
    Ok(imageproc::map::map_colors(&to_rgb(image)?, |px: Rgb<u8>| {
        let [r, g, b] = px.0.map(f32::from);
        Luma([(0.299 * r + 0.587 * g + 0.114 * b).round().clamp(0.0, 255.0) as u8])
    }))
}

fn expand_gray(gray: GrayImage) -> Image {
    Image::from_rgb_image(DynamicImage::ImageLuma8(gray).into_rgb8())
}

/// Add `offset` to every channel of every pixel.
///
/// Any offset is accepted; beyond ±[`MAX_BRIGHTNESS_OFFSET`] every channel
/// saturates anyway.
pub fn adjust_brightness(image: &Image, offset: i32) -> Result<Image, EditError> {
    let offset = offset.clamp(-MAX_BRIGHTNESS_OFFSET, MAX_BRIGHTNESS_OFFSET);
    if offset == 0 {
        return Ok(image.clone());
    }

    let brightened = image::imageops::brighten(&to_rgb(image)?, offset);
    Ok(Image::from_rgb_image(brightened))
}

/// Multiply every channel of every pixel by `factor`, rounding the result.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` unless `factor` is finite and positive.
pub fn adjust_contrast(image: &Image, factor: f32) -> Result<Image, EditError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(EditError::InvalidParameter(format!(
            "contrast factor must be positive, got {}",
            factor
        )));
    }

    let scaled = imageproc::map::map_colors(&to_rgb(image)?, |px: Rgb<u8>| {
        Rgb(px.0.map(|c| (c as f32 * factor).round().clamp(0.0, 255.0) as u8))
    });
    Ok(Image::from_rgb_image(scaled))
}

/// Convert to luma and expand back to RGB.
///
/// The result still has three channels so later steps can treat it like any
/// other image.
pub fn convert_grayscale(image: &Image) -> Result<Image, EditError> {
    Ok(expand_gray(luma(image)?))
}

/// Threshold the luma of `image` at [`THRESHOLD_CUTOFF`].
pub fn threshold(image: &Image, method: ThresholdMethod) -> Result<Image, EditError> {
    let gray = luma(image)?;
    let binary = imageproc::contrast::threshold(&gray, THRESHOLD_CUTOFF, method.to_threshold_type());
    Ok(expand_gray(binary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_pixels(img: &Image, rgb: [u8; 3]) -> bool {
        img.pixels.chunks_exact(3).all(|px| px == rgb)
    }

    #[test]
    fn test_brightness_darkens_white() {
        let img = Image::filled(100, 100, [255, 255, 255]);
        let result = adjust_brightness(&img, -50).unwrap();
        assert!(all_pixels(&result, [205, 205, 205]));
    }

    #[test]
    fn test_brightness_clamps_both_ends() {
        let img = Image::new(2, 1, vec![10, 20, 250, 240, 5, 128]);

        let brighter = adjust_brightness(&img, 100).unwrap();
        assert_eq!(brighter.pixels, vec![110, 120, 255, 255, 105, 228]);

        let darker = adjust_brightness(&img, -100).unwrap();
        assert_eq!(darker.pixels, vec![0, 0, 150, 140, 0, 28]);
    }

    #[test]
    fn test_brightness_large_offsets_saturate() {
        let img = Image::new(2, 1, vec![0, 90, 255, 1, 128, 200]);

        let up = adjust_brightness(&img, 300).unwrap();
        assert!(all_pixels(&up, [255, 255, 255]));
        assert_eq!(adjust_brightness(&img, i32::MAX).unwrap(), up);

        let down = adjust_brightness(&img, i32::MIN).unwrap();
        assert!(all_pixels(&down, [0, 0, 0]));
    }

    #[test]
    fn test_brightness_does_not_touch_input() {
        let img = Image::filled(4, 4, [100, 100, 100]);
        let before = img.clone();
        let _ = adjust_brightness(&img, 40).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_contrast_clamps() {
        let img = Image::filled(10, 10, [205, 205, 205]);
        let result = adjust_contrast(&img, 2.0).unwrap();
        assert!(all_pixels(&result, [255, 255, 255]));
    }

    #[test]
    fn test_contrast_scales_and_rounds() {
        let img = Image::new(1, 1, vec![10, 101, 0]);
        let result = adjust_contrast(&img, 1.5).unwrap();
        assert_eq!(result.pixels, vec![15, 152, 0]);
    }

    #[test]
    fn test_contrast_rejects_non_positive() {
        let img = Image::filled(2, 2, [50, 50, 50]);
        assert!(adjust_contrast(&img, 0.0).is_err());
        assert!(adjust_contrast(&img, -1.0).is_err());
        assert!(adjust_contrast(&img, f32::NAN).is_err());
    }

    #[test]
    fn test_grayscale_makes_channels_equal() {
        let img = Image::new(2, 1, vec![255, 0, 0, 0, 255, 0]);
        let result = convert_grayscale(&img).unwrap();

        assert_eq!(result.width, 2);
        assert_eq!(result.pixels.len(), 6);
        for px in result.pixels.chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
        // Green carries more luma than red
        assert!(result.pixels[3] > result.pixels[0]);
    }

    #[test]
    fn test_grayscale_uses_bt601_weights() {
        let img = Image::new(3, 1, vec![255, 0, 0, 0, 200, 0, 0, 0, 255]);
        let result = convert_grayscale(&img).unwrap();

        let values: Vec<u8> = result.pixels.chunks_exact(3).map(|px| px[0]).collect();
        assert_eq!(values, vec![76, 117, 29]);
    }

    #[test]
    fn test_grayscale_keeps_neutral_gray() {
        let img = Image::filled(3, 3, [200, 200, 200]);
        let result = convert_grayscale(&img).unwrap();
        assert!(all_pixels(&result, [200, 200, 200]));
    }

    #[test]
    fn test_threshold_binary_and_inverse() {
        let img = Image::filled(8, 8, [200, 200, 200]);

        let binary = threshold(&img, ThresholdMethod::Binary).unwrap();
        assert!(all_pixels(&binary, [255, 255, 255]));

        let inverse = threshold(&img, ThresholdMethod::Inverse).unwrap();
        assert!(all_pixels(&inverse, [0, 0, 0]));
    }

    #[test]
    fn test_threshold_cutoff_is_exclusive() {
        let img = Image::new(2, 1, vec![127, 127, 127, 128, 128, 128]);
        let binary = threshold(&img, ThresholdMethod::Binary).unwrap();
        assert_eq!(binary.pixels, vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_threshold_colored_pixel_uses_luma() {
        // Pure green at 200 has luma 117, below the cutoff
        let img = Image::filled(2, 2, [0, 200, 0]);

        let binary = threshold(&img, ThresholdMethod::Binary).unwrap();
        assert!(all_pixels(&binary, [0, 0, 0]));

        let inverse = threshold(&img, ThresholdMethod::Inverse).unwrap();
        assert!(all_pixels(&inverse, [255, 255, 255]));
    }

    #[test]
    fn test_threshold_method_parsing() {
        assert_eq!("binary".parse::<ThresholdMethod>().unwrap(), ThresholdMethod::Binary);
        assert_eq!(" Inverse ".parse::<ThresholdMethod>().unwrap(), ThresholdMethod::Inverse);
        assert_eq!("inv".parse::<ThresholdMethod>().unwrap(), ThresholdMethod::Inverse);
        assert!("otsu".parse::<ThresholdMethod>().is_err());
        assert_eq!(ThresholdMethod::Inverse.to_string(), "inverse");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn pixels_strategy(width: u32, height: u32) -> impl Strategy<Value = Vec<u8>> {
        let size = (width as usize) * (height as usize) * 3;
        prop::collection::vec(any::<u8>(), size..=size)
    }

    fn image_strategy() -> impl Strategy<Value = Image> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            pixels_strategy(w, h).prop_map(move |pixels| Image::new(w, h, pixels))
        })
    }

    proptest! {
        /// Property: Brightness matches a clamped per-channel add.
        #[test]
        fn prop_brightness_is_clamped_add(img in image_strategy(), offset in -400i32..=400) {
            let result = adjust_brightness(&img, offset).unwrap();
            for (out, inp) in result.pixels.iter().zip(img.pixels.iter()) {
                prop_assert_eq!(*out as i32, (*inp as i32 + offset).clamp(0, 255));
            }
        }

        /// Property: Threshold output is always pure black or pure white.
        #[test]
        fn prop_threshold_is_two_level(img in image_strategy(), inverse in any::<bool>()) {
            let method = if inverse { ThresholdMethod::Inverse } else { ThresholdMethod::Binary };
            let result = threshold(&img, method).unwrap();
            prop_assert_eq!(result.pixels.len(), img.pixels.len());
            prop_assert!(result.pixels.iter().all(|&v| v == 0 || v == 255));
        }

        /// Property: Contrast with factor 1 is the identity.
        #[test]
        fn prop_unit_contrast_is_identity(img in image_strategy()) {
            prop_assert_eq!(adjust_contrast(&img, 1.0).unwrap(), img);
        }
    }
}
