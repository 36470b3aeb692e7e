//! A single edit request and the log text it produces.

use std::fmt;
use std::path::PathBuf;

use crate::adjustments::{adjust_brightness, adjust_contrast, convert_grayscale, threshold, ThresholdMethod};
use crate::blend::blend_with_file;
use crate::border::{add_padding, BorderMode, Padding};
use crate::types::{EditError, Image};

/// An edit that turns the current image into a new one.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Brightness(i32),
    Contrast(f32),
    Grayscale,
    Pad { padding: Padding, mode: BorderMode },
    Threshold(ThresholdMethod),
    Blend { path: PathBuf, alpha: f32 },
}

impl Operation {
    /// Run the transform against `image`.
    pub fn apply(&self, image: &Image) -> Result<Image, EditError> {
        match self {
            Operation::Brightness(offset) => adjust_brightness(image, *offset),
            Operation::Contrast(factor) => adjust_contrast(image, *factor),
            Operation::Grayscale => convert_grayscale(image),
            Operation::Pad { padding, mode } => add_padding(image, *padding, *mode),
            Operation::Threshold(method) => threshold(image, *method),
            Operation::Blend { path, alpha } => blend_with_file(image, path, *alpha),
        }
    }

    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Brightness(_) => "brightness",
            Operation::Contrast(_) => "contrast",
            Operation::Grayscale => "grayscale",
            Operation::Pad { .. } => "padding",
            Operation::Threshold(_) => "threshold",
            Operation::Blend { .. } => "blend",
        }
    }
}

/// The history log entry for this operation.
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Brightness(offset) => write!(f, "brightness {:+}", offset),
            Operation::Contrast(factor) => write!(f, "contrast x{}", factor),
            Operation::Grayscale => f.write_str("converted to grayscale"),
            Operation::Pad { padding, mode } => write!(
                f,
                "padding {}px T, {}px B, {}px L, {}px R ({})",
                padding.top, padding.bottom, padding.left, padding.right, mode
            ),
            Operation::Threshold(method) => write!(f, "threshold {}", method),
            Operation::Blend { path, alpha } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                write!(f, "blend with {}, alpha={}", name, alpha)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(Operation::Brightness(-50).to_string(), "brightness -50");
        assert_eq!(Operation::Brightness(20).to_string(), "brightness +20");
        assert_eq!(Operation::Contrast(2.0).to_string(), "contrast x2");
        assert_eq!(Operation::Contrast(1.5).to_string(), "contrast x1.5");
        assert_eq!(Operation::Grayscale.to_string(), "converted to grayscale");
        assert_eq!(
            Operation::Pad {
                padding: Padding::new(10, 0, 5, 5),
                mode: BorderMode::Reflect,
            }
            .to_string(),
            "padding 10px T, 0px B, 5px L, 5px R (reflect)"
        );
        assert_eq!(
            Operation::Threshold(ThresholdMethod::Inverse).to_string(),
            "threshold inverse"
        );
        assert_eq!(
            Operation::Blend {
                path: PathBuf::from("photos/cat(1).jpg"),
                alpha: 0.5,
            }
            .to_string(),
            "blend with cat(1).jpg, alpha=0.5"
        );
    }

    #[test]
    fn test_apply_dispatches() {
        let img = Image::filled(4, 4, [100, 100, 100]);

        let result = Operation::Brightness(10).apply(&img).unwrap();
        assert!(result.pixels.iter().all(|&v| v == 110));

        let result = Operation::Pad {
            padding: Padding::new(1, 1, 1, 1),
            mode: BorderMode::Constant,
        }
        .apply(&img)
        .unwrap();
        assert_eq!((result.width, result.height), (6, 6));
    }

    #[test]
    fn test_apply_propagates_errors() {
        let img = Image::filled(4, 4, [100, 100, 100]);
        assert!(Operation::Contrast(-2.0).apply(&img).is_err());
        assert!(matches!(
            Operation::Blend {
                path: PathBuf::from("/nonexistent/other.png"),
                alpha: 0.5,
            }
            .apply(&img),
            Err(EditError::ImageNotFound { .. })
        ));
    }
}
