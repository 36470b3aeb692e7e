//! Three-ellipse logo with an optional caption.

use std::path::Path;

use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_polygon_mut, draw_text_mut};
use imageproc::point::Point;
use tracing::{debug, warn};

use crate::types::{EditError, Image};

/// Number of vertices used to approximate an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 180;

/// A filled, rotated ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: (f32, f32),
    /// Half-lengths along the ellipse's own x and y axes.
    pub semi_axes: (f32, f32),
    /// Rotation in degrees, clockwise on screen (y points down).
    pub angle: f32,
    pub color: [u8; 3],
}

impl Ellipse {
    fn outline(&self) -> Vec<Point<i32>> {
        let (cx, cy) = self.center;
        let (a, b) = self.semi_axes;
        let (sin_r, cos_r) = self.angle.to_radians().sin_cos();

        let mut points: Vec<Point<i32>> = Vec::with_capacity(ELLIPSE_SEGMENTS);
        for i in 0..ELLIPSE_SEGMENTS {
            let t = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
            let (sin_t, cos_t) = t.sin_cos();
            let x = cx + a * cos_t * cos_r - b * sin_t * sin_r;
            let y = cy + a * cos_t * sin_r + b * sin_t * cos_r;
            let p = Point::new(x.round() as i32, y.round() as i32);
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
        // draw_polygon_mut rejects closed outlines
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points
    }
}

/// Text drawn on top of the shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    /// Top-left corner of the text box.
    pub position: (i32, i32),
    /// Glyph height in pixels.
    pub scale: f32,
    pub color: [u8; 3],
}

/// Canvas size, background and shapes of a logo.
#[derive(Debug, Clone, PartialEq)]
pub struct Logo {
    pub size: u32,
    pub background: [u8; 3],
    pub ellipses: Vec<Ellipse>,
    pub caption: Caption,
}

impl Default for Logo {
    /// Blue, green and red ellipses on a white 512×512 canvas, captioned
    /// "OpenCV" in black.
    fn default() -> Self {
        let (cx, cy) = (256.0, 256.0);
        let semi_axes = (60.0, 100.0);
        Self {
            size: 512,
            background: [255, 255, 255],
            ellipses: vec![
                Ellipse {
                    center: (cx - 50.0, cy - 50.0),
                    semi_axes,
                    angle: 0.0,
                    color: [0, 0, 255],
                },
                Ellipse {
                    center: (cx + 50.0, cy - 50.0),
                    semi_axes,
                    angle: 120.0,
                    color: [0, 255, 0],
                },
                Ellipse {
                    center: (cx, cy + 60.0),
                    semi_axes,
                    angle: 240.0,
                    color: [255, 0, 0],
                },
            ],
            caption: Caption {
                text: "OpenCV".to_string(),
                position: (170, 418),
                scale: 56.0,
                color: [0, 0, 0],
            },
        }
    }
}

impl Logo {
    /// Replace the caption text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.caption.text = text.into();
        self
    }

    /// Draw the logo. The caption needs a font; without one it is skipped.
    pub fn render(&self, font: Option<&FontVec>) -> Image {
        let mut canvas = RgbImage::from_pixel(self.size, self.size, Rgb(self.background));

        for ellipse in &self.ellipses {
            let outline = ellipse.outline();
            if outline.len() < 3 {
                warn!(?ellipse, "Ellipse too small to draw");
                continue;
            }
            draw_polygon_mut(&mut canvas, &outline, Rgb(ellipse.color));
        }

        match font {
            Some(font) if !self.caption.text.is_empty() => {
                let (x, y) = self.caption.position;
                draw_text_mut(
                    &mut canvas,
                    Rgb(self.caption.color),
                    x,
                    y,
                    self.caption.scale,
                    font,
                    &self.caption.text,
                );
                debug!(text = %self.caption.text, "Caption drawn");
            }
            Some(_) => {}
            None => warn!("No font supplied, skipping caption"),
        }

        Image::from_rgb_image(canvas)
    }
}

/// Load a TrueType/OpenType font for captions.
pub fn load_font(path: impl AsRef<Path>) -> Result<FontVec, EditError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| EditError::Io(format!("{}: {}", path.display(), e)))?;
    FontVec::try_from_vec(bytes)
        .map_err(|e| EditError::InvalidParameter(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logo_colors() {
        let img = Logo::default().render(None);

        assert_eq!((img.width, img.height), (512, 512));
        assert_eq!(img.pixel(0, 0), Some([255, 255, 255]));
        assert_eq!(img.pixel(511, 511), Some([255, 255, 255]));
        assert_eq!(img.pixel(206, 206), Some([0, 0, 255]));
        assert_eq!(img.pixel(306, 206), Some([0, 255, 0]));
        assert_eq!(img.pixel(256, 316), Some([255, 0, 0]));
    }

    #[test]
    fn test_unrotated_ellipse_extent() {
        let logo = Logo {
            size: 100,
            background: [0, 0, 0],
            ellipses: vec![Ellipse {
                center: (50.0, 50.0),
                semi_axes: (10.0, 30.0),
                angle: 0.0,
                color: [255, 255, 255],
            }],
            caption: Caption {
                text: String::new(),
                position: (0, 0),
                scale: 10.0,
                color: [0, 0, 0],
            },
        };
        let img = logo.render(None);

        // Tall and narrow: inside along y, outside along x
        assert_eq!(img.pixel(50, 25), Some([255, 255, 255]));
        assert_eq!(img.pixel(50, 75), Some([255, 255, 255]));
        assert_eq!(img.pixel(35, 50), Some([0, 0, 0]));
        assert_eq!(img.pixel(65, 50), Some([0, 0, 0]));
    }

    #[test]
    fn test_outline_is_open() {
        let outline = Logo::default().ellipses[1].outline();
        assert!(outline.len() > 3);
        assert_ne!(outline.first(), outline.last());
    }

    #[test]
    fn test_with_text() {
        assert_eq!(Logo::default().with_text("pixedit").caption.text, "pixedit");
    }

    #[test]
    fn test_load_font_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_font(dir.path().join("missing.ttf")),
            Err(EditError::Io(_))
        ));

        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"not a font").unwrap();
        assert!(matches!(
            load_font(&bogus),
            Err(EditError::InvalidParameter(_))
        ));
    }
}
