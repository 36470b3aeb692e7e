//! Reading and writing image files.
//!
//! - Decoding any format enabled in the `image` crate features, from a path
//! - Encoding to a path, with the format chosen from the file extension
//! - JPEG encoding with configurable quality
//!
//! All operations are synchronous. File handles live only for the duration
//! of a single call.

mod load;
mod save;

pub use load::load_image;
pub use save::{encode_jpeg, save_image, DEFAULT_JPEG_QUALITY};
