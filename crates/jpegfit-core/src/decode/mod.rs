//! Upload decoding for jpegfit.
//!
//! This module provides functionality for:
//! - Recognising the accepted upload formats (JPEG, PNG)
//! - Decoding an upload to RGB8 with EXIF orientation applied
//! - Scaling the decoded image down for the on-page preview
//!
//! All operations are synchronous and hold the whole image in memory.

mod resize;
mod types;
mod upload;

pub use resize::{preview, resize_to_fit, DEFAULT_PREVIEW_EDGE};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation, UploadFormat};
pub use upload::{decode_upload, get_orientation};
