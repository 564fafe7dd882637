//! JPEG encoding for jpegfit.
//!
//! The output format is fixed: every buffer the crate hands back is a baseline
//! JPEG produced by the `image` crate's encoder. [`JpegProbe`] adapts the
//! encoder to the search's encode-and-measure capability.

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError, JpegProbe};
