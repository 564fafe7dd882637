//! jpegfit core - fit a JPEG encoding to a target file size
//!
//! This crate provides the pieces behind the jpegfit upload page:
//! decoding an uploaded JPEG or PNG, scaling a preview, and searching for the
//! JPEG quality whose output lands near a chosen size in kilobytes.
//!
//! # Module Structure
//!
//! - `decode` - Upload format detection, decoding, preview sizing
//! - `encode` - JPEG encoding at a single quality
//! - `search` - Quality search policies over an encode-and-measure capability
//! - `settings` - Target size and search settings from the page
//! - `compress` - Decode, search, and return the download bytes

pub mod compress;
pub mod decode;
pub mod encode;
pub mod search;
pub mod settings;

#[cfg(test)]
mod test_images;

pub use compress::{compress_image, compress_upload, CompressError, Compressed};
pub use decode::{decode_upload, preview, DecodeError, DecodedImage, UploadFormat};
pub use encode::{encode_jpeg, EncodeError, JpegProbe};
pub use search::{
    search, AcceptanceBand, Fallback, Policy, Probe, QualityEncoder, SearchConfig, SearchError,
    SearchOutcome,
};
pub use settings::{
    CompressSettings, SettingsError, TargetSize, DOWNLOAD_FILE_NAME, DOWNLOAD_MIME_TYPE,
};
