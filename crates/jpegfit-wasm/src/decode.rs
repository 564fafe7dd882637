//! Upload decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_upload`] - Decode a JPEG or PNG upload from bytes
//! - [`preview`] - Downscale a decoded upload for display
//! - [`accepted_extensions`] - File extensions the upload control should offer
//! - [`is_accepted_extension`] - Check a file name extension before reading it
//!
//! # Example
//!
//! ```typescript
//! import { decode_upload, preview, accepted_extensions } from '@jpegfit/wasm';
//!
//! input.accept = accepted_extensions().map((ext) => `.${ext}`).join(',');
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_upload(bytes);
//! const shown = preview(image, 1024);
//! ```

use crate::types::JsDecodedImage;
use jpegfit_core::decode::{self, UploadFormat};
use wasm_bindgen::prelude::*;

/// Decode an uploaded JPEG or PNG.
///
/// The format is detected from the leading bytes, not the file name. JPEG
/// uploads have their EXIF orientation applied; PNG alpha is dropped.
///
/// # Errors
///
/// Returns an error if the bytes are neither JPEG nor PNG, or if the data is
/// corrupted or truncated.
#[wasm_bindgen]
pub fn decode_upload(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_upload(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Downscale an image so its longest edge is at most `max_edge` pixels.
///
/// Pass 0 for the default preview edge. Images that already fit are returned
/// at their own size.
#[wasm_bindgen]
pub fn preview(image: &JsDecodedImage, max_edge: u32) -> Result<JsDecodedImage, JsValue> {
    decode::preview(image.as_decoded(), preview_edge(max_edge))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Lowercase extensions accepted by the upload control, without dots.
#[wasm_bindgen]
pub fn accepted_extensions() -> js_sys::Array {
    UploadFormat::ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| JsValue::from_str(ext))
        .collect()
}

/// Whether a file name's extension is one the upload control accepts.
#[wasm_bindgen]
pub fn is_accepted_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .and_then(|(_, ext)| UploadFormat::from_extension(ext))
        .is_some()
}

fn preview_edge(max_edge: u32) -> u32 {
    if max_edge == 0 {
        decode::DEFAULT_PREVIEW_EDGE
    } else {
        max_edge
    }
}
