//! jpegfit WASM - WebAssembly bindings for jpegfit
//!
//! This crate exposes jpegfit-core to the upload page: decode an upload,
//! show a preview, compress towards a target size and offer the result as a
//! download.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and results
//! - `decode` - Upload decoding and preview bindings
//! - `compress` - Target-size compression and download metadata
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_upload, compress_to_size } from '@jpegfit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_upload(bytes);
//! const result = compress_to_size(image, 100, 2);
//! console.log(`${result.size_kb.toFixed(1)} KB at quality ${result.quality}`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod decode;
mod types;

// Re-export public types
pub use compress::{
    compress, compress_to_size, download_file_name, download_mime_type, target_range, TargetRange,
};
pub use decode::{accepted_extensions, decode_upload, is_accepted_extension, preview};
pub use types::{JsCompressed, JsDecodedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
