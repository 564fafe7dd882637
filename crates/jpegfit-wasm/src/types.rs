//! WASM-compatible wrapper types.
//!
//! These wrap the core jpegfit types and handle the conversion between Rust
//! and JavaScript representations.

use jpegfit_core::search::Policy;
use jpegfit_core::{Compressed, DecodedImage, DOWNLOAD_FILE_NAME, DOWNLOAD_MIME_TYPE};
use wasm_bindgen::prelude::*;

/// A decoded upload held in WASM memory.
///
/// The page keeps one of these per upload and passes it back for the preview
/// and for every compression, so the upload is decoded once.
#[wasm_bindgen]
pub struct JsDecodedImage {
    inner: DecodedImage,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and RGB pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            inner: DecodedImage {
                width,
                height,
                pixels,
            },
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGB pixel data as a Uint8Array copy, e.g. for drawing the
    /// preview into a canvas.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases it otherwise.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(inner: DecodedImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_decoded(&self) -> &DecodedImage {
        &self.inner
    }
}

/// Result of a compression, ready to offer as a download.
#[wasm_bindgen]
pub struct JsCompressed {
    inner: Compressed,
}

#[wasm_bindgen]
impl JsCompressed {
    /// JPEG bytes as a Uint8Array copy.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.size()
    }

    #[wasm_bindgen(getter)]
    pub fn size_kb(&self) -> f64 {
        self.inner.size_kb()
    }

    /// Quality the bytes were encoded at.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> u8 {
        self.inner.quality
    }

    /// `false` when the target was out of reach and the bytes are a fallback.
    #[wasm_bindgen(getter)]
    pub fn accepted(&self) -> bool {
        self.inner.accepted
    }

    #[wasm_bindgen(getter)]
    pub fn probe_count(&self) -> usize {
        self.inner.probes.len()
    }

    /// Probe history as an array of `{ quality, size }`.
    pub fn probes(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.probes)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize probes: {}", e)))
    }

    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        DOWNLOAD_FILE_NAME.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        DOWNLOAD_MIME_TYPE.to_string()
    }
}

impl JsCompressed {
    pub(crate) fn from_compressed(inner: Compressed) -> Self {
        Self { inner }
    }

    /// One-line summary for the browser console.
    pub(crate) fn summary(&self) -> String {
        format!(
            "jpegfit: {:.1} KB at quality {} after {} probes{}",
            self.inner.size_kb(),
            self.inner.quality,
            self.inner.probes.len(),
            if self.inner.accepted {
                ""
            } else {
                " (best effort)"
            }
        )
    }
}

/// Convert a u8 policy value to the core Policy enum.
///
/// Values:
/// - 0 = Damped (linear scan, ±5%)
/// - 1 = Descending (linear scan, at or under target)
/// - 2 = Bisect (binary search, ±2%)
///
/// Any other value defaults to Bisect.
pub(crate) fn policy_from_u8(value: u8) -> Policy {
    match value {
        0 => Policy::Damped,
        1 => Policy::Descending,
        _ => Policy::Bisect,
    }
}
