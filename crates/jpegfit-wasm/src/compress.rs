//! Compression WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { compress, compress_to_size, target_range } from '@jpegfit/wasm';
//!
//! const { min, max } = target_range();
//! slider.min = min;
//! slider.max = max;
//!
//! // Slider value and a policy code
//! const result = compress_to_size(image, Number(slider.value), 2);
//!
//! // Or the full settings object
//! const tuned = compress(image, { target_kb: 150, policy: 'damped', fallback: 'closest' });
//!
//! const blob = new Blob([result.bytes()], { type: result.mime_type });
//! link.download = result.file_name;
//! link.href = URL.createObjectURL(blob);
//! ```

use crate::types::{policy_from_u8, JsCompressed, JsDecodedImage};
use jpegfit_core::{compress_image, CompressSettings, TargetSize};
use jpegfit_core::{DOWNLOAD_FILE_NAME, DOWNLOAD_MIME_TYPE};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Bounds for the target size slider, in KB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl TargetRange {
    pub const SLIDER: TargetRange = TargetRange {
        min: TargetSize::MIN_KB,
        max: TargetSize::MAX_KB,
        default: TargetSize::DEFAULT_KB,
    };
}

/// Compress an image using a settings object.
///
/// `settings` is a plain object with any of `target_kb`, `policy`
/// (`"damped"`, `"descending"`, `"bisect"`), `fallback` (`"last_probe"`,
/// `"closest"`) and `max_probes`. Missing fields take their defaults;
/// `undefined` or `null` uses the defaults for everything.
///
/// # Errors
///
/// Returns an error if the settings object is malformed, the settings are
/// invalid (zero target or probe budget), or encoding fails.
#[wasm_bindgen]
pub fn compress(image: &JsDecodedImage, settings: JsValue) -> Result<JsCompressed, JsValue> {
    let settings: CompressSettings = if settings.is_undefined() || settings.is_null() {
        CompressSettings::default()
    } else {
        serde_wasm_bindgen::from_value(settings)
            .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?
    };

    run(image, &settings)
}

/// Compress an image towards `target_kb` with the given policy.
///
/// Policy values: 0 = damped scan, 1 = descending scan, anything else =
/// bisection.
#[wasm_bindgen]
pub fn compress_to_size(
    image: &JsDecodedImage,
    target_kb: u32,
    policy: u8,
) -> Result<JsCompressed, JsValue> {
    let settings = CompressSettings::new(target_kb, policy_from_u8(policy));
    run(image, &settings)
}

/// Slider bounds as `{ min, max, default }`.
#[wasm_bindgen]
pub fn target_range() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&TargetRange::SLIDER)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize target range: {}", e)))
}

/// File name offered for the download.
#[wasm_bindgen]
pub fn download_file_name() -> String {
    DOWNLOAD_FILE_NAME.to_string()
}

/// Content type declared on the download.
#[wasm_bindgen]
pub fn download_mime_type() -> String {
    DOWNLOAD_MIME_TYPE.to_string()
}

fn run(image: &JsDecodedImage, settings: &CompressSettings) -> Result<JsCompressed, JsValue> {
    let compressed = compress_image(image.as_decoded(), settings)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let result = JsCompressed::from_compressed(compressed);
    log_summary(&result);
    Ok(result)
}

#[cfg(target_arch = "wasm32")]
fn log_summary(result: &JsCompressed) {
    web_sys::console::log_1(&JsValue::from_str(&result.summary()));
}

#[cfg(not(target_arch = "wasm32"))]
fn log_summary(_result: &JsCompressed) {}
