//! Preview sizing for the upload page.
//!
//! The page shows the original upload scaled to the column width. Scaling
//! happens here so the browser receives a small RGB buffer instead of the
//! full-resolution pixels.

use super::{DecodeError, DecodedImage, FilterType};

/// Longest edge of the on-page preview when the caller does not choose one.
pub const DEFAULT_PREVIEW_EDGE: u32 = 1024;

/// Scale an image so its longest edge is at most `max_edge`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged; this never upscales.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if `max_edge` is zero.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (width, height) = fit_dimensions(image.width, image.height, max_edge);
    let rgb = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("pixel buffer does not match dimensions".into()))?;

    let resized = image::imageops::resize(&rgb, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgb_image(resized))
}

/// Build the on-page preview with Lanczos3 filtering.
pub fn preview(image: &DecodedImage, max_edge: u32) -> Result<DecodedImage, DecodeError> {
    resize_to_fit(image, max_edge, FilterType::Lanczos3)
}

fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;
    if width >= height {
        let scaled = (max_edge as f64 / ratio).round() as u32;
        (max_edge, scaled.max(1))
    } else {
        let scaled = (max_edge as f64 * ratio).round() as u32;
        (scaled.max(1), max_edge)
    }
}
