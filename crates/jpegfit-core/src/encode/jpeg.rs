//! JPEG encoding at a single quality setting.
//!
//! Every probe of the quality search lands here: the full image is encoded
//! from scratch into a fresh buffer and the buffer length is the measured size.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::search::QualityEncoder;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB8 pixel data to JPEG bytes.
///
/// `quality` is clamped to 1..=100 before it reaches the encoder, so callers
/// that step past either end of the range still get a valid encoding.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero width or height and
/// `EncodeError::InvalidPixelData` when `pixels` is not `width * height * 3` long.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Encode a decoded image to JPEG bytes.
pub fn encode_image(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(&image.pixels, image.width, image.height, quality)
}

/// Encode-and-measure capability for one source image.
///
/// Borrows the image for the duration of a search; the search sees only
/// `quality -> bytes` and never touches the pixels.
#[derive(Debug, Clone, Copy)]
pub struct JpegProbe<'a> {
    image: &'a DecodedImage,
}

impl<'a> JpegProbe<'a> {
    pub fn new(image: &'a DecodedImage) -> Self {
        Self { image }
    }
}

impl QualityEncoder for JpegProbe<'_> {
    type Error = EncodeError;

    fn encode_at(&mut self, quality: u8) -> Result<Vec<u8>, EncodeError> {
        encode_image(self.image, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_images::textured;

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_jpeg(&vec![128u8; 100 * 100 * 3], 100, 100, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_quality_out_of_range_is_clamped() {
        let pixels = vec![128u8; 10 * 10 * 3];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
        // 255 clamps to 100, so both encodings are identical
        assert_eq!(
            encode_jpeg(&pixels, 10, 10, 255).unwrap(),
            encode_jpeg(&pixels, 10, 10, 100).unwrap()
        );
    }

    #[test]
    fn test_invalid_pixel_data() {
        let result = encode_jpeg(&vec![128u8; 99 * 100 * 3], 100, 100, 90);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 30000,
                actual: 29700
            })
        ));
    }

    #[test]
    fn test_zero_dimensions() {
        assert!(matches!(
            encode_jpeg(&[], 0, 100, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_jpeg(&[], 100, 0, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_probe_encodes_borrowed_image() {
        let img = textured(64, 48);
        let mut probe = JpegProbe::new(&img);

        let high = probe.encode_at(95).unwrap();
        let low = probe.encode_at(10).unwrap();
        assert!(high.len() > low.len(), "high={} low={}", high.len(), low.len());
        assert_eq!(high, encode_image(&img, 95).unwrap());
    }

    #[test]
    fn test_encode_image_matches_encode_jpeg() {
        let img = textured(20, 20);
        assert_eq!(
            encode_image(&img, 70).unwrap(),
            encode_jpeg(&img.pixels, 20, 20, 70).unwrap()
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every quality byte encodes a well-formed stream.
        #[test]
        fn prop_any_quality_produces_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in any::<u8>(),
        ) {
            let pixels = vec![100u8; (width * height * 3) as usize];
            let jpeg = encode_jpeg(&pixels, width, height, quality).unwrap();

            prop_assert!(jpeg.len() >= 4);
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: encoding is deterministic, which the search relies on
        /// when it compares sizes across probes.
        #[test]
        fn prop_deterministic(quality in 1u8..=100) {
            let pixels: Vec<u8> = (0..24 * 24 * 3).map(|i| ((i * 37) % 256) as u8).collect();
            let a = encode_jpeg(&pixels, 24, 24, quality).unwrap();
            let b = encode_jpeg(&pixels, 24, 24, quality).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Property: a wrong buffer length is always rejected.
        #[test]
        fn prop_wrong_length_rejected(
            (width, height) in (1u32..=30, 1u32..=30),
            delta in 1usize..=10,
            grow in any::<bool>(),
        ) {
            let expected = (width * height * 3) as usize;
            let len = if grow { expected + delta } else { expected.saturating_sub(delta) };
            prop_assume!(len != expected);

            let result = encode_jpeg(&vec![0u8; len], width, height, 80);
            let rejected = matches!(result, Err(EncodeError::InvalidPixelData { .. }));
            prop_assert!(rejected);
        }
    }
}
