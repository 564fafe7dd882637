//! Synthetic source images shared by unit tests.

use crate::decode::DecodedImage;
use crate::encode::encode_image;

const SKY: [u8; 3] = [110, 160, 215];

/// Deterministic noisy gradient; flat images compress to almost nothing
/// and hide the quality/size relationship.
pub(crate) fn textured(width: u32, height: u32) -> DecodedImage {
    scene(width, height, height)
}

/// Single-colour image; encodes to nearly the same size at every quality.
pub(crate) fn flat(width: u32, height: u32) -> DecodedImage {
    DecodedImage::new(width, height, vec![128u8; (width * height * 3) as usize])
}

/// Photo-like frame: the top `detail_rows` rows are textured ground, the rest
/// is clear sky.
///
/// Sky blocks cost the same few bits at every quality, so the frame's size
/// curve is the textured curve scaled by the detail area.
pub(crate) fn scene(width: u32, height: u32, detail_rows: u32) -> DecodedImage {
    let mut state: u32 = 0x9E37_79B9;
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            if y >= detail_rows {
                pixels.extend_from_slice(&SKY);
                continue;
            }
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let noise = (state >> 24) as u8 / 4;
            pixels.push(((x * 180) / width) as u8 + noise);
            pixels.push(((y * 180) / height) as u8 + noise);
            pixels.push(noise.wrapping_mul(3));
        }
    }
    DecodedImage::new(width, height, pixels)
}

/// A [`scene`] whose detail area is sized so the frame encodes to roughly
/// `target` bytes at `quality`.
///
/// Near quality 45 one quality step moves the quantizer scale by about 2%,
/// so the size curve there is fine-grained enough to land in a ±2% band.
pub(crate) fn scene_for_size(width: u32, height: u32, target: usize, quality: u8) -> DecodedImage {
    let sky = encoded_size(&scene(width, height, 0), quality);
    let full = encoded_size(&scene(width, height, height), quality);
    assert!(
        sky < target && target < full,
        "target {target} outside {sky}..{full} at quality {quality}"
    );

    let share = (target - sky) as f64 / (full - sky) as f64;
    // Whole 8x8 block rows
    let rows = ((share * height as f64 / 8.0).round() as u32 * 8).clamp(8, height);
    scene(width, height, rows)
}

/// Mean absolute difference per channel sample.
pub(crate) fn mean_abs_error(a: &DecodedImage, b: &DecodedImage) -> f64 {
    assert_eq!((a.width, a.height), (b.width, b.height));
    let total: u64 = a
        .pixels
        .iter()
        .zip(&b.pixels)
        .map(|(&p, &q)| p.abs_diff(q) as u64)
        .sum();
    total as f64 / a.pixels.len() as f64
}

fn encoded_size(image: &DecodedImage, quality: u8) -> usize {
    encode_image(image, quality).unwrap().len()
}
