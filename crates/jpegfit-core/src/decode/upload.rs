//! Upload decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::{DecodeError, DecodedImage, Orientation, UploadFormat};

/// Decode an uploaded JPEG or PNG into RGB8 pixels.
///
/// The format is taken from the file's magic bytes, not its name. EXIF
/// orientation is applied so the preview and the compressed output match what
/// the user sees in other viewers. Alpha is dropped: the output format has no
/// alpha channel.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` for anything other than JPEG or PNG,
/// and `DecodeError::CorruptedFile` if the decoder rejects the data.
pub fn decode_upload(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let format = UploadFormat::sniff(bytes).ok_or(DecodeError::UnsupportedFormat)?;
    let orientation = get_orientation(bytes);

    let img = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    debug!(
        ?format,
        ?orientation,
        width = img.width(),
        height = img.height(),
        "decoded upload"
    );

    let oriented = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgb_image(oriented.into_rgb8()))
}

/// Read the EXIF orientation of an upload.
///
/// Returns `Orientation::Normal` when there is no EXIF block or the tag is absent.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
