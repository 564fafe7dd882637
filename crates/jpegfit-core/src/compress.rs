//! Top-level compression: decoded image + settings in, JPEG bytes out.

use thiserror::Error;
use tracing::info;

use crate::decode::{decode_upload, DecodeError, DecodedImage};
use crate::encode::{EncodeError, JpegProbe};
use crate::search::{search, Probe, SearchError};
use crate::settings::{CompressSettings, SettingsError};

/// Errors from a compression request.
///
/// A target that cannot be reached is not an error; see [`Compressed::accepted`].
#[derive(Debug, Error)]
pub enum CompressError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Search(#[from] SearchError<EncodeError>),
}

/// A compressed image ready for download.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// JPEG bytes.
    pub bytes: Vec<u8>,
    /// Quality the bytes were encoded at.
    pub quality: u8,
    /// Whether the size passed the policy's acceptance test. `false` means
    /// the bytes are the best-effort fallback.
    pub accepted: bool,
    /// Probe history, in order.
    pub probes: Vec<Probe>,
}

impl Compressed {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }
}

/// Find a JPEG encoding of `image` near the settings' target size.
///
/// Always returns some encoding for valid input and settings, even when the
/// target is out of reach.
pub fn compress_image(
    image: &DecodedImage,
    settings: &CompressSettings,
) -> Result<Compressed, CompressError> {
    settings.validate()?;
    let target = settings.target()?;

    let mut probe = JpegProbe::new(image);
    let outcome = search(&mut probe, target.bytes(), &settings.search_config())?;

    info!(
        width = image.width,
        height = image.height,
        target_kb = target.kb(),
        size = outcome.size(),
        quality = outcome.quality,
        "compressed image"
    );

    Ok(Compressed {
        bytes: outcome.bytes,
        quality: outcome.quality,
        accepted: outcome.accepted,
        probes: outcome.probes,
    })
}

/// Decode an upload and compress it.
pub fn compress_upload(
    bytes: &[u8],
    settings: &CompressSettings,
) -> Result<Compressed, CompressError> {
    let image = decode_upload(bytes)?;
    compress_image(&image, settings)
}
