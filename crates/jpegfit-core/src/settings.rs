//! Compression settings chosen on the upload page.
//!
//! The page keeps its controls in widget state and hands them over as one
//! serde value per compression. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::{Fallback, Policy, SearchConfig, DEFAULT_MAX_PROBES};

/// File name the download link offers.
pub const DOWNLOAD_FILE_NAME: &str = "compressed_image.jpg";
/// Content type declared on the download.
pub const DOWNLOAD_MIME_TYPE: &str = "image/jpeg";

/// Invalid compression settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Target size must be at least 1 KB")]
    ZeroTarget,

    #[error("Target size {kb} KB exceeds the maximum of {max} KB")]
    TargetTooLarge { kb: u32, max: u32 },

    #[error("Probe budget must allow at least one encode")]
    ZeroProbeBudget,
}

/// Desired encoded size in kilobytes (1 KB = 1024 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TargetSize(u32);

impl TargetSize {
    /// Slider lower bound on the upload page.
    pub const MIN_KB: u32 = 20;
    /// Slider upper bound on the upload page.
    pub const MAX_KB: u32 = 700;
    /// Slider starting value.
    pub const DEFAULT_KB: u32 = 100;
    /// Largest target whose byte count fits in a 32-bit `usize`.
    pub const LIMIT_KB: u32 = u32::MAX / 1024;

    pub fn new(kb: u32) -> Result<Self, SettingsError> {
        if kb == 0 {
            return Err(SettingsError::ZeroTarget);
        }
        if kb > Self::LIMIT_KB {
            return Err(SettingsError::TargetTooLarge {
                kb,
                max: Self::LIMIT_KB,
            });
        }
        Ok(Self(kb))
    }

    /// Snap `kb` into the slider range.
    pub fn clamped(kb: u32) -> Self {
        Self(kb.clamp(Self::MIN_KB, Self::MAX_KB))
    }

    pub fn kb(self) -> u32 {
        self.0
    }

    pub fn bytes(self) -> usize {
        self.0 as usize * 1024
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self(Self::DEFAULT_KB)
    }
}

impl TryFrom<u32> for TargetSize {
    type Error = SettingsError;

    fn try_from(kb: u32) -> Result<Self, Self::Error> {
        Self::new(kb)
    }
}

impl From<TargetSize> for u32 {
    fn from(target: TargetSize) -> u32 {
        target.0
    }
}

/// Everything one compression needs besides the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressSettings {
    /// Target size in KB.
    pub target_kb: u32,
    pub policy: Policy,
    pub fallback: Fallback,
    pub max_probes: u32,
}

impl Default for CompressSettings {
    fn default() -> Self {
        Self {
            target_kb: TargetSize::DEFAULT_KB,
            policy: Policy::default(),
            fallback: Fallback::default(),
            max_probes: DEFAULT_MAX_PROBES,
        }
    }
}

impl CompressSettings {
    pub fn new(target_kb: u32, policy: Policy) -> Self {
        Self {
            target_kb,
            policy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.target()?;
        if self.max_probes == 0 {
            return Err(SettingsError::ZeroProbeBudget);
        }
        Ok(())
    }

    pub fn target(&self) -> Result<TargetSize, SettingsError> {
        TargetSize::new(self.target_kb)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            policy: self.policy,
            fallback: self.fallback,
            max_probes: self.max_probes,
        }
    }
}
