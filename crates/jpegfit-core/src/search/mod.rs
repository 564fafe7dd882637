//! Quality search: find a JPEG quality whose output lands near a target size.
//!
//! Output size grows with quality, but the curve is non-linear and depends on
//! the image, so there is no closed-form inverse. Each policy probes the
//! encoder at a sequence of qualities and stops at the first encoding inside
//! its acceptance band.
//!
//! # Policies
//!
//! - [`Policy::Damped`] - scan down from 95 in steps of 5, nudge up by 2 on
//!   undershoot, accept within ±5%.
//! - [`Policy::Descending`] - scan down from 95 in steps of 5, accept the first
//!   encoding at or under the target.
//! - [`Policy::Bisect`] - binary search over 5..=95, accept within ±2%.
//!
//! An unreachable target is not an error. When no probe is accepted the search
//! still returns a buffer, picked from the probe history by [`Fallback`]. The
//! only failure a search reports is the encoder's own.
//!
//! The search is decoupled from the codec through [`QualityEncoder`]: anything
//! that maps a quality to encoded bytes can be searched, including plain
//! closures.

mod band;
mod bisect;
mod damped;
mod descending;
mod prober;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub use band::AcceptanceBand;
pub use bisect::{bisect, BISECT_HIGH, BISECT_LOW, MAX_BISECT_PROBES};
pub use damped::{damped_scan, DAMPED_FLOOR, DAMPED_START, DAMPED_STEP};
pub use descending::{
    descending_scan, DESCENDING_FLOOR, DESCENDING_START, DESCENDING_STEP, MAX_DESCENDING_PROBES,
};

/// Default probe budget shared by every policy.
pub const DEFAULT_MAX_PROBES: u32 = 32;

/// Encode-and-measure capability the search depends on.
///
/// One call encodes the whole source image at `quality` (1..=100) and returns
/// the encoded bytes. The search only looks at the length and hands the final
/// buffer back to the caller.
pub trait QualityEncoder {
    type Error;

    fn encode_at(&mut self, quality: u8) -> Result<Vec<u8>, Self::Error>;
}

impl<F, E> QualityEncoder for F
where
    F: FnMut(u8) -> Result<Vec<u8>, E>,
{
    type Error = E;

    fn encode_at(&mut self, quality: u8) -> Result<Vec<u8>, E> {
        self(quality)
    }
}

/// Which search policy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Damped linear scan with a ±5% band.
    Damped,
    /// Monotonic decreasing scan, accepts anything at or under the target.
    Descending,
    /// Binary search with a ±2% band.
    #[default]
    Bisect,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Damped, Policy::Descending, Policy::Bisect];

    pub fn name(self) -> &'static str {
        match self {
            Policy::Damped => "damped",
            Policy::Descending => "descending",
            Policy::Bisect => "bisect",
        }
    }
}

/// How to pick the returned buffer when no probe was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Return the last probe the policy made.
    #[default]
    LastProbe,
    /// Return the probe whose size is nearest the target. Ties go to the later probe.
    Closest,
}

/// Parameters for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub policy: Policy,
    pub fallback: Fallback,
    /// Hard cap on encodes. Only the damped scan can reach the default.
    pub max_probes: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            fallback: Fallback::default(),
            max_probes: DEFAULT_MAX_PROBES,
        }
    }
}

impl SearchConfig {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_max_probes(mut self, max_probes: u32) -> Self {
        self.max_probes = max_probes;
        self
    }
}

/// One encode: the quality asked for and the byte count it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    pub quality: u8,
    pub size: usize,
}

/// Result of a search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The chosen JPEG bytes.
    pub bytes: Vec<u8>,
    /// Quality that produced `bytes`.
    pub quality: u8,
    /// Whether `bytes` passed the policy's acceptance test, as opposed to
    /// being a fallback.
    pub accepted: bool,
    /// Every probe in the order it was made.
    pub probes: Vec<Probe>,
}

impl SearchOutcome {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }
}

/// Errors a search can surface. Unreachable targets are not among them.
#[derive(Debug, Error)]
pub enum SearchError<E> {
    /// The encoder failed on a probe.
    #[error("encoding at quality {quality} failed: {source}")]
    Encode {
        quality: u8,
        #[source]
        source: E,
    },

    /// The search ended without a single encode, e.g. a zero probe budget.
    #[error("search ended without encoding anything")]
    NoProbe,
}

/// Run the policy named in `config` against `target` bytes.
pub fn search<E: QualityEncoder>(
    encoder: &mut E,
    target: usize,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError<E::Error>> {
    let outcome = match config.policy {
        Policy::Damped => damped_scan(encoder, target, config)?,
        Policy::Descending => descending_scan(encoder, target, config)?,
        Policy::Bisect => bisect(encoder, target, config)?,
    };

    info!(
        policy = config.policy.name(),
        target,
        size = outcome.size(),
        quality = outcome.quality,
        accepted = outcome.accepted,
        probes = outcome.probe_count(),
        "quality search finished"
    );

    Ok(outcome)
}


#[cfg(test)]
mod tests {
    use super::mock::{cubic, linear};
    use super::*;
    use crate::encode::{EncodeError, JpegProbe};
    use crate::test_images::textured;

    #[test]
    fn test_search_dispatches_on_policy() {
        let target = 102_400;
        let damped = search(&mut linear(2000), target, &SearchConfig::new(Policy::Damped)).unwrap();
        let descending =
            search(&mut linear(2000), target, &SearchConfig::new(Policy::Descending)).unwrap();
        let bisected = search(&mut linear(2000), target, &SearchConfig::new(Policy::Bisect)).unwrap();

        // Each policy walks a different path to a different answer
        assert_eq!(damped.probes[0].quality, 95);
        assert_eq!(descending.quality, 50);
        assert_eq!(bisected.probes[0].quality, 50);
        assert_eq!(bisected.quality, 52);
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.policy, Policy::Bisect);
        assert_eq!(config.fallback, Fallback::LastProbe);
        assert_eq!(config.max_probes, DEFAULT_MAX_PROBES);
    }

    #[test]
    fn test_zero_budget_reports_no_probe() {
        for policy in Policy::ALL {
            let config = SearchConfig::new(policy).with_max_probes(0);
            let result = search(&mut cubic(), 10_000, &config);
            assert!(matches!(result, Err(SearchError::NoProbe)), "{policy:?}");
        }
    }

    #[test]
    fn test_encoder_error_propagates_with_quality() {
        let mut failing = |quality: u8| -> Result<Vec<u8>, EncodeError> {
            if quality < 40 {
                Err(EncodeError::EncodingFailed("simulated".into()))
            } else {
                Ok(vec![0u8; 2000 * quality as usize])
            }
        };

        let result = search(&mut failing, 1024, &SearchConfig::new(Policy::Bisect));
        match result {
            Err(SearchError::Encode { quality, source }) => {
                assert_eq!(quality, 27);
                assert!(source.to_string().contains("simulated"));
            }
            other => panic!("expected encode error, got {other:?}"),
        }
    }

    #[test]
    fn test_search_error_display() {
        let err: SearchError<EncodeError> = SearchError::Encode {
            quality: 42,
            source: EncodeError::EncodingFailed("boom".into()),
        };
        assert_eq!(
            err.to_string(),
            "encoding at quality 42 failed: JPEG encoding failed: boom"
        );
    }

    #[test]
    fn test_search_real_encoder_every_policy() {
        let img = textured(96, 64);
        let target = 4 * 1024;

        for policy in Policy::ALL {
            let mut probe = JpegProbe::new(&img);
            let outcome = search(&mut probe, target, &SearchConfig::new(policy)).unwrap();

            assert!(!outcome.bytes.is_empty());
            assert_eq!(&outcome.bytes[0..2], &[0xFF, 0xD8]);
            // The returned buffer is one of the probes, not a fresh encode
            assert!(outcome
                .probes
                .iter()
                .any(|p| p.quality == outcome.quality && p.size == outcome.size()));
        }
    }

    #[test]
    fn test_policy_serde_names() {
        for policy in Policy::ALL {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{}\"", policy.name()));
        }
        let fallback: Fallback = serde_json::from_str("\"closest\"").unwrap();
        assert_eq!(fallback, Fallback::Closest);
    }

    #[test]
    fn test_config_deserializes_partial() {
        let config: SearchConfig = serde_json::from_str(r#"{"policy":"damped"}"#).unwrap();
        assert_eq!(config, SearchConfig::new(Policy::Damped));
    }
}
