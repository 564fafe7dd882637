//! Probe bookkeeping shared by the search policies.

use tracing::{debug, warn};

use super::{Fallback, Probe, QualityEncoder, SearchConfig, SearchError, SearchOutcome};

struct Candidate {
    quality: u8,
    bytes: Vec<u8>,
}

impl Candidate {
    fn distance(&self, target: usize) -> usize {
        self.bytes.len().abs_diff(target)
    }
}

/// Runs probes against an encoder and keeps what the fallback rule needs.
///
/// At most two buffers are alive: the current probe and, under
/// [`Fallback::Closest`], the nearest earlier one.
pub(crate) struct Prober<'e, E: QualityEncoder> {
    encoder: &'e mut E,
    target: usize,
    fallback: Fallback,
    max_probes: u32,
    probes: Vec<Probe>,
    current: Option<Candidate>,
    best_earlier: Option<Candidate>,
}

impl<'e, E: QualityEncoder> Prober<'e, E> {
    pub(crate) fn new(encoder: &'e mut E, target: usize, config: &SearchConfig) -> Self {
        Self {
            encoder,
            target,
            fallback: config.fallback,
            max_probes: config.max_probes,
            probes: Vec::new(),
            current: None,
            best_earlier: None,
        }
    }

    /// Encode at `quality` and return the size, or `None` once the budget is spent.
    ///
    /// Policies do their step arithmetic in `i32`; the value is clamped into
    /// the encoder's 1..=100 range here.
    pub(crate) fn probe(&mut self, quality: i32) -> Result<Option<usize>, SearchError<E::Error>> {
        if self.probes.len() >= self.max_probes as usize {
            warn!(
                max_probes = self.max_probes,
                target = self.target,
                next_quality = quality,
                "probe budget exhausted"
            );
            return Ok(None);
        }

        let quality = quality.clamp(1, 100) as u8;
        let bytes = self
            .encoder
            .encode_at(quality)
            .map_err(|source| SearchError::Encode { quality, source })?;
        let size = bytes.len();

        debug!(quality, size, target = self.target, "probe");
        self.probes.push(Probe { quality, size });

        let previous = self.current.replace(Candidate { quality, bytes });
        if let (Fallback::Closest, Some(previous)) = (self.fallback, previous) {
            let replace = match &self.best_earlier {
                Some(best) => previous.distance(self.target) <= best.distance(self.target),
                None => true,
            };
            if replace {
                self.best_earlier = Some(previous);
            }
        }

        Ok(Some(size))
    }

    /// Return the current probe as an accepted result.
    pub(crate) fn accept(self) -> Result<SearchOutcome, SearchError<E::Error>> {
        let current = self.current.ok_or(SearchError::NoProbe)?;
        Ok(SearchOutcome {
            bytes: current.bytes,
            quality: current.quality,
            accepted: true,
            probes: self.probes,
        })
    }

    /// End the search without an accepted probe and apply the fallback rule.
    pub(crate) fn finish(self) -> Result<SearchOutcome, SearchError<E::Error>> {
        let current = self.current.ok_or(SearchError::NoProbe)?;
        let chosen = match self.best_earlier {
            Some(best) if best.distance(self.target) < current.distance(self.target) => best,
            _ => current,
        };

        Ok(SearchOutcome {
            bytes: chosen.bytes,
            quality: chosen.quality,
            accepted: false,
            probes: self.probes,
        })
    }
}
