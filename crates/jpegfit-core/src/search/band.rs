//! Acceptance bands around a target size.

use serde::{Deserialize, Serialize};

/// Tolerance window, as fractions of the target, inside which a probe is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceBand {
    pub lower: f64,
    pub upper: f64,
}

impl AcceptanceBand {
    /// ±5%, used by the damped scan.
    pub const DAMPED: AcceptanceBand = AcceptanceBand::symmetric(0.05);
    /// ±2%, used by the binary search.
    pub const BISECT: AcceptanceBand = AcceptanceBand::symmetric(0.02);

    pub const fn symmetric(tolerance: f64) -> Self {
        Self {
            lower: 1.0 - tolerance,
            upper: 1.0 + tolerance,
        }
    }

    /// Inclusive byte bounds for `target`.
    pub fn bounds(&self, target: usize) -> (f64, f64) {
        let target = target as f64;
        (target * self.lower, target * self.upper)
    }

    pub fn contains(&self, size: usize, target: usize) -> bool {
        let (low, high) = self.bounds(target);
        let size = size as f64;
        size >= low && size <= high
    }
}
