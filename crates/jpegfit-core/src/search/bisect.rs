//! Binary search over quality with a symmetric ±2% band.

use super::prober::Prober;
use super::{AcceptanceBand, QualityEncoder, SearchConfig, SearchError, SearchOutcome};

pub const BISECT_LOW: i32 = 5;
pub const BISECT_HIGH: i32 = 95;
/// ceil(log2(91)) for the 5..=95 interval.
pub const MAX_BISECT_PROBES: usize = 7;

/// Binary search for a quality whose output is within ±2% of `target`.
///
/// Overshoot searches lower qualities, undershoot searches higher ones. When
/// the interval empties without a hit, the fallback rule picks the result.
/// Under [`Fallback::LastProbe`](super::Fallback::LastProbe) that is the final
/// midpoint, which is not necessarily the probe nearest the target.
pub fn bisect<E: QualityEncoder>(
    encoder: &mut E,
    target: usize,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError<E::Error>> {
    let band = AcceptanceBand::BISECT;
    let mut prober = Prober::new(encoder, target, config);
    let (mut low, mut high) = (BISECT_LOW, BISECT_HIGH);

    while low <= high {
        let mid = (low + high) / 2;
        let Some(size) = prober.probe(mid)? else {
            break;
        };

        if band.contains(size, target) {
            return prober.accept();
        }

        if size > target {
            high = mid - 1;
        } else {
            low = mid + 1;
        }
    }

    prober.finish()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::search::mock::sized_by;
    use crate::search::Policy;
    use proptest::prelude::*;

    proptest! {
        /// Property: on a monotone curve, bisect finds the band whenever some
        /// quality in 5..=95 lies inside it, and never needs more than 7 probes.
        #[test]
        fn prop_monotone_curve_hits_reachable_band(
            slope in 100usize..=5000,
            offset in 0usize..=20_000,
            target in 1usize..=600_000,
        ) {
            let curve = move |q: u32| offset + slope * q as usize;
            let reachable = (BISECT_LOW..=BISECT_HIGH)
                .any(|q| AcceptanceBand::BISECT.contains(curve(q as u32), target));

            let outcome = bisect(&mut sized_by(curve), target, &SearchConfig::new(Policy::Bisect))
                .unwrap();

            prop_assert!(outcome.probe_count() <= MAX_BISECT_PROBES);
            prop_assert_eq!(outcome.accepted, reachable);
            if outcome.accepted {
                prop_assert!(AcceptanceBand::BISECT.contains(outcome.size(), target));
            }
        }
    }
}
