//! Damped linear scan.

use super::prober::Prober;
use super::{AcceptanceBand, QualityEncoder, SearchConfig, SearchError, SearchOutcome};

pub const DAMPED_START: i32 = 95;
/// The scan stops once quality falls to or below this value.
pub const DAMPED_FLOOR: i32 = 5;
pub const DAMPED_STEP: i32 = 5;

/// Scan down from quality 95, stepping back up by half a step on undershoot.
///
/// Accepts the first encoding within ±5% of `target`. An overshoot lowers
/// quality by 5; an undershoot raises it by `5 / 2 = 2`. When the loop exits
/// at the floor, the fallback rule picks the result.
///
/// The scan is not guaranteed to settle. An image that stays under the target
/// even at maximum quality keeps climbing (the encoder clamps at 100). A size
/// curve that jumps across the band without landing in it makes the -5/+2
/// moves revisit the same qualities in a cycle. Only the probe budget ends
/// either case.
pub fn damped_scan<E: QualityEncoder>(
    encoder: &mut E,
    target: usize,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError<E::Error>> {
    let band = AcceptanceBand::DAMPED;
    let mut prober = Prober::new(encoder, target, config);
    let mut quality = DAMPED_START;

    while quality > DAMPED_FLOOR {
        let Some(size) = prober.probe(quality)? else {
            break;
        };

        if band.contains(size, target) {
            return prober.accept();
        }

        if size > target {
            quality -= DAMPED_STEP;
        } else {
            quality = quality.saturating_add(DAMPED_STEP / 2);
        }
    }

    prober.finish()
}
