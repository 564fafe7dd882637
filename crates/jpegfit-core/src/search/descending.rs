//! Monotonic decreasing scan with a one-sided test.

use super::prober::Prober;
use super::{QualityEncoder, SearchConfig, SearchError, SearchOutcome};

pub const DESCENDING_START: i32 = 95;
/// The scan stops once quality falls to or below this value.
pub const DESCENDING_FLOOR: i32 = 10;
pub const DESCENDING_STEP: i32 = 5;
/// Probes at 95, 90, ..., 15.
pub const MAX_DESCENDING_PROBES: usize =
    ((DESCENDING_START - DESCENDING_FLOOR - 1) / DESCENDING_STEP + 1) as usize;

/// Lower quality in steps of 5 until the output fits under `target`.
///
/// Quality never goes back up, so the first encoding at or under the target
/// wins even if it is far smaller. There is no lower bound on how small.
pub fn descending_scan<E: QualityEncoder>(
    encoder: &mut E,
    target: usize,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError<E::Error>> {
    let mut prober = Prober::new(encoder, target, config);
    let mut quality = DESCENDING_START;

    while quality > DESCENDING_FLOOR {
        let Some(size) = prober.probe(quality)? else {
            break;
        };

        if size <= target {
            return prober.accept();
        }

        quality -= DESCENDING_STEP;
    }

    prober.finish()
}
