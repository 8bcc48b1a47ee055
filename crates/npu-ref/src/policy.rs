//! Choosing requantization parameters for random test data.
//!
//! A test case is usable only when its accumulators can be squeezed into the
//! 8-bit range by a scale strictly below one. Random data is regenerated
//! until that holds or the retry budget runs out; running out is an ordinary
//! outcome ([`QuantSearch::Exhausted`]) that callers skip, not an error.

use crate::quant::{quantize_multiplier_smaller_than_one, QuantParams};
use rand::Rng;
use tracing::debug;

/// Smallest and largest accumulator, or `None` for an empty slice.
#[must_use]
pub fn accumulator_range(acc: &[i32]) -> Option<(i32, i32)> {
    let min = acc.iter().copied().min()?;
    let max = acc.iter().copied().max()?;
    Some((min, max))
}

/// Scale mapping the larger-magnitude extreme onto 127 or -128.
///
/// `127 / |max|` when `|max| > |min|`, otherwise `128 / |min|`. Valid only
/// when the scale is strictly between zero and one.
#[must_use]
pub fn derive_multiplier(min: i32, max: i32) -> Option<QuantParams> {
    let (lo, hi) = (f64::from(min).abs(), f64::from(max).abs());
    let scale = if hi > lo { 127.0 / hi } else { 128.0 / lo };
    if scale > 0.0 && scale < 1.0 {
        quantize_multiplier_smaller_than_one(scale)
    } else {
        None
    }
}

/// Outcome of a bounded parameter search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantSearch<T> {
    /// Usable data and the parameters derived from it.
    Found {
        /// Derived scale.
        params: QuantParams,
        /// The data set that produced it.
        data: T,
        /// Generation rounds used, at least one.
        attempts: u32,
    },
    /// No round produced a scale below one.
    Exhausted {
        /// Generation rounds used.
        attempts: u32,
    },
}

impl<T> QuantSearch<T> {
    /// `true` for [`QuantSearch::Found`].
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Parameters and data if found.
    pub fn found(self) -> Option<(QuantParams, T)> {
        match self {
            Self::Found { params, data, .. } => Some((params, data)),
            Self::Exhausted { .. } => None,
        }
    }
}

/// Regenerate data until its accumulator range yields a valid scale.
///
/// `generate` returns a fresh data set and the `(min, max)` of its raw
/// accumulators. At most `budget` rounds are run.
pub fn search_quant_params<R, T, F>(rng: &mut R, budget: u32, mut generate: F) -> QuantSearch<T>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> (T, Option<(i32, i32)>),
{
    for attempt in 1..=budget {
        let (data, range) = generate(rng);
        if let Some(params) = range.and_then(|(min, max)| derive_multiplier(min, max)) {
            return QuantSearch::Found { params, data, attempts: attempt };
        }
        debug!(attempt, ?range, "no usable scale, regenerating");
    }
    QuantSearch::Exhausted { attempts: budget }
}

/// Spread one base scale into a per-channel variant.
///
/// Multipliers usually sit in `[2^30, 2^31)`; subtracting less than `2^26`
/// keeps them there. The shift moves by `-1..=2`.
pub fn perturb<R: Rng + ?Sized>(base: QuantParams, rng: &mut R) -> QuantParams {
    let multiplier = base.multiplier.saturating_sub(rng.gen_range(0..1u32 << 26));
    let shift = base.shift.saturating_sub(1).saturating_add(rng.gen_range(0..4));
    QuantParams { multiplier, shift }
}

/// Pick a value from the bucket `table[index]..table[index + 1]`.
///
/// The last entry is returned as is; an index past the end yields 0.
pub fn choose_from_range<R: Rng + ?Sized>(rng: &mut R, table: &[usize], index: usize) -> usize {
    let Some(&base) = table.get(index) else {
        return 0;
    };
    match table.get(index + 1) {
        Some(&next) => {
            let span = next.saturating_sub(base).saturating_sub(1).max(1);
            base + rng.gen_range(0..span)
        }
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn derive_picks_dominant_extreme() {
        let q = derive_multiplier(-100, 254).unwrap();
        assert!((q.to_f64() - 0.5).abs() < 1e-9);
        let q = derive_multiplier(-512, 300).unwrap();
        assert!((q.to_f64() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn derive_rejects_small_ranges() {
        // 127 / 100 >= 1
        assert!(derive_multiplier(-3, 100).is_none());
        assert!(derive_multiplier(0, 0).is_none());
        assert!(derive_multiplier(-128, 0).is_none());
    }

    #[test]
    fn search_stops_on_first_usable_round() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut round = 0;
        let result = search_quant_params(&mut rng, 5, |_| {
            round += 1;
            let max = if round < 3 { 10 } else { 1000 };
            (round, Some((0, max)))
        });
        match result {
            QuantSearch::Found { data, attempts, .. } => {
                assert_eq!(data, 3);
                assert_eq!(attempts, 3);
            }
            QuantSearch::Exhausted { .. } => panic!("expected a usable round"),
        }
    }

    #[test]
    fn search_reports_exhaustion() {
        let mut rng = StdRng::seed_from_u64(7);
        let result: QuantSearch<()> = search_quant_params(&mut rng, 4, |_| ((), Some((0, 1))));
        assert_eq!(result, QuantSearch::Exhausted { attempts: 4 });
        assert!(!result.is_found());
    }

    #[test]
    fn perturb_stays_close() {
        let mut rng = StdRng::seed_from_u64(11);
        let base = QuantParams::new(1 << 31, 6);
        for _ in 0..100 {
            let q = perturb(base, &mut rng);
            assert!(q.multiplier <= base.multiplier);
            assert!(base.multiplier - q.multiplier < 1 << 26);
            assert!((5..=8).contains(&q.shift));
        }
    }

    #[test]
    fn choose_from_range_buckets() {
        let mut rng = StdRng::seed_from_u64(3);
        let table = [1, 3, 11, 128];
        for _ in 0..50 {
            let v = choose_from_range(&mut rng, &table, 1);
            assert!((3..10).contains(&v));
        }
        assert_eq!(choose_from_range(&mut rng, &table, 3), 128);
        assert_eq!(choose_from_range(&mut rng, &table, 4), 0);
    }
}
