//! Effective reach stage: geometric decay ladder over frequency thresholds.
//!
//! With `x = 1 / max(1, average_frequency)` and `r₁ = final reach %`, each
//! threshold is the previous one decayed by one more factor of `(1 − x)`:
//! `r_k = r_{k−1} × (1 − x)` for `k = 2..=max_frequency`. Every stored value is
//! clamped to `[0, max_reach_percent]`.

use rf_core::{EffectiveReach, Threshold};

use crate::percent_of;

/// Everything the ladder needs from earlier stages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LadderInputs {
    pub final_reach: f64,
    pub average_frequency: f64,
    pub total_universe: u64,
    pub max_reach_percent: f64,
    /// Highest threshold; values below 2 produce an empty ladder.
    pub max_frequency: u32,
}

/// Build the `"2+" ..= "max_frequency+"` ladder.
///
/// Non-positive reach or frequency maps every threshold to 0.0.
pub fn effective_reach_ladder(inp: &LadderInputs) -> EffectiveReach {
    let thresholds = (2..=inp.max_frequency).map(Threshold);

    if !is_positive(inp.final_reach) || !is_positive(inp.average_frequency) {
        return thresholds.map(|t| (t, 0.0)).collect();
    }

    let x = 1.0 / inp.average_frequency.max(1.0);
    let retention = 1.0 - x;
    let cap = inp.max_reach_percent.max(0.0);

    let mut current = percent_of(inp.final_reach, inp.total_universe);
    thresholds
        .map(|t| {
            current *= retention;
            (t, current.max(0.0).min(cap))
        })
        .collect()
}

/// `false` for zero, negatives and NaN.
#[inline]
fn is_positive(v: f64) -> bool {
    v > 0.0
}
