//! Frequency stage: average exposures per reached individual.

use rf_core::EnginePolicy;

/// `total_impressions / final_reach`, clamped into the policy's plausible band.
///
/// Non-positive (or NaN) reach yields exactly 0.
pub fn average_frequency(total_impressions: u64, final_reach: f64, policy: &EnginePolicy) -> f64 {
    if final_reach.is_nan() || final_reach <= 0.0 {
        return 0.0;
    }
    policy.clamp_frequency(total_impressions as f64 / final_reach)
}
