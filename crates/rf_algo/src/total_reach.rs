// --------------------------------------------------------------------------------
// FILE: crates/rf_algo/src/total_reach.rs
// --------------------------------------------------------------------------------
//! Total reach stage: overlap discount → weighted efficiency → ceiling cap.
//!
//! The order is fixed. Overlap is removed from raw summed reach first, the
//! reach-weighted efficiency is applied to the de-duplicated audience, and the
//! `max_reach_percent` ceiling is applied last so nothing can undercut it.

use rf_core::{ChannelMap, EnginePolicy, PlanInput};

/// Output of the total reach stage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TotalReachOut {
    pub raw_total_reach: f64,
    pub overlapped_reach: f64,
    pub weighted_efficiency: f64,
    pub final_reach: f64,
}

/// Blend per-channel reach into a single de-duplicated, efficiency-adjusted total.
///
/// An empty `channel_reach` (no channel had penetration data) yields all zeros,
/// with `weighted_efficiency` reported as the policy default.
pub fn blend_total_reach(
    plan: &PlanInput,
    channel_reach: &ChannelMap<f64>,
    policy: &EnginePolicy,
) -> TotalReachOut {
    if channel_reach.is_empty() {
        return TotalReachOut {
            weighted_efficiency: policy.default_efficiency,
            ..TotalReachOut::default()
        };
    }

    let raw_total_reach: f64 = channel_reach.values().sum();

    // 1) Overlap: flat proportional loss to cross-channel duplication.
    let overlapped_reach = raw_total_reach * (1.0 - plan.global_overlap_factor);

    // 2) Reach-weighted efficiency.
    let weighted_efficiency = weighted_efficiency(plan, channel_reach, policy.default_efficiency);

    // 3) Efficiency, then 4) the ceiling.
    let after_efficiency = overlapped_reach * weighted_efficiency;
    let ceiling = plan.max_reach_percent / 100.0 * plan.total_universe as f64;
    let final_reach = after_efficiency.max(0.0).min(ceiling);

    TotalReachOut { raw_total_reach, overlapped_reach, weighted_efficiency, final_reach }
}

/// Σ(efficiency × reach) / Σ reach, with `default` standing in for missing
/// factors and for the whole average when Σ reach is 0.
pub fn weighted_efficiency(plan: &PlanInput, channel_reach: &ChannelMap<f64>, default: f64) -> f64 {
    let total_weight: f64 = channel_reach.values().sum();
    if total_weight <= 0.0 {
        return default;
    }
    let weighted: f64 = channel_reach
        .iter()
        .map(|(channel, &reach)| plan.efficiency_or(channel.as_str(), default) * reach)
        .sum();
    weighted / total_weight
}
