//! Built-in channel tables and the demo plan.
//!
//! The penetration/efficiency tables are the defaults a plan editor starts
//! from; the demo plan is the fixed 8-channel dataset printed by `rf --demo`.

use crate::channel::{channel_map, ChannelMap, ChannelName};
use crate::errors::CoreError;
use crate::plan::PlanInput;

/// (channel, penetration, efficiency) in editor order.
pub const DEFAULT_CHANNELS: [(&str, f64, f64); 8] = [
    ("OOH", 0.08, 0.5),
    ("CTV", 0.75, 0.8),
    ("Creators", 0.17, 0.8),
    ("Music Streaming", 0.686, 0.7),
    ("Programmatic", 0.941, 0.3),
    ("Display", 0.941, 0.6),
    ("Social", 0.913, 0.6),
    ("Search", 0.65, 0.7),
];

const DEMO_IMPRESSIONS: [(&str, u64); 8] = [
    ("OOH", 32_905_578),
    ("CTV", 164_905_766),
    ("Creators", 5_000_000),
    ("Music Streaming", 20_000_000),
    ("Programmatic", 10_000_000),
    ("Display", 227_900_000),
    ("Social", 251_955_000),
    ("Search", 3_922_027),
];

/// Default penetration table.
pub fn default_penetration() -> Result<ChannelMap<f64>, CoreError> {
    channel_map(DEFAULT_CHANNELS.iter().map(|(name, p, _)| (*name, *p)))
}

/// Default efficiency table.
pub fn default_efficiency() -> Result<ChannelMap<f64>, CoreError> {
    channel_map(DEFAULT_CHANNELS.iter().map(|(name, _, e)| (*name, *e)))
}

/// A plan over the default channels with every channel at 0 impressions.
pub fn blank_plan(
    total_universe: u64,
    total_impressions: u64,
    max_reach_percent: f64,
    global_overlap_factor: f64,
) -> Result<PlanInput, CoreError> {
    let mut plan = PlanInput::new(total_universe, total_impressions, max_reach_percent, global_overlap_factor);
    for (name, _, _) in DEFAULT_CHANNELS {
        plan.channel_impressions.insert(ChannelName::new(name)?, 0);
    }
    plan.channel_penetration = default_penetration()?;
    plan.efficiency_factors = default_efficiency()?;
    Ok(plan)
}

/// The fixed demo dataset: 68.5M universe, ~611M impressions over 8 channels.
pub fn demo_plan() -> Result<PlanInput, CoreError> {
    let mut plan = blank_plan(68_500_000, 611_065_006, 98.8, 0.5)?;
    for (name, impressions) in DEMO_IMPRESSIONS {
        plan.channel_impressions.insert(ChannelName::new(name)?, impressions);
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_plan_covers_all_channels() {
        let plan = demo_plan().unwrap();
        assert_eq!(plan.channel_impressions.len(), 8);
        assert_eq!(plan.channel_penetration.len(), 8);
        assert_eq!(plan.efficiency_factors.len(), 8);
        let delivered: u64 = plan.channel_impressions.values().sum();
        assert_eq!(delivered, 716_588_371);
        assert_eq!(plan.channel_impressions["Music Streaming"], 20_000_000);
    }

    #[test]
    fn blank_plan_starts_at_zero() {
        let plan = blank_plan(1_000_000, 10_000, 90.0, 0.5).unwrap();
        assert!(plan.channel_impressions.values().all(|&n| n == 0));
        assert_eq!(plan.penetration("CTV"), Some(0.75));
    }
}
