// --------------------------------------------------------------------------------
// FILE: crates/rf_algo/src/channel_reach.rs
// --------------------------------------------------------------------------------
//! Channel reach stage.
//!
//! For each channel present in both `channel_impressions` and
//! `channel_penetration`:
//! - ceiling = penetration × universe (the channel's addressable audience)
//! - reach = ceiling × (1 − e^(−impressions / ceiling)), clamped to `[0, ceiling]`
//! - zero impressions ⇒ zero reach (the channel is still listed)
//!
//! Channels without penetration data are skipped entirely. Contribution shares
//! are `reach / Σ reach × 100`, or 0 for every channel when the sum is 0.

use rf_core::{ChannelMap, PlanInput};

/// Output of the channel reach stage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelReachOut {
    pub channel_reach: ChannelMap<f64>,
    pub channel_contributions: ChannelMap<f64>,
    /// Σ `channel_reach`, before any overlap discount.
    pub raw_total_reach: f64,
}

/// Estimate unique reach for every channel with penetration data.
pub fn estimate_channel_reach(plan: &PlanInput) -> ChannelReachOut {
    let universe = plan.total_universe as f64;

    let mut channel_reach = ChannelMap::new();
    for (channel, &impressions) in &plan.channel_impressions {
        let Some(penetration) = plan.penetration(channel.as_str()) else {
            continue;
        };
        let ceiling = penetration * universe;
        channel_reach.insert(channel.clone(), saturating_reach(impressions, ceiling));
    }

    let raw_total_reach: f64 = channel_reach.values().sum();
    let channel_contributions = contribution_shares(&channel_reach, raw_total_reach);

    ChannelReachOut { channel_reach, channel_contributions, raw_total_reach }
}

/// Saturating-exponential reach curve against a finite ceiling.
///
/// Grows with impressions but never exceeds `ceiling`. Returns 0 for zero
/// impressions or a non-positive ceiling.
pub fn saturating_reach(impressions: u64, ceiling: f64) -> f64 {
    if impressions == 0 || ceiling.is_nan() || ceiling <= 0.0 {
        return 0.0;
    }
    let x = impressions as f64 / ceiling;
    // -expm1(-x) == 1 - e^-x without cancellation for small x.
    let reach = ceiling * -(-x).exp_m1();
    reach.max(0.0).min(ceiling)
}

fn contribution_shares(channel_reach: &ChannelMap<f64>, total: f64) -> ChannelMap<f64> {
    channel_reach
        .iter()
        .map(|(channel, &reach)| {
            let share = if total > 0.0 { reach / total * 100.0 } else { 0.0 };
            (channel.clone(), share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rf_core::ChannelName;

    fn ch(s: &str) -> ChannelName {
        s.parse().expect("channel name")
    }

    fn plan() -> PlanInput {
        PlanInput::new(10_000_000, 50_000_000, 90.0, 0.5)
    }

    #[test]
    fn single_channel_approaches_penetration_ceiling() {
        let p = plan().with_channel(ch("A"), 20_000_000, Some(0.8), Some(0.7));
        let out = estimate_channel_reach(&p);

        let reach = out.channel_reach["A"];
        // 8M × (1 − e^-2.5)
        assert!((reach - 8_000_000.0 * (1.0 - (-2.5f64).exp())).abs() < 1e-3);
        assert!(reach < 8_000_000.0);
        assert_eq!(out.channel_contributions["A"], 100.0);
        assert_eq!(out.raw_total_reach, reach);
    }

    #[test]
    fn channel_without_penetration_is_skipped() {
        let p = plan()
            .with_channel(ch("A"), 1_000_000, Some(0.5), None)
            .with_channel(ch("Radio"), 9_000_000, None, None);
        let out = estimate_channel_reach(&p);

        assert!(!out.channel_reach.contains_key("Radio"));
        assert!(!out.channel_contributions.contains_key("Radio"));
        assert_eq!(out.channel_contributions["A"], 100.0);
    }

    #[test]
    fn zero_impressions_listed_with_zero_reach() {
        let p = plan()
            .with_channel(ch("A"), 0, Some(0.5), None)
            .with_channel(ch("B"), 0, Some(0.9), None);
        let out = estimate_channel_reach(&p);

        assert_eq!(out.channel_reach.len(), 2);
        assert!(out.channel_reach.values().all(|&r| r == 0.0));
        assert!(out.channel_contributions.values().all(|&c| c == 0.0));
        assert_eq!(out.raw_total_reach, 0.0);
    }

    #[test]
    fn zero_penetration_yields_zero_reach() {
        assert_eq!(saturating_reach(1_000, 0.0), 0.0);
        assert_eq!(saturating_reach(0, 1_000.0), 0.0);
    }

    #[test]
    fn huge_volume_saturates_exactly_at_ceiling() {
        let r = saturating_reach(u64::MAX, 1_000_000.0);
        assert_eq!(r, 1_000_000.0);
    }

    proptest! {
        #[test]
        fn reach_stays_within_ceiling(imps in 0u64..=10_000_000_000, pen in 0.0f64..=1.0) {
            let ceiling = pen * 68_500_000.0;
            let r = saturating_reach(imps, ceiling);
            prop_assert!(r >= 0.0);
            prop_assert!(r <= ceiling);
        }

        #[test]
        fn reach_is_monotonic_in_impressions(a in 0u64..1_000_000_000, b in 0u64..1_000_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(saturating_reach(lo, 5_000_000.0) <= saturating_reach(hi, 5_000_000.0) + 1e-6);
        }

        #[test]
        fn contributions_sum_to_hundred(imps in proptest::collection::vec(1u64..500_000_000, 1..8)) {
            let mut p = plan();
            for (i, n) in imps.iter().enumerate() {
                p = p.with_channel(ch(&format!("C{i}")), *n, Some(0.6), None);
            }
            let out = estimate_channel_reach(&p);
            let total: f64 = out.channel_contributions.values().sum();
            prop_assert!((total - 100.0).abs() < 1e-9);
        }
    }
}
