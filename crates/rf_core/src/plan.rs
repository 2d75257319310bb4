//! The plan input record: one media plan to evaluate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::channel::{ChannelMap, ChannelName};

/// Immutable plan description, constructed once per calculation.
///
/// Bounds (checked by the pipeline validator, not here):
/// - `total_universe >= 1_000_000`
/// - `total_impressions >= 10_000`
/// - `max_reach_percent` in `[0, 99.8]`
/// - `global_overlap_factor` in `[0.35, 0.6]`
/// - penetration and efficiency values in `[0, 1]`
///
/// A channel with impressions but no penetration entry is excluded from reach.
/// A channel with no efficiency entry falls back to the policy default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanInput {
    pub total_universe: u64,
    pub total_impressions: u64,
    pub max_reach_percent: f64,
    pub global_overlap_factor: f64,
    pub channel_impressions: ChannelMap<u64>,
    pub channel_penetration: ChannelMap<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub efficiency_factors: ChannelMap<f64>,
}

impl PlanInput {
    /// A plan with the four scalar inputs and no channels yet.
    pub fn new(
        total_universe: u64,
        total_impressions: u64,
        max_reach_percent: f64,
        global_overlap_factor: f64,
    ) -> Self {
        Self {
            total_universe,
            total_impressions,
            max_reach_percent,
            global_overlap_factor,
            channel_impressions: ChannelMap::new(),
            channel_penetration: ChannelMap::new(),
            efficiency_factors: ChannelMap::new(),
        }
    }

    /// Add (or replace) one channel's impressions, penetration and efficiency.
    pub fn with_channel(
        mut self,
        name: ChannelName,
        impressions: u64,
        penetration: Option<f64>,
        efficiency: Option<f64>,
    ) -> Self {
        if let Some(p) = penetration {
            self.channel_penetration.insert(name.clone(), p);
        }
        if let Some(e) = efficiency {
            self.efficiency_factors.insert(name.clone(), e);
        }
        self.channel_impressions.insert(name, impressions);
        self
    }

    /// Penetration for `channel`, if the plan carries one.
    pub fn penetration(&self, channel: &str) -> Option<f64> {
        self.channel_penetration.get(channel).copied()
    }

    /// Efficiency for `channel`, or `default` when absent.
    pub fn efficiency_or(&self, channel: &str, default: f64) -> f64 {
        self.efficiency_factors.get(channel).copied().unwrap_or(default)
    }

    /// Channels with impressions but no penetration entry (excluded from reach).
    pub fn channels_without_penetration(&self) -> impl Iterator<Item = &ChannelName> + '_ {
        self.channel_impressions
            .keys()
            .filter(move |c| !self.channel_penetration.contains_key(c.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(s: &str) -> ChannelName {
        s.parse().expect("channel name")
    }

    #[test]
    fn builder_fills_all_three_maps() {
        let plan = PlanInput::new(10_000_000, 50_000_000, 90.0, 0.5)
            .with_channel(ch("A"), 20_000_000, Some(0.8), Some(0.7))
            .with_channel(ch("B"), 5, None, None);

        assert_eq!(plan.channel_impressions.len(), 2);
        assert_eq!(plan.penetration("A"), Some(0.8));
        assert_eq!(plan.penetration("B"), None);
        assert_eq!(plan.efficiency_or("A", 0.5), 0.7);
        assert_eq!(plan.efficiency_or("B", 0.5), 0.5);
    }

    #[test]
    fn lists_channels_missing_penetration() {
        let plan = PlanInput::new(10_000_000, 50_000_000, 90.0, 0.5)
            .with_channel(ch("A"), 1, Some(0.8), None)
            .with_channel(ch("Radio"), 1, None, None);
        let missing: Vec<&str> = plan.channels_without_penetration().map(|c| c.as_str()).collect();
        assert_eq!(missing, vec!["Radio"]);
    }
}
