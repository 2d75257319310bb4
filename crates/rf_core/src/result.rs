//! Output record of one engine run.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::channel::ChannelMap;
use crate::errors::CoreError;

/// Effective-reach threshold `k`, rendered as `"k+"` (reached at least k times).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Threshold(pub u32);

impl Threshold {
    pub fn get(self) -> u32 { self.0 }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+", self.0)
    }
}

impl FromStr for Threshold {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_suffix('+').ok_or(CoreError::InvalidThreshold)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidThreshold);
        }
        digits.parse::<u32>().map(Threshold).map_err(|_| CoreError::InvalidThreshold)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Threshold {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Threshold {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// `"k+"` → percent of universe reached at least k times, ordered by k.
pub type EffectiveReach = BTreeMap<Threshold, f64>;

/// Plain result of one calculation. Holds no references into engine state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultRecord {
    /// Estimated unique reach per channel (individuals).
    pub channel_reach: ChannelMap<f64>,
    /// Each channel's % share of raw (pre-overlap) reach.
    pub channel_contributions: ChannelMap<f64>,
    pub raw_total_reach: f64,
    pub overlapped_reach: f64,
    /// Reach-weighted blend of channel efficiencies applied after overlap.
    pub weighted_efficiency: f64,
    pub final_reach: f64,
    pub average_frequency: f64,
    pub effective_reach: EffectiveReach,
    pub raw_reach_percent: f64,
    pub overlapped_reach_percent: f64,
    pub final_reach_percent: f64,
}

impl ResultRecord {
    /// Effective reach at threshold `k`, if the ladder goes that deep.
    pub fn effective_reach_at(&self, k: u32) -> Option<f64> {
        self.effective_reach.get(&Threshold(k)).copied()
    }

    /// Sum of all channel contribution shares (100 when any reach exists, else 0).
    pub fn contributions_total(&self) -> f64 {
        self.channel_contributions.values().sum()
    }
}
