//! Calibration constants for the engine.
//!
//! These have no closed-form derivation; they are domain policy and are kept
//! configurable so they can be recalibrated without code changes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Efficiency applied to a channel with no explicit factor.
pub const DEFAULT_EFFICIENCY: f64 = 0.5;
/// Lower bound of the plausible average-frequency band.
pub const DEFAULT_FREQUENCY_FLOOR: f64 = 1.0;
/// Upper bound of the plausible average-frequency band.
pub const DEFAULT_FREQUENCY_CEILING: f64 = 20.0;
/// Highest effective-reach threshold (`2+ ..= 6+`).
pub const DEFAULT_MAX_FREQUENCY: u32 = 6;
/// Hard cap on the effective-reach ladder depth.
pub const MAX_LADDER_DEPTH: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EnginePolicy {
    /// Efficiency for channels missing from `efficiency_factors`, and the
    /// weighted-efficiency fallback when total channel reach is zero.
    pub default_efficiency: f64,
    pub frequency_floor: f64,
    pub frequency_ceiling: f64,
    /// Effective reach is reported for thresholds `2..=max_frequency`.
    pub max_frequency: u32,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            default_efficiency: DEFAULT_EFFICIENCY,
            frequency_floor: DEFAULT_FREQUENCY_FLOOR,
            frequency_ceiling: DEFAULT_FREQUENCY_CEILING,
            max_frequency: DEFAULT_MAX_FREQUENCY,
        }
    }
}

impl EnginePolicy {
    /// Same policy with a different ladder depth.
    pub fn with_max_frequency(mut self, max_frequency: u32) -> Self {
        self.max_frequency = max_frequency;
        self
    }

    /// Clamp a raw frequency into `[frequency_floor, frequency_ceiling]`.
    #[inline]
    pub fn clamp_frequency(&self, raw: f64) -> f64 {
        raw.max(self.frequency_floor).min(self.frequency_ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_constants() {
        let p = EnginePolicy::default();
        assert_eq!(p.default_efficiency, 0.5);
        assert_eq!((p.frequency_floor, p.frequency_ceiling), (1.0, 20.0));
        assert_eq!(p.max_frequency, 6);
    }

    #[test]
    fn clamps_into_band() {
        let p = EnginePolicy::default();
        assert_eq!(p.clamp_frequency(0.2), 1.0);
        assert_eq!(p.clamp_frequency(7.5), 7.5);
        assert_eq!(p.clamp_frequency(250.0), 20.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_policy_takes_defaults() {
        let p: EnginePolicy = serde_json::from_str(r#"{"max_frequency": 10}"#).unwrap();
        assert_eq!(p.max_frequency, 10);
        assert_eq!(p.default_efficiency, 0.5);
        assert!(serde_json::from_str::<EnginePolicy>(r#"{"bogus": 1}"#).is_err());
    }
}
