//! rf_core: Core types for the reach-frequency engine.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! workspace (`rf_algo`, `rf_pipeline`, `rf_io`, `rf_report`, `rf_cli`).
//!
//! - Channel names: `ChannelName`, `ChannelMap<T>`
//! - Plan input record and its hard bounds: `PlanInput`, `bounds`
//! - Calibration constants: `EnginePolicy`
//! - Output record: `ResultRecord`, `Threshold`, `EffectiveReach`
//! - Engine identity echoed in run records: `EngineIdentity`
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidChannelName,
        InvalidThreshold,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidChannelName => write!(f, "invalid channel name"),
                CoreError::InvalidThreshold => write!(f, "invalid threshold (expected \"<k>+\")"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod bounds {
    //! Hard input bounds enforced before any stage runs.

    use core::ops::RangeInclusive;

    /// Smallest population a plan may target.
    pub const MIN_TOTAL_UNIVERSE: u64 = 1_000_000;
    /// Smallest total impression volume a plan may deliver.
    pub const MIN_TOTAL_IMPRESSIONS: u64 = 10_000;
    /// Allowed `max_reach_percent` values.
    pub const MAX_REACH_PERCENT_RANGE: RangeInclusive<f64> = 0.0..=99.8;
    /// Allowed `global_overlap_factor` values.
    pub const OVERLAP_FACTOR_RANGE: RangeInclusive<f64> = 0.35..=0.6;
    /// Domain of per-channel penetration and efficiency values.
    pub const UNIT_INTERVAL: RangeInclusive<f64> = 0.0..=1.0;

    /// `true` iff `v` is finite and inside `range`.
    #[inline]
    pub fn within(range: &RangeInclusive<f64>, v: f64) -> bool {
        v.is_finite() && range.contains(&v)
    }
}

pub mod channel;
pub mod engine;
pub mod plan;
pub mod policy;
pub mod presets;
pub mod result;

pub use channel::{channel_map, ChannelMap, ChannelName};
pub use engine::EngineIdentity;
pub use errors::CoreError;
pub use plan::PlanInput;
pub use policy::EnginePolicy;
pub use result::{EffectiveReach, ResultRecord, Threshold};
