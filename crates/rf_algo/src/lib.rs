// crates/rf_algo/src/lib.rs
//! Stage functions of the reach-frequency pipeline.
//!
//! Every stage is a pure function from the plan (and the previous stage's
//! output) to a typed output. No I/O, no logging, no shared state; the
//! orchestration and per-run state live in `rf_pipeline`.
//!
//! Order is fixed: channel reach → total reach → frequency → effective reach.

#![forbid(unsafe_code)]

pub use rf_core::{ChannelMap, ChannelName, EffectiveReach, EnginePolicy, PlanInput, Threshold};

pub mod channel_reach;
pub mod effective_reach;
pub mod frequency;
pub mod total_reach;

pub use channel_reach::{estimate_channel_reach, saturating_reach, ChannelReachOut};
pub use effective_reach::{effective_reach_ladder, LadderInputs};
pub use frequency::average_frequency;
pub use total_reach::{blend_total_reach, weighted_efficiency, TotalReachOut};

/// `count` as a percentage of `universe`; 0 for an empty universe.
#[inline]
pub fn percent_of(count: f64, universe: u64) -> f64 {
    if universe == 0 {
        return 0.0;
    }
    count / universe as f64 * 100.0
}
