//! Per-run calculation state.
//!
//! A `CalculationState` is created fresh for every run, filled stage by stage,
//! and consumed into a `ResultRecord`. It is never stored on the engine, so
//! concurrent runs on a shared engine cannot interleave writes.

use rf_algo::{
    average_frequency, blend_total_reach, effective_reach_ladder, estimate_channel_reach,
    percent_of, ChannelReachOut, LadderInputs, TotalReachOut,
};
use rf_core::{EffectiveReach, EnginePolicy, PlanInput, ResultRecord};

/// Stage an in-flight run has completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Fresh,
    ChannelReach,
    TotalReach,
    Frequency,
    EffectiveReach,
}

#[derive(Clone, Debug)]
pub struct CalculationState<'a> {
    plan: &'a PlanInput,
    policy: &'a EnginePolicy,
    stage: Stage,
    channel: ChannelReachOut,
    total: TotalReachOut,
    average_frequency: f64,
    effective_reach: EffectiveReach,
}

impl<'a> CalculationState<'a> {
    pub fn new(plan: &'a PlanInput, policy: &'a EnginePolicy) -> Self {
        Self {
            plan,
            policy,
            stage: Stage::Fresh,
            channel: ChannelReachOut::default(),
            total: TotalReachOut::default(),
            average_frequency: 0.0,
            effective_reach: EffectiveReach::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn channel_reach(&self) -> &ChannelReachOut {
        &self.channel
    }

    pub fn total_reach(&self) -> &TotalReachOut {
        &self.total
    }

    pub fn average_frequency(&self) -> f64 {
        self.average_frequency
    }

    /// Stage 1: per-channel reach and contribution shares.
    pub fn run_channel_reach(&mut self) -> &mut Self {
        self.channel = estimate_channel_reach(self.plan);
        self.stage = Stage::ChannelReach;
        tracing::debug!(
            channels = self.channel.channel_reach.len(),
            raw_total_reach = self.channel.raw_total_reach,
            "channel reach estimated"
        );
        self
    }

    /// Stage 2: overlap, weighted efficiency, ceiling.
    pub fn run_total_reach(&mut self) -> &mut Self {
        debug_assert!(self.stage >= Stage::ChannelReach, "total reach before channel reach");
        self.total = blend_total_reach(self.plan, &self.channel.channel_reach, self.policy);
        self.stage = Stage::TotalReach;
        tracing::debug!(
            overlapped_reach = self.total.overlapped_reach,
            weighted_efficiency = self.total.weighted_efficiency,
            final_reach = self.total.final_reach,
            "total reach blended"
        );
        self
    }

    /// Stage 3: average frequency.
    pub fn run_frequency(&mut self) -> &mut Self {
        debug_assert!(self.stage >= Stage::TotalReach, "frequency before total reach");
        self.average_frequency =
            average_frequency(self.plan.total_impressions, self.total.final_reach, self.policy);
        self.stage = Stage::Frequency;
        tracing::debug!(average_frequency = self.average_frequency, "frequency computed");
        self
    }

    /// Stage 4: effective-reach ladder up to `max_frequency`.
    pub fn run_effective_reach(&mut self, max_frequency: u32) -> &mut Self {
        debug_assert!(self.stage >= Stage::Frequency, "effective reach before frequency");
        self.effective_reach = effective_reach_ladder(&LadderInputs {
            final_reach: self.total.final_reach,
            average_frequency: self.average_frequency,
            total_universe: self.plan.total_universe,
            max_reach_percent: self.plan.max_reach_percent,
            max_frequency,
        });
        self.stage = Stage::EffectiveReach;
        tracing::debug!(thresholds = self.effective_reach.len(), "effective reach ladder built");
        self
    }

    /// Extract the plain result record; the state is discarded.
    pub fn into_record(self) -> ResultRecord {
        let universe = self.plan.total_universe;
        let ChannelReachOut { channel_reach, channel_contributions, .. } = self.channel;
        let TotalReachOut { raw_total_reach, overlapped_reach, weighted_efficiency, final_reach } =
            self.total;

        ResultRecord {
            channel_reach,
            channel_contributions,
            raw_total_reach,
            overlapped_reach,
            weighted_efficiency,
            final_reach,
            average_frequency: self.average_frequency,
            effective_reach: self.effective_reach,
            raw_reach_percent: percent_of(raw_total_reach, universe),
            overlapped_reach_percent: percent_of(overlapped_reach, universe),
            final_reach_percent: percent_of(final_reach, universe),
        }
    }
}
