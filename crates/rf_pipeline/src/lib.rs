//! rf_pipeline: deterministic pipeline surface (validate→channel reach→total reach→frequency→effective reach)
//! This crate stays I/O-free and delegates the stage math to `rf_algo`.
//!
//! The engine is immutable once constructed. Every run builds its own
//! `CalculationState`, so a single engine can be shared across threads and
//! two runs over the same plan produce identical records.

use rf_core::{policy::MAX_LADDER_DEPTH, EngineIdentity, EnginePolicy, PlanInput, ResultRecord};

pub mod state;
pub mod validate;

pub use state::{CalculationState, Stage};
pub use validate::{
    validate, EntityRef, Severity, ValidationError, ValidationIssue, ValidationReport,
};

/// Engine identifiers for this build (echoed in run records).
pub fn engine_identifiers() -> EngineIdentity {
    EngineIdentity {
        name: "rf_engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// A validated plan plus the policy it will be evaluated under.
#[derive(Debug, Clone)]
pub struct ReachFrequencyEngine {
    plan: PlanInput,
    policy: EnginePolicy,
    report: ValidationReport,
}

impl ReachFrequencyEngine {
    /// Validate `plan` under the default policy.
    pub fn new(plan: PlanInput) -> Result<Self, ValidationError> {
        Self::with_policy(plan, EnginePolicy::default())
    }

    /// Validate `plan` and `policy`; fails before any stage runs.
    pub fn with_policy(plan: PlanInput, policy: EnginePolicy) -> Result<Self, ValidationError> {
        let report = validate(&plan, &policy).into_result()?;
        for issue in report.warnings() {
            tracing::warn!(code = issue.code, "{issue}");
        }
        Ok(Self { plan, policy, report })
    }

    pub fn plan(&self) -> &PlanInput {
        &self.plan
    }

    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// Warnings found at construction (errors never get this far).
    pub fn validation_report(&self) -> &ValidationReport {
        &self.report
    }

    /// Run all four stages with the policy's ladder depth.
    pub fn run_all_calculations(&self) -> ResultRecord {
        self.run_with_max_frequency(self.policy.max_frequency)
    }

    /// Run all four stages with an explicit highest effective-reach threshold.
    ///
    /// Depths above the ladder cap are truncated to it.
    pub fn run_with_max_frequency(&self, max_frequency: u32) -> ResultRecord {
        let depth = if max_frequency > MAX_LADDER_DEPTH {
            tracing::warn!(requested = max_frequency, cap = MAX_LADDER_DEPTH, "ladder depth truncated");
            MAX_LADDER_DEPTH
        } else {
            max_frequency
        };

        let mut state = CalculationState::new(&self.plan, &self.policy);
        state
            .run_channel_reach()
            .run_total_reach()
            .run_frequency()
            .run_effective_reach(depth);
        let record = state.into_record();

        tracing::info!(
            final_reach = record.final_reach,
            final_reach_percent = record.final_reach_percent,
            average_frequency = record.average_frequency,
            "reach-frequency run complete"
        );
        record
    }
}

/// Convenience entry: validate and run once.
pub fn run(plan: PlanInput, policy: EnginePolicy) -> Result<ResultRecord, ValidationError> {
    Ok(ReachFrequencyEngine::with_policy(plan, policy)?.run_all_calculations())
}
