//! crates/rf_pipeline/src/validate.rs
//! Input validation before any stage runs.
//! Deterministic output; collects every finding instead of stopping at the first.
//!
//! Errors block the run (`ValidationError`); warnings are logged and the run
//! proceeds (e.g. a channel with impressions but no penetration is excluded
//! from reach, which is legal but worth surfacing).

use std::fmt;

use rf_core::{
    bounds::{self, within},
    policy::MAX_LADDER_DEPTH,
    ChannelName, EnginePolicy, PlanInput,
};
use thiserror::Error;

/// Issue severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

/// Where the issue occurred. Ordered Plan < Channel < Policy for stable sorting.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntityRef {
    Plan(&'static str),
    Channel(ChannelName),
    Policy(&'static str),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Plan(field) => write!(f, "plan.{field}"),
            EntityRef::Channel(c) => write!(f, "channel \"{c}\""),
            EntityRef::Policy(field) => write!(f, "policy.{field}"),
        }
    }
}

/// One validation finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub where_: EntityRef,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.where_, self.message)
    }
}

/// Deterministic report: pass = (no Error); ordering of issues is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// `Ok(self)` when no Error-severity issue exists.
    pub fn into_result(self) -> Result<ValidationReport, ValidationError> {
        if self.pass { Ok(self) } else { Err(ValidationError { report: self }) }
    }
}

/// Raised by the engine constructor when the plan (or policy) is out of bounds.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid plan: {}", error_summary(.report))]
pub struct ValidationError {
    pub report: ValidationReport,
}

impl ValidationError {
    /// Codes of the blocking issues, in report order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.report.errors().map(|i| i.code).collect()
    }
}

fn error_summary(report: &ValidationReport) -> String {
    let parts: Vec<String> = report.errors().map(ToString::to_string).collect();
    parts.join("; ")
}

/// Top-level entry point.
pub fn validate(plan: &PlanInput, policy: &EnginePolicy) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    // A) Scalar bounds
    issues.extend(check_plan_scalars(plan));

    // B) Per-channel domains and coverage
    issues.extend(check_channel_rates(plan));
    issues.extend(check_channel_coverage(plan));

    // C) Calibration policy
    issues.extend(check_policy(policy));

    sort_issues_stably(&mut issues);

    ValidationReport {
        pass: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}

// ------------------------------------------------------------------------------------------------
// Checks
// ------------------------------------------------------------------------------------------------

fn error(code: &'static str, where_: EntityRef, message: String) -> ValidationIssue {
    ValidationIssue { severity: Severity::Error, code, message, where_ }
}

fn warning(code: &'static str, where_: EntityRef, message: String) -> ValidationIssue {
    ValidationIssue { severity: Severity::Warning, code, message, where_ }
}

fn check_plan_scalars(plan: &PlanInput) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if plan.total_universe < bounds::MIN_TOTAL_UNIVERSE {
        issues.push(error(
            "Plan.UniverseTooSmall",
            EntityRef::Plan("total_universe"),
            format!(
                "total universe must be at least {} (got {})",
                bounds::MIN_TOTAL_UNIVERSE,
                plan.total_universe
            ),
        ));
    }

    if plan.total_impressions < bounds::MIN_TOTAL_IMPRESSIONS {
        issues.push(error(
            "Plan.ImpressionsTooFew",
            EntityRef::Plan("total_impressions"),
            format!(
                "total impressions must be at least {} (got {})",
                bounds::MIN_TOTAL_IMPRESSIONS,
                plan.total_impressions
            ),
        ));
    }

    if !within(&bounds::MAX_REACH_PERCENT_RANGE, plan.max_reach_percent) {
        issues.push(error(
            "Plan.MaxReachOutOfRange",
            EntityRef::Plan("max_reach_percent"),
            format!(
                "maximum reach percentage must be between {} and {} (got {})",
                bounds::MAX_REACH_PERCENT_RANGE.start(),
                bounds::MAX_REACH_PERCENT_RANGE.end(),
                plan.max_reach_percent
            ),
        ));
    }

    if !within(&bounds::OVERLAP_FACTOR_RANGE, plan.global_overlap_factor) {
        issues.push(error(
            "Plan.OverlapOutOfRange",
            EntityRef::Plan("global_overlap_factor"),
            format!(
                "global overlap factor must be between {} and {} (got {})",
                bounds::OVERLAP_FACTOR_RANGE.start(),
                bounds::OVERLAP_FACTOR_RANGE.end(),
                plan.global_overlap_factor
            ),
        ));
    }

    issues
}

/// Penetration and efficiency are shares of the universe: finite, in [0, 1].
fn check_channel_rates(plan: &PlanInput) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (channel, &p) in &plan.channel_penetration {
        if !within(&bounds::UNIT_INTERVAL, p) {
            issues.push(error(
                "Channel.PenetrationOutOfRange",
                EntityRef::Channel(channel.clone()),
                format!("penetration must be between 0 and 1 (got {p})"),
            ));
        }
    }

    for (channel, &e) in &plan.efficiency_factors {
        if !within(&bounds::UNIT_INTERVAL, e) {
            issues.push(error(
                "Channel.EfficiencyOutOfRange",
                EntityRef::Channel(channel.clone()),
                format!("efficiency factor must be between 0 and 1 (got {e})"),
            ));
        }
    }

    issues
}

/// Coverage gaps are legal; surface them as warnings.
fn check_channel_coverage(plan: &PlanInput) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = plan
        .channels_without_penetration()
        .map(|channel| {
            warning(
                "Channel.NoPenetration",
                EntityRef::Channel(channel.clone()),
                "no penetration data; channel is excluded from reach".to_string(),
            )
        })
        .collect();

    for channel in plan.efficiency_factors.keys() {
        if !plan.channel_impressions.contains_key(channel.as_str()) {
            issues.push(warning(
                "Channel.UnusedEfficiency",
                EntityRef::Channel(channel.clone()),
                "efficiency factor given for a channel with no impressions entry".to_string(),
            ));
        }
    }

    issues
}

fn check_policy(policy: &EnginePolicy) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !within(&bounds::UNIT_INTERVAL, policy.default_efficiency) {
        issues.push(error(
            "Policy.DefaultEfficiencyOutOfRange",
            EntityRef::Policy("default_efficiency"),
            format!("default efficiency must be between 0 and 1 (got {})", policy.default_efficiency),
        ));
    }

    let floor = policy.frequency_floor;
    let ceiling = policy.frequency_ceiling;
    if !(floor.is_finite() && ceiling.is_finite() && floor > 0.0 && floor <= ceiling) {
        issues.push(error(
            "Policy.FrequencyBandInvalid",
            EntityRef::Policy("frequency_floor"),
            format!("frequency band must satisfy 0 < floor <= ceiling (got [{floor}, {ceiling}])"),
        ));
    }

    if policy.max_frequency > MAX_LADDER_DEPTH {
        issues.push(error(
            "Policy.LadderTooDeep",
            EntityRef::Policy("max_frequency"),
            format!(
                "max frequency must be at most {MAX_LADDER_DEPTH} (got {})",
                policy.max_frequency
            ),
        ));
    }

    issues
}

// ------------------------------------------------------------------------------------------------
// Utilities
// ------------------------------------------------------------------------------------------------

/// Severity first (errors lead), then code, location and message.
fn sort_issues_stably(issues: &mut [ValidationIssue]) {
    issues.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.code.cmp(b.code))
            .then_with(|| a.where_.cmp(&b.where_))
            .then_with(|| a.message.cmp(&b.message))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(s: &str) -> ChannelName {
        s.parse().expect("channel name")
    }

    fn plan() -> PlanInput {
        PlanInput::new(10_000_000, 50_000_000, 90.0, 0.5)
            .with_channel(ch("A"), 20_000_000, Some(0.8), Some(0.7))
    }

    fn codes(r: &ValidationReport) -> Vec<&'static str> {
        r.issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn clean_plan_passes() {
        let r = validate(&plan(), &EnginePolicy::default());
        assert!(r.pass);
        assert!(r.issues.is_empty());
    }

    #[test]
    fn universe_boundary() {
        let mut p = plan();
        p.total_universe = 1_000_000;
        assert!(validate(&p, &EnginePolicy::default()).pass);
        p.total_universe = 999_999;
        let r = validate(&p, &EnginePolicy::default());
        assert!(!r.pass);
        assert_eq!(codes(&r), vec!["Plan.UniverseTooSmall"]);
    }

    #[test]
    fn overlap_boundary() {
        let mut p = plan();
        p.global_overlap_factor = 0.6;
        assert!(validate(&p, &EnginePolicy::default()).pass);
        p.global_overlap_factor = 0.61;
        assert_eq!(codes(&validate(&p, &EnginePolicy::default())), vec!["Plan.OverlapOutOfRange"]);
        p.global_overlap_factor = f64::NAN;
        assert!(!validate(&p, &EnginePolicy::default()).pass);
    }

    #[test]
    fn collects_every_scalar_error_in_stable_order() {
        let mut p = plan();
        p.total_universe = 10;
        p.total_impressions = 10;
        p.max_reach_percent = 99.9;
        p.global_overlap_factor = 0.1;
        let r = validate(&p, &EnginePolicy::default());
        assert_eq!(
            codes(&r),
            vec![
                "Plan.ImpressionsTooFew",
                "Plan.MaxReachOutOfRange",
                "Plan.OverlapOutOfRange",
                "Plan.UniverseTooSmall",
            ]
        );
    }

    #[test]
    fn missing_penetration_is_only_a_warning() {
        let p = plan().with_channel(ch("Radio"), 1_000, None, None);
        let r = validate(&p, &EnginePolicy::default());
        assert!(r.pass);
        assert_eq!(codes(&r), vec!["Channel.NoPenetration"]);
        assert_eq!(r.warnings().count(), 1);
    }

    #[test]
    fn rates_outside_unit_interval_are_errors() {
        let p = plan().with_channel(ch("B"), 1, Some(1.2), Some(-0.1));
        let r = validate(&p, &EnginePolicy::default());
        assert!(!r.pass);
        assert_eq!(codes(&r), vec!["Channel.EfficiencyOutOfRange", "Channel.PenetrationOutOfRange"]);
    }

    #[test]
    fn policy_domain_is_checked() {
        let bad = EnginePolicy {
            default_efficiency: 2.0,
            frequency_floor: 5.0,
            frequency_ceiling: 1.0,
            max_frequency: 1_000,
        };
        let r = validate(&plan(), &bad);
        assert_eq!(
            codes(&r),
            vec!["Policy.DefaultEfficiencyOutOfRange", "Policy.FrequencyBandInvalid", "Policy.LadderTooDeep"]
        );
    }

    #[test]
    fn error_display_lists_blocking_issues() {
        let mut p = plan();
        p.total_universe = 999_999;
        let err = validate(&p, &EnginePolicy::default()).into_result().unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("invalid plan: [Plan.UniverseTooSmall] plan.total_universe"));
        assert_eq!(err.codes(), vec!["Plan.UniverseTooSmall"]);
    }
}
