//! Loader: read a local plan file (JSON), reject unknown fields, and return a
//! typed `LoadedPlan` for the pipeline. No network I/O.
//!
//! Wire shape:
//! ```json
//! {
//!   "total_universe": 68500000,
//!   "total_impressions": 611065006,
//!   "max_reach_percent": 98.8,
//!   "global_overlap_factor": 0.5,
//!   "channel_impressions": { "CTV": 164905766 },
//!   "channel_penetration": { "CTV": 0.75 },
//!   "efficiency_factors":  { "CTV": 0.8 },
//!   "policy": { "max_frequency": 8 }
//! }
//! ```
//! `efficiency_factors` and `policy` are optional; a partial `policy` takes
//! defaults for the missing fields. Domain checks belong to the validator.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rf_core::{ChannelMap, EnginePolicy, PlanInput};

use crate::{hasher, looks_like_url_strict, IoError, IoResult};

/// Hard cap on plan file size.
pub const MAX_PLAN_BYTES: u64 = 8 * 1024 * 1024;

// ----------------------------- Wire-facing type -----------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanFile {
    total_universe: u64,
    total_impressions: u64,
    max_reach_percent: f64,
    global_overlap_factor: f64,
    channel_impressions: ChannelMap<u64>,
    channel_penetration: ChannelMap<f64>,
    #[serde(default)]
    efficiency_factors: ChannelMap<f64>,
    #[serde(default)]
    policy: Option<EnginePolicy>,
}

/// A parsed plan, the policy it carries, and the digest of the canonical plan.
#[derive(Debug, Clone)]
pub struct LoadedPlan {
    pub plan: PlanInput,
    pub policy: EnginePolicy,
    /// `policy` came from the file rather than defaults.
    pub policy_from_file: bool,
    pub plan_sha256: String,
}

// ----------------------------- Entry points -----------------------------

/// Read and parse a plan file from a local path.
pub fn load_plan(path: &Path) -> IoResult<LoadedPlan> {
    let shown = path.to_string_lossy();
    if looks_like_url_strict(&shown) {
        return Err(IoError::Path(format!("URLs are not accepted (offline only): {shown}")));
    }
    if !path.is_file() {
        return Err(IoError::Path(format!("not a file: {shown}")));
    }

    let f = File::open(path).map_err(IoError::Read)?;
    let len = f.metadata().map_err(IoError::Read)?.len();
    if len > MAX_PLAN_BYTES {
        return Err(IoError::Limit(format!("{shown} is {len} bytes (max {MAX_PLAN_BYTES})")));
    }

    let mut text = String::with_capacity(len as usize);
    f.take(MAX_PLAN_BYTES + 1).read_to_string(&mut text).map_err(IoError::Read)?;

    let loaded = parse_plan(&text)?;
    tracing::debug!(
        path = %shown,
        channels = loaded.plan.channel_impressions.len(),
        plan_sha256 = %loaded.plan_sha256,
        "plan loaded"
    );
    Ok(loaded)
}

/// Parse plan JSON text.
pub fn parse_plan(text: &str) -> IoResult<LoadedPlan> {
    let file: PlanFile = serde_json::from_str(text)?;
    let plan = PlanInput {
        total_universe: file.total_universe,
        total_impressions: file.total_impressions,
        max_reach_percent: file.max_reach_percent,
        global_overlap_factor: file.global_overlap_factor,
        channel_impressions: file.channel_impressions,
        channel_penetration: file.channel_penetration,
        efficiency_factors: file.efficiency_factors,
    };
    let plan_sha256 = hasher::sha256_canonical(&plan)?;
    let policy_from_file = file.policy.is_some();
    Ok(LoadedPlan {
        plan,
        policy: file.policy.unwrap_or_default(),
        policy_from_file,
        plan_sha256,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"{
        "total_universe": 10000000,
        "total_impressions": 50000000,
        "max_reach_percent": 90.0,
        "global_overlap_factor": 0.5,
        "channel_impressions": { "A": 20000000 },
        "channel_penetration": { "A": 0.8 },
        "efficiency_factors":  { "A": 0.7 }
    }"#;

    #[test]
    fn parses_minimal_plan_with_default_policy() {
        let loaded = parse_plan(PLAN).unwrap();
        assert_eq!(loaded.plan.total_universe, 10_000_000);
        assert_eq!(loaded.plan.channel_impressions["A"], 20_000_000);
        assert_eq!(loaded.policy, EnginePolicy::default());
        assert!(!loaded.policy_from_file);
        assert!(hasher::is_sha256_hex(&loaded.plan_sha256));
    }

    #[test]
    fn partial_policy_takes_defaults() {
        let text = PLAN.replacen('{', r#"{ "policy": { "max_frequency": 9 },"#, 1);
        let loaded = parse_plan(&text).unwrap();
        assert!(loaded.policy_from_file);
        assert_eq!(loaded.policy.max_frequency, 9);
        assert_eq!(loaded.policy.frequency_ceiling, EnginePolicy::default().frequency_ceiling);
    }

    #[test]
    fn efficiency_factors_are_optional() {
        let text = PLAN.replace(r#",
        "efficiency_factors":  { "A": 0.7 }"#, "");
        let loaded = parse_plan(&text).unwrap();
        assert!(loaded.plan.efficiency_factors.is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = PLAN.replacen('{', r#"{ "budget": 1,"#, 1);
        assert!(matches!(parse_plan(&text), Err(IoError::Json { .. })));

        let text = PLAN.replacen('{', r#"{ "policy": { "seed": 1 },"#, 1);
        assert!(matches!(parse_plan(&text), Err(IoError::Json { .. })));
    }

    #[test]
    fn negative_impressions_and_bad_names_are_rejected() {
        let text = PLAN.replace("\"A\": 20000000", "\"A\": -5");
        assert!(parse_plan(&text).is_err());
        let text = PLAN.replace("{ \"A\": 0.8 }", "{ \"\": 0.8 }");
        assert!(parse_plan(&text).is_err());
    }

    #[test]
    fn digest_ignores_formatting_and_key_order() {
        let a = parse_plan(PLAN).unwrap();
        let reordered = r#"{"global_overlap_factor":0.5,"max_reach_percent":90.0,
            "channel_penetration":{"A":0.8},"channel_impressions":{"A":20000000},
            "efficiency_factors":{"A":0.7},"total_impressions":50000000,"total_universe":10000000}"#;
        let b = parse_plan(reordered).unwrap();
        assert_eq!(a.plan_sha256, b.plan_sha256);
    }

    #[test]
    fn load_rejects_urls_and_missing_files() {
        assert!(matches!(load_plan(Path::new("https://example.org/p.json")), Err(IoError::Path(_))));
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_plan(&dir.path().join("absent.json")), Err(IoError::Path(_))));
    }

    #[test]
    fn load_reads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("plan.json");
        std::fs::write(&p, PLAN).unwrap();
        let loaded = load_plan(&p).unwrap();
        assert_eq!(loaded.plan_sha256, parse_plan(PLAN).unwrap().plan_sha256);
    }
}
