//! Run artifacts: `result.json` (canonical `ResultRecord`) and
//! `run_record.json` (engine identity, input/output digests, policy).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use rf_core::{EngineIdentity, EnginePolicy, ResultRecord};

use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
use crate::{hasher, IoError, IoResult};

pub const RESULT_FILE: &str = "result.json";
pub const RUN_RECORD_FILE: &str = "run_record.json";

/// Provenance for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub engine: EngineIdentity,
    pub plan_sha256: String,
    /// Digest of the exact `result.json` bytes.
    pub result_sha256: String,
    pub policy: EnginePolicy,
    /// Highest threshold actually evaluated (after CLI override and cap).
    pub max_frequency: u32,
}

/// Paths written by `write_run_artifacts`.
#[derive(Debug, Clone)]
pub struct WrittenArtifacts {
    pub result_path: PathBuf,
    pub run_record_path: PathBuf,
    pub run_record: RunRecord,
}

pub fn build_run_record(
    engine: EngineIdentity,
    plan_sha256: &str,
    result: &ResultRecord,
    policy: &EnginePolicy,
    max_frequency: u32,
) -> IoResult<RunRecord> {
    if !hasher::is_sha256_hex(plan_sha256) {
        return Err(IoError::Hash(format!("plan digest is not 64-hex: {plan_sha256}")));
    }
    let result_sha256 = hasher::sha256_hex(&to_canonical_bytes(result)?);
    Ok(RunRecord {
        engine,
        plan_sha256: plan_sha256.to_string(),
        result_sha256,
        policy: *policy,
        max_frequency,
    })
}

/// Write both artifacts into `out_dir` (created if missing).
pub fn write_run_artifacts(
    out_dir: &Path,
    engine: EngineIdentity,
    plan_sha256: &str,
    result: &ResultRecord,
    policy: &EnginePolicy,
    max_frequency: u32,
) -> IoResult<WrittenArtifacts> {
    if crate::looks_like_url_strict(&out_dir.to_string_lossy()) {
        return Err(IoError::Path(format!("output must be a local directory: {}", out_dir.display())));
    }
    std::fs::create_dir_all(out_dir).map_err(IoError::Write)?;

    let run_record = build_run_record(engine, plan_sha256, result, policy, max_frequency)?;
    let result_path = out_dir.join(RESULT_FILE);
    let run_record_path = out_dir.join(RUN_RECORD_FILE);

    write_canonical_file(result, &result_path)?;
    write_canonical_file(&run_record, &run_record_path)?;
    tracing::info!(
        result = %result_path.display(),
        result_sha256 = %run_record.result_sha256,
        "artifacts written"
    );

    Ok(WrittenArtifacts { result_path, run_record_path, run_record })
}
