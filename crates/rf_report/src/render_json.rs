//! render_json.rs: report JSON renderer.
//!
//! Sections are emitted as an array so their order survives regardless of
//! `serde_json` map ordering: summary → contributions → effective_reach.

use serde_json::{json, Map as JsonMap, Value};

use crate::{ContributionRow, LadderRow, ReportError, ReportModel, SummaryBlock};

pub fn render_json(m: &ReportModel) -> Result<String, ReportError> {
    let root = report_value(m);
    serde_json::to_string_pretty(&root).map_err(|e| ReportError::Serialize(e.to_string()))
}

/// The report as a JSON value.
pub fn report_value(m: &ReportModel) -> Value {
    json!({
        "sections": [
            section("summary", summary_json(&m.summary)),
            section("contributions", Value::Array(m.contributions.iter().map(contribution_json).collect())),
            section("effective_reach", Value::Array(m.ladder.iter().map(ladder_json).collect())),
        ]
    })
}

/* ----------------------------- sections ----------------------------- */

fn section(id: &str, body: Value) -> Value {
    let mut o = JsonMap::new();
    o.insert("id".into(), Value::String(id.into()));
    o.insert("body".into(), body);
    Value::Object(o)
}

fn summary_json(s: &SummaryBlock) -> Value {
    json!({
        "raw_reach": s.raw_reach_pct_1dp,
        "overlapped_reach": s.overlapped_reach_pct_1dp,
        "final_reach": s.final_reach_pct_1dp,
        "final_reach_individuals": s.final_reach_individuals,
        "average_frequency": s.average_frequency_1dp,
    })
}

fn contribution_json(r: &ContributionRow) -> Value {
    json!({
        "channel": r.channel,
        "reach_individuals": r.reach_individuals,
        "contribution": r.share_pct_1dp,
    })
}

fn ladder_json(r: &LadderRow) -> Value {
    json!({ "threshold": r.threshold, "reach": r.reach_pct_1dp })
}
