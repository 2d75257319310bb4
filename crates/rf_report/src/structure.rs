//! crates/rf_report/src/structure.rs
//! Pure report data model mapped from a `ResultRecord`.
//! No I/O and no recomputation; every display string is produced here.

use rf_core::ResultRecord;

use crate::format::{count_with_separators, one_decimal, percent_1dp};

// -------------------- Model root & sections (fixed order) --------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportModel {
    pub summary: SummaryBlock,
    pub contributions: Vec<ContributionRow>,
    pub ladder: Vec<LadderRow>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryBlock {
    pub raw_reach_pct_1dp: String,        // e.g. "309.7%"
    pub overlapped_reach_pct_1dp: String,
    pub final_reach_pct_1dp: String,
    pub final_reach_individuals: String,  // e.g. "67,678,000"
    pub average_frequency_1dp: String,    // e.g. "9.0"
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContributionRow {
    pub channel: String,
    pub reach_individuals: String,
    pub share_pct_1dp: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LadderRow {
    pub threshold: String,                // "k+"
    pub reach_pct_1dp: String,
}

/// Map a finished result into the presentation model.
///
/// Contribution rows follow the record's channel order; every channel in
/// `channel_contributions` gets a row, with reach `0` when it has no entry in
/// `channel_reach`.
pub fn build_model(rec: &ResultRecord) -> ReportModel {
    let summary = SummaryBlock {
        raw_reach_pct_1dp: percent_1dp(rec.raw_reach_percent),
        overlapped_reach_pct_1dp: percent_1dp(rec.overlapped_reach_percent),
        final_reach_pct_1dp: percent_1dp(rec.final_reach_percent),
        final_reach_individuals: count_with_separators(rec.final_reach),
        average_frequency_1dp: one_decimal(rec.average_frequency),
    };

    let contributions = rec
        .channel_contributions
        .iter()
        .map(|(name, share)| ContributionRow {
            channel: name.to_string(),
            reach_individuals: count_with_separators(
                rec.channel_reach.get(name).copied().unwrap_or(0.0),
            ),
            share_pct_1dp: percent_1dp(*share),
        })
        .collect();

    let ladder = rec
        .effective_reach
        .iter()
        .map(|(k, v)| LadderRow { threshold: k.to_string(), reach_pct_1dp: percent_1dp(*v) })
        .collect();

    ReportModel { summary, contributions, ladder }
}
