//! Plain-text console layout.

use std::fmt::Write as _;

use crate::{ReportError, ReportModel};

/// Three blocks, one line per item:
///
/// ```text
/// Channel Contributions:
/// CTV: 97.6%
///
/// Reach Metrics:
/// Raw Total Reach: 71.9%
/// ...
///
/// Effective Reach:
/// 2+: 25.5%
/// ```
pub fn render_text(m: &ReportModel) -> Result<String, ReportError> {
    let mut out = String::with_capacity(512);

    writeln!(out, "Channel Contributions:")?;
    for row in &m.contributions {
        writeln!(out, "{}: {}", row.channel, row.share_pct_1dp)?;
    }

    let s = &m.summary;
    writeln!(out)?;
    writeln!(out, "Reach Metrics:")?;
    writeln!(out, "Raw Total Reach: {}", s.raw_reach_pct_1dp)?;
    writeln!(out, "Overlapped Reach: {}", s.overlapped_reach_pct_1dp)?;
    writeln!(out, "Final Reach: {}", s.final_reach_pct_1dp)?;
    writeln!(out, "Final Reach (Individuals): {}", s.final_reach_individuals)?;
    writeln!(out, "Average Frequency: {}", s.average_frequency_1dp)?;

    writeln!(out)?;
    writeln!(out, "Effective Reach:")?;
    for row in &m.ladder {
        writeln!(out, "{}: {}", row.threshold, row.reach_pct_1dp)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{build_model, fixtures};

    #[test]
    fn console_layout() {
        let text = render_text(&build_model(&fixtures::record())).unwrap();
        let expected = "\
Channel Contributions:
CTV: 97.6%
Music <Live>: 2.4%

Reach Metrics:
Raw Total Reach: 71.9%
Overlapped Reach: 35.9%
Final Reach: 28.4%
Final Reach (Individuals): 19,447,479
Average Frequency: 9.0

Effective Reach:
2+: 25.5%
3+: 22.7%
10+: 10.0%
";
        assert_eq!(text, expected);
    }
}
