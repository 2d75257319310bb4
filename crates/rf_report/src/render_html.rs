// crates/rf_report/src/render_html.rs
//
// Deterministic, offline HTML renderer: one self-contained page, inline CSS,
// no scripts or external assets. Channel names are HTML-escaped.

use std::fmt::Write as _;

use crate::{ReportError, ReportModel};

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;color:#222}\
table{border-collapse:collapse;margin-bottom:1.5rem}\
th,td{border:1px solid #ccc;padding:.3rem .7rem;text-align:left}\
td.num{text-align:right}";

// ------------------------- helpers -------------------------

/// Escape text for HTML (minimal, deterministic).
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn row(out: &mut String, cells: &[&str]) -> std::fmt::Result {
    out.push_str("<tr>");
    for (i, c) in cells.iter().enumerate() {
        if i == 0 {
            write!(out, "<td>{}</td>", esc(c))?;
        } else {
            write!(out, "<td class=\"num\">{}</td>", esc(c))?;
        }
    }
    out.push_str("</tr>\n");
    Ok(())
}

// ------------------------- page -------------------------

pub fn render_html(m: &ReportModel) -> Result<String, ReportError> {
    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Reach &amp; Frequency Report</title>\n");
    writeln!(out, "<style>{STYLE}</style>")?;
    out.push_str("</head>\n<body>\n<h1>Reach &amp; Frequency Report</h1>\n");

    // Summary
    let s = &m.summary;
    out.push_str("<section id=\"summary\">\n<h2>Reach Metrics</h2>\n<table>\n");
    row(&mut out, &["Raw Total Reach", &s.raw_reach_pct_1dp])?;
    row(&mut out, &["Overlapped Reach", &s.overlapped_reach_pct_1dp])?;
    row(&mut out, &["Final Reach", &s.final_reach_pct_1dp])?;
    row(&mut out, &["Final Reach (Individuals)", &s.final_reach_individuals])?;
    row(&mut out, &["Average Frequency", &s.average_frequency_1dp])?;
    out.push_str("</table>\n</section>\n");

    // Contributions
    out.push_str("<section id=\"contributions\">\n<h2>Channel Contributions</h2>\n<table>\n");
    out.push_str("<tr><th>Channel</th><th>Reach</th><th>Contribution</th></tr>\n");
    for r in &m.contributions {
        row(&mut out, &[&r.channel, &r.reach_individuals, &r.share_pct_1dp])?;
    }
    out.push_str("</table>\n</section>\n");

    // Ladder
    out.push_str("<section id=\"effective-reach\">\n<h2>Effective Reach</h2>\n<table>\n");
    out.push_str("<tr><th>Frequency</th><th>Reach</th></tr>\n");
    for r in &m.ladder {
        row(&mut out, &[&r.threshold, &r.reach_pct_1dp])?;
    }
    out.push_str("</table>\n</section>\n</body>\n</html>\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{build_model, fixtures};

    #[test]
    fn escapes_channel_names() {
        let html = render_html(&build_model(&fixtures::record())).unwrap();
        assert!(html.contains("<td>Music &lt;Live&gt;</td>"));
        assert!(!html.contains("Music <Live>"));
    }

    #[test]
    fn sections_in_fixed_order_and_self_contained() {
        let html = render_html(&build_model(&fixtures::record())).unwrap();
        let a = html.find("id=\"summary\"").unwrap();
        let b = html.find("id=\"contributions\"").unwrap();
        let c = html.find("id=\"effective-reach\"").unwrap();
        assert!(a < b && b < c);
        assert!(!html.contains("<script"));
        assert!(!html.contains("http"));
        assert!(html.contains("<td>10+</td><td class=\"num\">10.0%</td>"));
    }
}
