//! rf_report: presentation layer for reach-frequency results.
//!
//! Renderers read a finished `ResultRecord` only; nothing is recomputed.
//! All number formatting happens once, in `structure::build_model`, so every
//! renderer prints identical strings.
//!
//! Section order is fixed: summary → channel contributions → effective reach.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod format;
pub mod render_text;
pub mod structure;

#[cfg(feature = "render_html")]
pub mod render_html;
#[cfg(feature = "render_json")]
pub mod render_json;

pub use structure::{build_model, ContributionRow, LadderRow, ReportModel, SummaryBlock};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("renderer not available in this build: {0}")]
    RendererUnavailable(&'static str),

    #[error("serialize report: {0}")]
    Serialize(String),

    #[error("format report: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// File formats selectable at run time. The console layout is `render_text`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportFormat {
    Json,
    Html,
}

impl ReportFormat {
    /// File name used when a report is written next to the run artifacts.
    pub fn file_name(self) -> &'static str {
        match self {
            ReportFormat::Json => "report.json",
            ReportFormat::Html => "report.html",
        }
    }
}

/// Render `model` in `format`. Disabled renderers yield `RendererUnavailable`.
pub fn render(model: &ReportModel, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Json => {
            #[cfg(feature = "render_json")]
            {
                render_json::render_json(model)
            }
            #[cfg(not(feature = "render_json"))]
            {
                Err(ReportError::RendererUnavailable("json"))
            }
        }
        ReportFormat::Html => {
            #[cfg(feature = "render_html")]
            {
                render_html::render_html(model)
            }
            #[cfg(not(feature = "render_html"))]
            {
                Err(ReportError::RendererUnavailable("html"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_reaches_file_renderers() {
        let m = build_model(&structure::fixtures::record());
        #[cfg(feature = "render_html")]
        assert!(render(&m, ReportFormat::Html).unwrap().starts_with("<!DOCTYPE html>"));
        #[cfg(feature = "render_json")]
        assert!(render(&m, ReportFormat::Json).unwrap().contains("\"sections\""));
        assert_eq!(ReportFormat::Html.file_name(), "report.html");
        assert_eq!(ReportFormat::Json.file_name(), "report.json");
    }
}
