// crates/rf_cli/src/args.rs
//
// Offline CLI argument surface.
//
// - Exactly one of: --plan <file>  XOR  --demo
// - No networked paths (reject any scheme:// like http/https/file)
// - Output: --out dir, --render [json|html]* (requires --out)
// - --max-frequency overrides the policy's ladder depth (0..=64)
// - --validate-only loads and validates without running the stages

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser};

/// Parsed CLI arguments.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "rf",
    version,
    disable_help_subcommand = true,
    about = "Offline, deterministic reach & frequency estimator for multi-channel media plans"
)]
#[command(group(ArgGroup::new("input").required(true).args(["plan", "demo"])))]
pub struct Args {
    // --- Input selection ---
    /// Plan JSON file.
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Run the built-in 8-channel demo plan.
    #[arg(long)]
    pub demo: bool,

    // --- Overrides ---
    /// Highest effective-reach threshold to report (k+). Overrides the plan's policy.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=64))]
    pub max_frequency: Option<u32>,

    // --- Output & rendering ---
    /// Directory for result.json, run_record.json and rendered reports.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Renderer(s) to emit into --out (json, html), each at most once.
    #[arg(long, value_parser = ["json", "html"], num_args = 1..=2, requires = "out")]
    pub render: Vec<String>,

    // --- Control ---
    /// Load and validate the plan only; do not run the engine.
    #[arg(long)]
    pub validate_only: bool,

    /// Only errors on stderr; no status lines.
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug-level diagnostics on stderr.
    #[arg(long)]
    pub verbose: bool,
}

/// Errors surfaced by argument validation beyond what clap checks.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    DuplicateRender(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local (no scheme): {p}"),
            CliError::DuplicateRender(r) => write!(f, "renderer requested twice: {r}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    rf_io::looks_like_url_strict(&lower)
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    let s = p.to_string_lossy();
    if has_scheme(&s) {
        return Err(CliError::NonLocalPath(s.into_owned()));
    }
    Ok(())
}

/// Entry point used by main.rs. Clap usage errors exit with code 2 on their own.
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

pub fn validate(args: Args) -> Result<Args, CliError> {
    for p in [args.plan.as_deref(), args.out.as_deref()].into_iter().flatten() {
        ensure_local_path(p)?;
    }
    let mut seen = BTreeSet::new();
    if let Some(dup) = args.render.iter().find(|r| !seen.insert(r.as_str())) {
        return Err(CliError::DuplicateRender(dup.clone()));
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("rf").chain(argv.iter().copied()))
    }

    #[test]
    fn plan_xor_demo() {
        assert!(parse(&["--demo"]).is_ok());
        assert!(parse(&["--plan", "p.json"]).is_ok());
        assert!(parse(&[]).is_err());
        assert!(parse(&["--demo", "--plan", "p.json"]).is_err());
    }

    #[test]
    fn max_frequency_is_bounded() {
        assert_eq!(parse(&["--demo", "--max-frequency", "64"]).unwrap().max_frequency, Some(64));
        assert!(parse(&["--demo", "--max-frequency", "65"]).is_err());
    }

    #[test]
    fn render_needs_out_and_known_names() {
        assert!(parse(&["--demo", "--render", "json"]).is_err());
        assert!(parse(&["--demo", "--out", "o", "--render", "pdf"]).is_err());
        let a = parse(&["--demo", "--out", "o", "--render", "json", "html"]).unwrap();
        assert_eq!(a.render, ["json", "html"]);
        let dup = parse(&["--demo", "--out", "o", "--render", "json", "json"]).unwrap();
        assert!(matches!(validate(dup), Err(CliError::DuplicateRender(_))));
    }

    #[test]
    fn duplicate_render_across_occurrences_is_rejected() {
        let a = parse(&["--demo", "--out", "o", "--render", "json", "--render", "json", "--render", "html"])
            .unwrap();
        assert_eq!(a.render.len(), 3);
        match validate(a) {
            Err(CliError::DuplicateRender(r)) => assert_eq!(r, "json"),
            other => panic!("expected duplicate renderer, got {other:?}"),
        }

        let ok = parse(&["--demo", "--out", "o", "--render", "html", "--render", "json"]).unwrap();
        assert!(validate(ok).is_ok());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(parse(&["--demo", "--quiet", "--verbose"]).is_err());
    }

    #[test]
    fn ensure_local_path_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file://C:/x.json")).is_err());
        assert!(ensure_local_path(Path::new("HTTPS://x/y.json")).is_err());
        assert!(ensure_local_path(Path::new(r"C:\local\file.json")).is_ok());
        assert!(ensure_local_path(Path::new("/tmp/plan.json")).is_ok());
    }
}
