// crates/rf_cli/src/main.rs
//
// Wires up exit codes, typed error mapping, tracing, and the run path:
// input (plan file | demo) → validate → stages → console report →
// optional artifacts and rendered reports.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Argument, plan-shape or domain validation failures.
    pub const VALIDATION: i32 = 2;
    /// Read/write/path/limit failures.
    pub const IO: i32 = 4;
    /// Report rendering failures.
    pub const RENDER: i32 = 5;
}

use std::fmt;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args};

use rf_core::{presets, EnginePolicy, ResultRecord};
use rf_io::artifacts::write_run_artifacts;
use rf_io::loader::{self, LoadedPlan};
use rf_io::{hasher, IoError};
use rf_pipeline::{engine_identifiers, ReachFrequencyEngine, ValidationError};
use rf_report::{build_model, render_text::render_text, ReportError, ReportFormat};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Plan JSON shape or domain validation failures
    Validation(String),
    /// I/O errors (read/write/path/limits)
    Io(String),
    /// Report build or render errors
    Render(String),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("rf: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_tracing(&args);

    let rc = match run_once(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("rf: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// stderr subscriber; `--verbose`/`--quiet` win over `RUST_LOG`, default `warn`.
fn init_tracing(args: &Args) {
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else if args.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
    }
}

/// Translate rf_io::IoError into MainError buckets.
fn map_rfio_err(e: IoError) -> MainError {
    match e {
        IoError::Json { pointer, msg } => MainError::Validation(format!("plan json {pointer}: {msg}")),
        IoError::Hash(m) => MainError::Io(format!("hash: {m}")),
        IoError::Read(e) => MainError::Io(format!("read: {e}")),
        IoError::Write(e) => MainError::Io(format!("write: {e}")),
        IoError::Path(m) => MainError::Io(format!("path: {m}")),
        IoError::Limit(m) => MainError::Io(format!("limit: {m}")),
    }
}

/// Every error issue on its own stderr line, then a one-line summary.
fn map_validation_err(e: ValidationError) -> MainError {
    for issue in e.report.errors() {
        eprintln!("rf: {issue}");
    }
    MainError::Validation(e.to_string())
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}

// ----------------------------- run path -----------------------------

fn load_input(args: &Args) -> Result<LoadedPlan, MainError> {
    let mut loaded = match &args.plan {
        Some(path) => loader::load_plan(path).map_err(map_rfio_err)?,
        None => {
            let plan = presets::demo_plan().map_err(|e| MainError::Validation(e.to_string()))?;
            let plan_sha256 = hasher::sha256_canonical(&plan).map_err(map_rfio_err)?;
            LoadedPlan { plan, policy: EnginePolicy::default(), policy_from_file: false, plan_sha256 }
        }
    };
    if let Some(k) = args.max_frequency {
        loaded.policy = loaded.policy.with_max_frequency(k);
    }
    Ok(loaded)
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let LoadedPlan { plan, policy, plan_sha256, .. } = load_input(args)?;
    let engine = ReachFrequencyEngine::with_policy(plan, policy).map_err(map_validation_err)?;

    if args.validate_only {
        if !args.quiet {
            let warnings = engine.validation_report().warnings().count();
            eprintln!("validate-only: plan OK ({warnings} warning(s))");
        }
        return Ok(());
    }

    let record = engine.run_all_calculations();
    let model = build_model(&record);
    print!("{}", render_text(&model).map_err(map_report_err)?);

    if let Some(out_dir) = &args.out {
        write_artifacts(out_dir, &plan_sha256, &record, engine.policy())?;
        maybe_render_reports(args, &model, out_dir)?;
        if !args.quiet {
            eprintln!("run: artifacts written to {}", out_dir.display());
        }
    }
    Ok(())
}

fn write_artifacts(
    out_dir: &Path,
    plan_sha256: &str,
    record: &ResultRecord,
    policy: &EnginePolicy,
) -> Result<(), MainError> {
    write_run_artifacts(out_dir, engine_identifiers(), plan_sha256, record, policy, policy.max_frequency)
        .map_err(map_rfio_err)?;
    Ok(())
}

fn maybe_render_reports(args: &Args, model: &rf_report::ReportModel, out_dir: &Path) -> Result<(), MainError> {
    for name in &args.render {
        let format = match name.as_str() {
            "json" => ReportFormat::Json,
            "html" => ReportFormat::Html,
            other => return Err(MainError::Render(format!("unknown renderer: {other}"))),
        };
        let body = rf_report::render(model, format).map_err(map_report_err)?;
        let path = out_dir.join(format.file_name());
        fs::write(&path, body).map_err(|e| MainError::Io(format!("write {}: {e}", path.display())))?;
    }
    Ok(())
}
