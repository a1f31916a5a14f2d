//! `bookrec run` — load sources, drive the engine, write the artifact.

use std::path::{Path, PathBuf};

use serde::Serialize;

use bookrec_recon::model::RunOutcome;
use bookrec_recon::{report, ReconError, RunConfig};

use crate::exit_codes::{
    EXIT_LEDGER_COLUMNS, EXIT_NOTHING_TO_COMPARE, EXIT_NO_INPUT, EXIT_RUNTIME, EXIT_USAGE,
};
use crate::CliError;

pub struct RunArgs {
    pub files: Vec<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub threshold: Option<f64>,
    pub json: bool,
    pub keep_stage: Option<PathBuf>,
}

/// Success payload for machine callers: the artifact path plus the two gap
/// statistics the chat-bot wrapper reports.
#[derive(Serialize)]
struct RunPayload<'a> {
    output_file: String,
    sum_missing: f64,
    count_missing: usize,
    orders_compared: usize,
    run_at: &'a str,
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let result = execute(&args);
    if args.json {
        if let Err(ref err) = result {
            // Machine callers get a structured error object on stdout too.
            println!("{}", serde_json::json!({ "error": err.message }));
        }
    }
    result
}

fn execute(args: &RunArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref(), args.threshold)?;

    let paths = gather_inputs(&args.files, args.data_dir.as_deref())?;
    if paths.is_empty() {
        return Err(CliError::with_hint(
            EXIT_NO_INPUT,
            "no input files",
            "pass source files as arguments or use --data-dir",
        ));
    }

    let mut tables = Vec::new();
    for path in &paths {
        match bookrec_io::load::load_table(path) {
            Ok(table) => tables.push(table),
            Err(e) => eprintln!("warning: {e}; skipping"),
        }
    }
    if tables.is_empty() {
        return Err(CliError::new(EXIT_NO_INPUT, "no readable input files"));
    }

    let outcome = bookrec_recon::run(&config, tables).map_err(engine_error)?;
    let report = match outcome {
        RunOutcome::Report(report) => report,
        RunOutcome::NoLedger { warnings } => {
            print_warnings(&warnings);
            return Err(CliError::new(
                EXIT_NOTHING_TO_COMPARE,
                "no ledger (MBR) file detected; nothing to compare",
            ));
        }
        RunOutcome::NoOperationalData { warnings } => {
            print_warnings(&warnings);
            return Err(CliError::new(
                EXIT_NOTHING_TO_COMPARE,
                "no operational extract data; nothing to compare",
            ));
        }
    };
    print_warnings(&report.warnings);

    // Stage pivot snapshots. The scratch directory removes itself on every
    // exit path, including the error returns below.
    let stage = bookrec_io::stage::Stage::new().map_err(|e| CliError::new(EXIT_RUNTIME, e))?;
    stage
        .dump_pivot("vsb-pivot.csv", &report.vsb_pivot)
        .map_err(|e| CliError::new(EXIT_RUNTIME, e))?;
    stage
        .dump_pivot("mbr-pivot.csv", &report.mbr_pivot)
        .map_err(|e| CliError::new(EXIT_RUNTIME, e))?;

    let csv_text = report::render_csv(&report.rows, &config.columns.extra)
        .map_err(|e| CliError::new(EXIT_RUNTIME, e.to_string()))?;
    let output_file = bookrec_io::report::write_report(&args.output_dir, &csv_text)
        .map_err(|e| CliError::new(EXIT_RUNTIME, e))?;

    if let Some(ref keep) = args.keep_stage {
        stage.keep_into(keep).map_err(|e| CliError::new(EXIT_RUNTIME, e))?;
    }

    // Human summary to stderr; stdout stays machine-readable.
    let s = &report.summary;
    eprintln!(
        "{} order(s) above {}: {} matched, {} amount mismatch(es), {} missing in VSB ({} unaccounted)",
        s.total,
        report::format_currency(report.meta.threshold),
        s.matched,
        s.amount_mismatches,
        s.count_missing,
        report::format_currency(s.sum_missing),
    );
    eprintln!("wrote {}", output_file.display());

    if args.json {
        let payload = RunPayload {
            output_file: output_file.display().to_string(),
            sum_missing: s.sum_missing,
            count_missing: s.count_missing,
            orders_compared: s.total,
            run_at: &report.meta.run_at,
        };
        let json = serde_json::to_string_pretty(&payload)
            .map_err(|e| CliError::new(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    Ok(())
}

pub fn cmd_validate(config_path: &Path) -> Result<(), CliError> {
    let text = std::fs::read_to_string(config_path)
        .map_err(|e| CliError::new(EXIT_USAGE, format!("cannot read config: {e}")))?;
    match RunConfig::from_toml(&text) {
        Ok(config) => {
            eprintln!(
                "valid: threshold {}, tolerances {}/{}, {} order-id alias(es), {} amount alias(es)",
                config.threshold,
                config.tolerance.status,
                config.tolerance.rollup,
                config.columns.order_id.len(),
                config.columns.amount.len(),
            );
            Ok(())
        }
        Err(e) => Err(CliError::new(EXIT_USAGE, e.to_string())),
    }
}

fn load_config(path: Option<&Path>, threshold_override: Option<f64>) -> Result<RunConfig, CliError> {
    let mut config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .map_err(|e| CliError::new(EXIT_USAGE, format!("cannot read config: {e}")))?;
            RunConfig::from_toml(&text).map_err(|e| CliError::new(EXIT_USAGE, e.to_string()))?
        }
        None => RunConfig::default(),
    };
    if let Some(threshold) = threshold_override {
        config.threshold = threshold;
        config
            .validate()
            .map_err(|e| CliError::new(EXIT_USAGE, e.to_string()))?;
    }
    Ok(config)
}

/// Explicit paths first, then directory-scan hits in sorted order so the
/// last-file-wins role policy stays reproducible.
pub fn gather_inputs(files: &[PathBuf], data_dir: Option<&Path>) -> Result<Vec<PathBuf>, CliError> {
    let mut paths: Vec<PathBuf> = files.to_vec();
    if let Some(dir) = data_dir {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| CliError::new(EXIT_NO_INPUT, format!("cannot read {}: {e}", dir.display())))?;
        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && bookrec_io::load::eligible(p))
            .collect();
        found.sort();
        paths.extend(found);
    }
    Ok(paths)
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

fn engine_error(err: ReconError) -> CliError {
    let code = match err {
        ReconError::MissingColumn { .. } => EXIT_LEDGER_COLUMNS,
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_USAGE,
        ReconError::Render(_) => EXIT_RUNTIME,
    };
    CliError::new(code, err.to_string())
}
