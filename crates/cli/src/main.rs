// bookrec CLI - batch bookings-vs-ledger reconciliation

mod detect;
mod exit_codes;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookrec")]
#[command(about = "Reconcile operational booking extracts against the MBR ledger")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation and write the gap report
    #[command(after_help = "\
Examples:
  bookrec run direct.xlsx pos.xlsx mbr.xlsx -o out/
  bookrec run --data-dir ./drop -o out/ --json
  bookrec run --data-dir ./drop --config recon.toml --keep-stage out/stage")]
    Run {
        /// Source files (any subset of the six roles, any order)
        files: Vec<PathBuf>,

        /// Also scan a directory for eligible source files
        #[arg(long, env = "BOOKREC_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Destination directory for the report artifact
        #[arg(long, short = 'o', default_value = ".", env = "BOOKREC_OUTPUT_DIR")]
        output_dir: PathBuf,

        /// TOML run configuration (threshold, tolerances, column aliases)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the comparison threshold
        #[arg(long, env = "BOOKREC_THRESHOLD")]
        threshold: Option<f64>,

        /// Print the success payload as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Copy staged pivot snapshots here before scratch cleanup
        #[arg(long, value_name = "DIR")]
        keep_stage: Option<PathBuf>,
    },

    /// Classify source files without running a reconciliation
    #[command(after_help = "\
Examples:
  bookrec detect drop/*.xlsx
  bookrec detect --data-dir ./drop")]
    Detect {
        files: Vec<PathBuf>,

        /// Also scan a directory for eligible source files
        #[arg(long, env = "BOOKREC_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },

    /// Validate a run configuration without executing
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn new(code: u8, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), hint: None }
    }

    fn with_hint(code: u8, message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self { code, message: message.into(), hint: Some(hint.into()) }
    }
}

fn long_version() -> String {
    format!("{} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_COMMIT_HASH"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { files, data_dir, output_dir, config, threshold, json, keep_stage } => {
            run::cmd_run(run::RunArgs {
                files,
                data_dir,
                output_dir,
                config,
                threshold,
                json,
                keep_stage,
            })
        }
        Commands::Detect { files, data_dir } => detect::cmd_detect(&files, data_dir.as_deref()),
        Commands::Validate { config } => run::cmd_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}
