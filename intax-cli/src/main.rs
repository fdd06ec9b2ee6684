use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use intax_cli::app::{self, OutputFormat};
use intax_core::Regime;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income-tax calculator: old vs new regime.
///
/// Uses the built-in FY 2025-26 rule set unless `--rules` and `--brackets`
/// point at a replacement.
#[derive(Debug, Parser)]
#[command(name = "intax", version)]
struct Cli {
    /// TOML file with the tax year, cess rate, deductions and rebates.
    #[arg(long, global = true, requires = "brackets")]
    rules: Option<PathBuf>,

    /// CSV file with `regime,min_income,max_income,rate` rows.
    #[arg(long, global = true, requires = "rules")]
    brackets: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute tax under one regime.
    Compute {
        /// Annual gross income (CTC); `15,00,000` style separators are allowed.
        #[arg(long, allow_hyphen_values = true)]
        income: String,

        /// `old` or `new`.
        #[arg(long)]
        regime: Regime,
    },

    /// Compute both regimes and recommend the cheaper one.
    Compare {
        #[arg(long, allow_hyphen_values = true)]
        income: String,
    },

    /// Process a CSV of `annual_ctc,regime` rows in file order.
    Batch {
        #[arg(long)]
        file: PathBuf,

        /// Compare both regimes for every row; the regime column is ignored.
        #[arg(long)]
        compare: bool,
    },

    /// Show the active rule set.
    Rules {
        /// Also export it as `rules.toml` + `brackets.csv` into this directory.
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
/// * Writes to stderr so stdout carries only the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    let config = app::load_rules(cli.rules.as_deref(), cli.brackets.as_deref())?;

    let output = match cli.command {
        Command::Compute { income, regime } => app::compute(&config, &income, regime, cli.format)?,
        Command::Compare { income } => app::compare(&config, &income, cli.format)?,
        Command::Batch { file, compare } => app::batch(&config, &file, compare, cli.format)?,
        Command::Rules { write } => app::rules(&config, write.as_deref(), cli.format)?,
    };
    println!("{output}");

    Ok(())
}
