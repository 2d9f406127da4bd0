//! Trade journal CLI: analyze journal files and generate sample journals.
//!
//! Commands:
//! - `analyze`: run the streak analyzer over a JSON or CSV journal
//! - `sample`: write a deterministic synthetic journal as JSON

mod loader;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use loader::{load_journal, JournalFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tradejournal_core::sample::sample_journal;
use tradejournal_core::{Analyzer, AnalyzerConfig};

#[derive(Parser)]
#[command(
    name = "tradejournal",
    about = "Trade journal streak, transition and insight analysis"
)]
struct Cli {
    /// Log skipped records and loader details to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a journal file.
    Analyze {
        /// Journal file (.json or .csv).
        path: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Input format, when the extension doesn't say.
        #[arg(long, value_enum)]
        input_format: Option<JournalFormat>,

        /// TOML file overriding insight thresholds.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print JSON output.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Generate a synthetic journal.
    Sample {
        /// Number of trades.
        #[arg(long, default_value_t = 100)]
        count: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Probability that a trade is a win (0.0 to 1.0).
        #[arg(long, default_value_t = 0.55)]
        win_probability: f64,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            path,
            format,
            input_format,
            config,
            pretty,
        } => run_analyze(path, format, input_format, config, pretty),
        Commands::Sample {
            count,
            seed,
            win_probability,
            output,
        } => run_sample(count, seed, win_probability, output),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(
    path: PathBuf,
    format: OutputFormat,
    input_format: Option<JournalFormat>,
    config_path: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let config = match config_path {
        Some(p) => AnalyzerConfig::from_file(&p)?,
        None => AnalyzerConfig::default(),
    };
    let trades = load_journal(&path, input_format)
        .with_context(|| format!("loading {}", path.display()))?;

    let result = Analyzer::new(config).analyze(&trades);
    if !result.skipped.is_empty() {
        tracing::warn!(
            skipped = result.skipped.len(),
            "some journal records were malformed and left out"
        );
    }

    match format {
        OutputFormat::Text => print!("{}", render::render_text(&result)),
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{json}");
        }
    }
    Ok(())
}

fn run_sample(
    count: usize,
    seed: u64,
    win_probability: f64,
    output: Option<PathBuf>,
) -> Result<()> {
    if !(0.0..=1.0).contains(&win_probability) {
        bail!("--win-probability must be between 0 and 1, got {win_probability}");
    }
    let trades = sample_journal(count, seed, win_probability);
    let json = serde_json::to_string_pretty(&trades)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {count} trades to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
