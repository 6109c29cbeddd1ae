//! Command-line entry point: reads JSON-lines records, writes enriched records.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use holdings_parser::assembler::RecordAssembler;
use holdings_parser::batch::BatchProcessor;
use holdings_parser::check_in::{CheckInCardSource, CheckInCardTable, NoCheckInCards};
use holdings_parser::config::Settings;
use holdings_parser::location::LocationTable;
use holdings_parser::logging;

/// Render serial holdings and attach locations and check-in cards to catalog records.
#[derive(Parser)]
#[command(name = "holdings-parser", version, about)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the locations document from config.
    #[arg(long)]
    locations: Option<PathBuf>,

    /// Override the check-in card document from config.
    #[arg(long)]
    check_in_cards: Option<PathBuf>,

    /// Newline-delimited JSON records; stdin when omitted.
    input: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("unable to load settings")?;
    logging::init(cli.verbose, &settings.log_level);

    let locations_path = cli
        .locations
        .or(settings.locations_path)
        .context("no locations document configured (--locations or HOLDINGS_LOCATIONS_PATH)")?;
    let locations = LocationTable::from_path(&locations_path)?;

    let check_in_cards: Box<dyn CheckInCardSource> =
        match cli.check_in_cards.or(settings.check_in_cards_path) {
            Some(path) => Box::new(CheckInCardTable::from_path(&path)?),
            None => Box::new(NoCheckInCards),
        };

    let processor = BatchProcessor::new(RecordAssembler::new(&locations, check_in_cards.as_ref()));

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("unable to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let output = BufWriter::new(io::stdout().lock());

    let summary = processor.process_json_lines(input, output)?;
    tracing::info!(
        processed = summary.processed,
        failed = summary.failed,
        "finished"
    );
    Ok(())
}
