// smilefetch CLI - resolve compound names to PubChem IDs and SMILES

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use smilefetch_cli::exit_codes::EXIT_SUCCESS;
use smilefetch_cli::pipeline;
use smilefetch_cli::pubchem::PubChemClient;
use smilefetch_cli::CliError;
use smilefetch_config::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smilefetch")]
#[command(about = "Resolve compound names to PubChem IDs and SMILES in an annotated XLSX report")]
#[command(version)]
#[command(long_version = long_version())]
#[command(after_help = "\
Names are read from the first column of the first sheet (row 1 is a header).
The report is written next to the input as processed_<name>.xlsx.

Examples:
  smilefetch compounds.xlsx
  smilefetch compounds.xlsx --quiet
  smilefetch compounds.ods --config ./settings.toml
  RUST_LOG=debug smilefetch compounds.xlsx")]
struct Cli {
    /// Input spreadsheet (prompted for when omitted)
    input: Option<PathBuf>,

    /// Settings file (default: <config dir>/smilefetch/settings.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Suppress per-row progress on stderr
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match cmd_run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn cmd_run(cli: Cli) -> Result<(), CliError> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .map_err(CliError::config)?;

    let input = match cli.input {
        Some(path) => path,
        None => prompt_for_input()?,
    };

    let client = PubChemClient::new(&settings.lookup)?;
    let report = pipeline::run(&input, &client, &settings, cli.quiet)?;

    println!("Processed file saved as {}", report.output.display());
    println!("{}", report.counts.summary());
    Ok(())
}

fn prompt_for_input() -> Result<PathBuf, CliError> {
    print!("Please enter the Excel file path: ");
    io::stdout()
        .flush()
        .map_err(|e| CliError::args(format!("cannot write prompt: {}", e)))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::args(format!("cannot read input path: {}", e)))?;

    // Paths dragged into a terminal often arrive quoted.
    let path = line.trim().trim_matches(|c| c == '"' || c == '\'');
    if path.is_empty() {
        return Err(CliError::args("no input file given")
            .with_hint("pass the spreadsheet path as an argument: smilefetch <FILE>"));
    }
    Ok(PathBuf::from(path))
}
