//! `listfilter`: interactively filter lines read from a file or stdin.
//!
//! The interface is drawn on stderr. The rows still shown when `Enter` is
//! pressed are printed to stdout, so the output can be piped.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use listfilter_tui::{TuiAppBuilder, TuiError, write_selection};

/// Narrow a list of lines by typing part of them (case-insensitive).
#[derive(Debug, Parser)]
#[command(name = "listfilter", version, about)]
struct Args {
    /// File with one label per line. Reads stdin when omitted.
    file: Option<PathBuf>,

    /// Query to start with.
    #[arg(short, long, default_value = "")]
    query: String,

    /// Text shown before the query.
    #[arg(short, long, default_value = "Search")]
    prompt: String,
}

fn load_rows(file: Option<&PathBuf>) -> io::Result<Vec<String>> {
    let text = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect())
}

fn run(args: Args) -> Result<Option<Vec<String>>, TuiError> {
    let rows = load_rows(args.file.as_ref())?;
    tracing::debug!(rows = rows.len(), "loaded rows");
    let mut app = TuiAppBuilder::new()
        .with_prompt(args.prompt)
        .with_rows(rows)
        .with_query(args.query)
        .build()?;
    app.run()
}

fn main() -> ExitCode {
    listfilter::logging::install_tracing();
    let args = Args::parse();

    match run(args) {
        Ok(Some(selected)) => match write_selection(&mut io::stdout().lock(), &selected) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!(%err, "writing the selection failed");
                ExitCode::FAILURE
            }
        },
        Ok(None) => ExitCode::from(130),
        Err(err) => {
            tracing::error!(%err, "listfilter failed");
            ExitCode::FAILURE
        }
    }
}
