// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};
use upi_ledger_rs::{
    Analyzer, AnalyzerConfig, InputError, KindMatching, ReportCard, fix_title, read_students_json,
    read_transactions_csv, read_transactions_json, try_generate_report_card,
};

/// UPI Ledger - Summarize transaction logs
///
/// Reads a transaction log and prints its summary as JSON to stdout.
/// Diagnostics go to stderr.
#[derive(Parser, Debug)]
#[command(name = "upi-ledger")]
#[command(about = "Summarizes UPI transaction logs", long_about = None)]
struct Args {
    /// Verbosity of diagnostics written to stderr
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a transaction log (CSV or JSON)
    ///
    /// CSV columns: id,type,amount,to,category,date
    /// Example: upi-ledger analyze january.csv > summary.json
    Analyze {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input format, inferred from the file extension when omitted
        #[arg(long, value_enum)]
        format: Option<InputFormat>,

        /// How the type column decides between credit and debit totals
        #[arg(long, value_enum, default_value_t = KindMatching::Normalized)]
        kind_matching: KindMatching,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Clean up movie titles (reads lines from stdin when none are given)
    Title {
        #[arg(value_name = "TITLE")]
        titles: Vec<String>,
    },
    /// Generate report cards from a JSON student object or array
    Report {
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot open '{}': {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error("cannot encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

fn main() {
    let args = Args::parse();

    setup_logging(args.log_level.into());

    let result = match args.command {
        Command::Analyze {
            input,
            format,
            kind_matching,
            pretty,
        } => run_analyze(&input, format, kind_matching, pretty),
        Command::Title { titles } => run_title(&titles),
        Command::Report { input, pretty } => run_report(&input, pretty),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(level: LevelFilter) {
    // stdout carries the results
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

fn open(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn run_analyze(
    input: &Path,
    format: Option<InputFormat>,
    kind_matching: KindMatching,
    pretty: bool,
) -> Result<(), CliError> {
    let reader = open(input)?;
    let transactions = match format.unwrap_or_else(|| InputFormat::from_path(input)) {
        InputFormat::Csv => read_transactions_csv(reader)?,
        InputFormat::Json => read_transactions_json(reader)?,
    };
    info!("Read {} transactions from '{}'", transactions.len(), input.display());

    let analyzer = Analyzer::new(AnalyzerConfig::default().with_kind_matching(kind_matching));
    let analysis = match analyzer.try_analyze(&transactions) {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            warn!("No analysis for '{}': {}", input.display(), e);
            None
        }
    };

    write_json(io::stdout().lock(), &analysis, pretty)
}

fn run_title(titles: &[String]) -> Result<(), CliError> {
    let mut output = BufWriter::new(io::stdout().lock());

    if titles.is_empty() {
        for line in io::stdin().lock().lines() {
            writeln!(output, "{}", fix_title(&line?))?;
        }
    } else {
        for title in titles {
            writeln!(output, "{}", fix_title(title))?;
        }
    }

    output.flush()?;
    Ok(())
}

fn run_report(input: &Path, pretty: bool) -> Result<(), CliError> {
    let students = read_students_json(open(input)?)?;

    let cards: Vec<Option<ReportCard>> = students
        .iter()
        .enumerate()
        .map(|(index, student)| match student {
            Some(student) => match try_generate_report_card(student) {
                Ok(card) => Some(card),
                Err(e) => {
                    warn!("No report card for '{}': {}", student.name, e);
                    None
                }
            },
            None => {
                warn!("No report card for student at index {}: malformed record", index);
                None
            }
        })
        .collect();

    write_json(io::stdout().lock(), &cards, pretty)
}

/// Writes `value` as a single JSON document followed by a newline.
fn write_json<W: Write, T: Serialize>(writer: W, value: &T, pretty: bool) -> Result<(), CliError> {
    let mut writer = BufWriter::new(writer);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;
    use upi_ledger_rs::{Transaction, analyze};

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn format_inferred_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("log.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("LOG.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("log.csv")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("log")), InputFormat::Csv);
    }

    #[test]
    fn parse_analyze_arguments() {
        let args = Args::try_parse_from([
            "upi-ledger",
            "--log-level",
            "debug",
            "analyze",
            "log.csv",
            "--kind-matching",
            "legacy",
        ])
        .unwrap();

        assert_eq!(args.log_level, LogLevel::Debug);
        match args.command {
            Command::Analyze {
                input,
                format,
                kind_matching,
                pretty,
            } => {
                assert_eq!(input, PathBuf::from("log.csv"));
                assert_eq!(format, None);
                assert_eq!(kind_matching, KindMatching::Legacy);
                assert!(!pretty);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn log_level_maps_to_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
    }

    #[test]
    fn write_missing_analysis_as_null() {
        let mut output = Vec::new();
        write_json(&mut output, &analyze(&[]), false).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "null\n");
    }

    #[test]
    fn write_analysis_with_camel_case_keys() {
        let log = [Transaction::new("T1", "credit", dec!(5000), "Salary", "income")];
        let mut output = Vec::new();
        write_json(&mut output, &analyze(&log), false).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["transactionCount"], 1);
        assert_eq!(json["frequentContact"], "Salary");
        assert_eq!(json["allAbove100"], true);
        assert_eq!(json["hasLargeTransaction"], true);
        assert_eq!(json["highestTransaction"]["id"], "T1");
    }
}
