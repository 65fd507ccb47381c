//! Trade log analyzer CLI.
//!
//! Usage:
//!   tradelog [-a DATETIME]... [-b DATETIME]... [-t TICKER]... [-w WIDTH] [COMMAND] [LOG]...
//!
//! Logs ending in `.gz` are decompressed; with no logs, standard input is read.

use std::io::{self, BufWriter, Write};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process;

use chrono::NaiveDateTime;
use clap::Parser;
use log::info;

use tradelog::command::split_command;
use tradelog::config::{format_datetime, parse_datetime, resolve_bound};
use tradelog::{Analyzer, Config, Error, Result, input};

#[derive(Parser)]
#[command(name = "tradelog")]
#[command(about = "Filter and aggregate stock-exchange trade logs")]
#[command(version)]
#[command(after_help = "\
Commands:
  list-tick   list tickers
  profit      sell proceeds minus buy cost
  pos         value of held positions, largest first
  last-price  last known price per ticker
  hist-ord    histogram of records per ticker
  graph-pos   bar graph of position values per ticker

Without a command, matching records are printed unchanged.")]
struct Cli {
    /// Only records after DATETIME (YYYY-mm-dd HH:MM:SS); repeated bounds combine
    #[arg(short = 'a', value_name = "DATETIME", value_parser = parse_datetime)]
    after: Vec<NaiveDateTime>,

    /// Only records before DATETIME (YYYY-mm-dd HH:MM:SS); repeated bounds combine
    #[arg(short = 'b', value_name = "DATETIME", value_parser = parse_datetime)]
    before: Vec<NaiveDateTime>,

    /// Only records for TICKER (repeatable)
    #[arg(short = 't', value_name = "TICKER")]
    tickers: Vec<String>,

    /// Bar width of the longest bar in hist-ord and graph-pos
    #[arg(short = 'w', value_name = "WIDTH")]
    width: Option<NonZeroU32>,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Command name and log files, in any order
    #[arg(value_name = "COMMAND|LOG")]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (command, logs) = split_command(cli.inputs)?;

    let config = Config {
        tickers: cli.tickers.into_iter().collect(),
        after: resolve_bound(&cli.after).map(format_datetime),
        before: resolve_bound(&cli.before).map(format_datetime),
        command,
        width: cli.width,
    };
    info!(
        "Window: after {:?}, before {:?}; {} ticker(s)",
        config.after,
        config.before,
        config.tickers.len()
    );

    let sources = input::open_all(&logs)?;
    let out = Analyzer::new(&config).run_stream(input::chain_lines(sources))?;

    let mut stdout = BufWriter::new(io::stdout().lock());
    for line in &out {
        writeln!(stdout, "{line}").map_err(Error::Write)?;
    }
    stdout.flush().map_err(Error::Write)
}
