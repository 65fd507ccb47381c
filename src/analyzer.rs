//! Parse → filter → aggregate → render pipeline.

use std::io::{self, BufRead};
use std::num::NonZeroU32;
use std::str;

use log::{debug, info};

use crate::command::Command;
use crate::config::Config;
use crate::filter::{FilterChain, RecordFilter};
use crate::input;
use crate::report::{
    Aggregator, LastPrices, OrderHistogram, PositionGraph, Positions, Profit, Report, TickerList,
};
use crate::{RecordError, Result, TradeRecord};

/// Runs one configured analysis over a stream of log lines.
///
/// ```
/// use tradelog::{Analyzer, Command, Config};
///
/// let analyzer = Analyzer::new(&Config::new(Some(Command::Profit)));
/// let out = analyzer.run_lines([
///     "2021-01-01 10:00:00;TICK;buy;100.0;;10",
///     "2021-01-01 11:00:00;TICK;sell;110.0;;4",
/// ]);
/// assert_eq!(out, vec!["-560.00"]);
/// ```
#[derive(Clone, Debug)]
pub struct Analyzer {
    chain: FilterChain,
    command: Option<Command>,
    width: Option<NonZeroU32>,
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            chain: config.filter_chain(),
            command: config.command,
            width: config.width,
        }
    }

    /// The parsed record if the line is well formed and passes every filter.
    pub fn admit(&self, line: &str) -> Option<TradeRecord> {
        TradeRecord::parse(line)
            .ok()
            .filter(|record| self.chain.admits(record))
    }

    /// Admitted records of a line stream, in stream order.
    ///
    /// Lines are raw bytes; a line that is not valid UTF-8 is skipped like
    /// any other malformed line.
    pub fn records<I, S>(&self, lines: I) -> impl Iterator<Item = TradeRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        lines.into_iter().enumerate().filter_map(move |(idx, line)| {
            parse_line(idx, line.as_ref())
                .map(|(_, record)| record)
                .filter(|record| self.chain.admits(record))
        })
    }

    /// Aggregate a line stream into the report for `command`.
    pub fn report<I, S>(&self, command: Command, lines: I) -> Report
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let records = self.records(lines);
        match command {
            Command::ListTick => Report::Tickers(TickerList::aggregate(records)),
            Command::Profit => Report::Profit(Profit::aggregate(records)),
            Command::Pos => Report::Positions(Positions::aggregate(records)),
            Command::LastPrice => Report::LastPrices(LastPrices::aggregate(records)),
            Command::HistOrd => Report::OrderHistogram(OrderHistogram::aggregate(records)),
            Command::GraphPos => Report::PositionGraph(PositionGraph::aggregate(records)),
        }
    }

    /// Run over in-memory lines and return the output lines.
    ///
    /// With no command, admitted lines are echoed exactly as given,
    /// including any trailing `\r`.
    pub fn run_lines<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut read = 0usize;
        let counted = lines.into_iter().inspect(|_| read += 1);

        let out = match self.command {
            Some(command) => self.report(command, counted).render(self.width),
            None => counted
                .enumerate()
                .filter_map(|(idx, line)| {
                    parse_line(idx, line.as_ref())
                        .filter(|(_, record)| self.chain.admits(record))
                        .map(|(text, _)| text.to_owned())
                })
                .collect(),
        };

        info!(
            "Read {read} lines, command {}, {} output lines",
            self.command.map_or("(none)", Command::name),
            out.len()
        );
        out
    }

    /// Run over a fallible line stream until it ends.
    ///
    /// A read error ends the run and is returned instead of a partial report.
    pub fn run_stream<I, S>(&self, lines: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<[u8]>,
    {
        let mut failure = None;
        let lines = lines
            .into_iter()
            .map_while(|line| line.map_err(|e| failure = Some(e)).ok());
        let out = self.run_lines(lines);
        match failure {
            Some(e) => Err(e.into()),
            None => Ok(out),
        }
    }

    /// Run over a reader until end of input.
    pub fn run<R: BufRead>(&self, reader: R) -> Result<Vec<String>> {
        self.run_stream(input::lines(reader))
    }
}

/// Decode one raw line and parse it, keeping the decoded text.
fn decode(line: &[u8]) -> std::result::Result<(&str, TradeRecord), RecordError> {
    let text = str::from_utf8(line).map_err(|_| RecordError::Encoding)?;
    Ok((text, TradeRecord::parse(text)?))
}

/// [`decode`], logging the reason a line at `idx` is skipped.
fn parse_line(idx: usize, line: &[u8]) -> Option<(&str, TradeRecord)> {
    decode(line)
        .map_err(|e| debug!("Skipping line {}: {e}", idx + 1))
        .ok()
}
