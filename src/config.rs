//! Run configuration and time-bound resolution.

use std::num::NonZeroU32;

use chrono::{DateTime, NaiveDateTime};
use rustc_hash::FxHashSet;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::filter::{FilterChain, TickerFilter, TimeFilter};

/// Timestamp layout shared by log records and `-a`/`-b` bounds.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything one analysis run needs.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Ticker set; empty admits every ticker
    pub tickers: FxHashSet<String>,
    /// Resolved exclusive lower bound
    pub after: Option<String>,
    /// Resolved exclusive upper bound
    pub before: Option<String>,
    /// Report to produce; `None` echoes admitted lines
    pub command: Option<Command>,
    /// Bar width for `hist-ord` and `graph-pos`
    pub width: Option<NonZeroU32>,
}

impl Config {
    /// Config for `command` with no filters.
    pub fn new(command: Option<Command>) -> Self {
        Self {
            command,
            ..Self::default()
        }
    }

    pub fn with_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers.extend(tickers.into_iter().map(Into::into));
        self
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn with_width(mut self, width: NonZeroU32) -> Self {
        self.width = Some(width);
        self
    }

    /// Builds the filter chain this config describes.
    pub fn filter_chain(&self) -> FilterChain {
        FilterChain::new(
            TickerFilter::new(self.tickers.iter().cloned()),
            TimeFilter::new(self.after.clone(), self.before.clone()),
        )
    }
}

/// Parse a `YYYY-mm-dd HH:MM:SS` datetime argument.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map_err(|_| Error::InvalidDateTime(s.to_string()))
}

/// Canonical string form of a datetime, as records carry it.
pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Fold several user-supplied bounds into one.
///
/// Bounds are combined left to right: each step replaces the running bound
/// and the next one with their midpoint in epoch seconds, rounded down.
/// Returns `None` when no bound was given.
pub fn resolve_bound(bounds: &[NaiveDateTime]) -> Option<NaiveDateTime> {
    let (first, rest) = bounds.split_first()?;
    Some(rest.iter().fold(*first, |acc, &next| midpoint(acc, next)))
}

fn midpoint(a: NaiveDateTime, b: NaiveDateTime) -> NaiveDateTime {
    let secs = (a.and_utc().timestamp() + b.and_utc().timestamp()).div_euclid(2);
    // The midpoint of two representable datetimes is representable.
    DateTime::from_timestamp(secs, 0).map_or(a, |dt| dt.naive_utc())
}
