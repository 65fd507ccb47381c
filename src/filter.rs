//! Record filters: ticker set and time window.
//!
//! Both filters are pure per-record predicates. A [`FilterChain`] applies the
//! ticker filter first and the time filter second; a record is admitted only
//! if it passes both, so the order never changes the result.

use rustc_hash::FxHashSet;

use crate::TradeRecord;

/// A per-record predicate.
pub trait RecordFilter {
    /// Returns `true` if the record survives this filter.
    fn admits(&self, record: &TradeRecord) -> bool;
}

/// Admits records whose ticker is in the configured set.
///
/// An empty set admits everything.
#[derive(Clone, Debug, Default)]
pub struct TickerFilter {
    tickers: FxHashSet<String>,
}

impl TickerFilter {
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tickers: tickers.into_iter().map(Into::into).collect(),
        }
    }

    /// True when no ticker restriction is configured.
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

impl RecordFilter for TickerFilter {
    #[inline]
    fn admits(&self, record: &TradeRecord) -> bool {
        self.tickers.is_empty() || self.tickers.contains(&record.ticker)
    }
}

/// Admits records strictly inside an optional `(after, before)` window.
///
/// Bounds are canonical `YYYY-mm-dd HH:MM:SS` strings. For that zero-padded
/// layout, string order is chronological order, so no parsing happens here.
#[derive(Clone, Debug, Default)]
pub struct TimeFilter {
    after: Option<String>,
    before: Option<String>,
}

impl TimeFilter {
    pub fn new(after: Option<String>, before: Option<String>) -> Self {
        Self { after, before }
    }

    /// Exclusive lower bound, if any.
    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// Exclusive upper bound, if any.
    pub fn before(&self) -> Option<&str> {
        self.before.as_deref()
    }
}

impl RecordFilter for TimeFilter {
    #[inline]
    fn admits(&self, record: &TradeRecord) -> bool {
        let ts = record.timestamp.as_str();
        self.after.as_deref().is_none_or(|lower| lower < ts)
            && self.before.as_deref().is_none_or(|upper| ts < upper)
    }
}

/// Ticker filter followed by time filter.
#[derive(Clone, Debug, Default)]
pub struct FilterChain {
    pub tickers: TickerFilter,
    pub window: TimeFilter,
}

impl FilterChain {
    pub fn new(tickers: TickerFilter, window: TimeFilter) -> Self {
        Self { tickers, window }
    }
}

impl RecordFilter for FilterChain {
    #[inline]
    fn admits(&self, record: &TradeRecord) -> bool {
        self.tickers.admits(record) && self.window.admits(record)
    }
}
