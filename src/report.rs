//! Aggregators and the reports they produce.
//!
//! Each aggregator consumes admitted records one at a time in stream order,
//! then sorts explicitly in [`Aggregator::finish`]. Per-ticker state lives in
//! hash maps whose iteration order never reaches the output.

use std::cmp::Ordering;
use std::num::NonZeroU32;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::TradeRecord;
use crate::render::{self, BarScale};

/// A one-pass reduction over admitted records.
pub trait Aggregator: Default {
    type Output;

    /// Fold one record into the running state.
    fn observe(&mut self, record: &TradeRecord);

    /// Consume the state and produce the sorted result.
    fn finish(self) -> Self::Output;

    /// Run the aggregator over a whole record stream.
    fn aggregate<I>(records: I) -> Self::Output
    where
        I: IntoIterator<Item = TradeRecord>,
    {
        let mut agg = Self::default();
        for record in records {
            agg.observe(&record);
        }
        agg.finish()
    }
}

/// Price of the chronologically last record seen for a ticker.
#[derive(Clone, Debug)]
struct LastTrade {
    timestamp: String,
    price: f64,
}

impl LastTrade {
    fn from_record(record: &TradeRecord) -> Self {
        Self {
            timestamp: record.timestamp.clone(),
            price: record.unit_price,
        }
    }

    /// Later timestamps win; equal timestamps go to the later record.
    fn update(&mut self, record: &TradeRecord) {
        if record.timestamp >= self.timestamp {
            self.timestamp.clone_from(&record.timestamp);
            self.price = record.unit_price;
        }
    }
}

fn by_ticker<T>(rows: &mut [(String, T)]) {
    rows.sort_by(|a, b| a.0.cmp(&b.0));
}

// ============================================================================
// list-tick
// ============================================================================

/// Distinct tickers.
#[derive(Debug, Default)]
pub struct TickerList {
    seen: FxHashSet<String>,
}

impl Aggregator for TickerList {
    type Output = Vec<String>;

    fn observe(&mut self, record: &TradeRecord) {
        self.seen.insert(record.ticker.clone());
    }

    fn finish(self) -> Vec<String> {
        let mut tickers: Vec<String> = self.seen.into_iter().collect();
        tickers.sort();
        tickers
    }
}

// ============================================================================
// profit
// ============================================================================

/// Sell proceeds minus buy cost across every record.
///
/// This is total cash flow, not closed-position P&L: buys count even when the
/// position is still open.
#[derive(Debug, Default)]
pub struct Profit {
    total: f64,
}

impl Aggregator for Profit {
    type Output = f64;

    fn observe(&mut self, record: &TradeRecord) {
        self.total += record.side.cash_flow(record.notional());
    }

    fn finish(self) -> f64 {
        self.total
    }
}

// ============================================================================
// pos
// ============================================================================

#[derive(Debug)]
struct Holding {
    last: LastTrade,
    units: i64,
}

/// Value of each ticker's net position at its last price, largest first.
#[derive(Debug, Default)]
pub struct Positions {
    holdings: FxHashMap<String, Holding>,
}

impl Aggregator for Positions {
    type Output = Vec<(String, f64)>;

    fn observe(&mut self, record: &TradeRecord) {
        let delta = record.signed_volume();
        self.holdings
            .entry(record.ticker.clone())
            .and_modify(|holding| {
                holding.last.update(record);
                holding.units = holding.units.saturating_add(delta);
            })
            .or_insert_with(|| Holding {
                last: LastTrade::from_record(record),
                units: delta,
            });
    }

    fn finish(self) -> Vec<(String, f64)> {
        let mut rows: Vec<(String, f64)> = self
            .holdings
            .into_iter()
            .map(|(ticker, h)| (ticker, h.last.price * h.units as f64))
            .collect();
        rows.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        rows
    }
}

// ============================================================================
// last-price
// ============================================================================

/// Last known price per ticker.
#[derive(Debug, Default)]
pub struct LastPrices {
    last: FxHashMap<String, LastTrade>,
}

impl Aggregator for LastPrices {
    type Output = Vec<(String, f64)>;

    fn observe(&mut self, record: &TradeRecord) {
        self.last
            .entry(record.ticker.clone())
            .and_modify(|last| last.update(record))
            .or_insert_with(|| LastTrade::from_record(record));
    }

    fn finish(self) -> Vec<(String, f64)> {
        let mut rows: Vec<(String, f64)> = self
            .last
            .into_iter()
            .map(|(ticker, last)| (ticker, last.price))
            .collect();
        by_ticker(&mut rows);
        rows
    }
}

// ============================================================================
// hist-ord
// ============================================================================

/// Number of records per ticker.
#[derive(Debug, Default)]
pub struct OrderHistogram {
    counts: FxHashMap<String, u64>,
}

impl Aggregator for OrderHistogram {
    type Output = Vec<(String, u64)>;

    fn observe(&mut self, record: &TradeRecord) {
        *self.counts.entry(record.ticker.clone()).or_insert(0) += 1;
    }

    fn finish(self) -> Vec<(String, u64)> {
        let mut rows: Vec<(String, u64)> = self.counts.into_iter().collect();
        by_ticker(&mut rows);
        rows
    }
}

// ============================================================================
// graph-pos
// ============================================================================

/// Position values sorted by ticker.
///
/// Built on [`Positions`]; only the ordering differs.
#[derive(Debug, Default)]
pub struct PositionGraph {
    positions: Positions,
}

impl Aggregator for PositionGraph {
    type Output = Vec<(String, f64)>;

    fn observe(&mut self, record: &TradeRecord) {
        self.positions.observe(record);
    }

    fn finish(self) -> Vec<(String, f64)> {
        let mut rows = self.positions.finish();
        by_ticker(&mut rows);
        rows
    }
}

// ============================================================================
// Report rendering
// ============================================================================

/// Result of one aggregation, ready to render.
#[derive(Clone, Debug, PartialEq)]
pub enum Report {
    Tickers(Vec<String>),
    Profit(f64),
    Positions(Vec<(String, f64)>),
    LastPrices(Vec<(String, f64)>),
    OrderHistogram(Vec<(String, u64)>),
    PositionGraph(Vec<(String, f64)>),
}

impl Report {
    /// Output lines for this report.
    ///
    /// `width` only affects the two bar reports.
    pub fn render(&self, width: Option<NonZeroU32>) -> Vec<String> {
        match self {
            Report::Tickers(tickers) => tickers.clone(),
            Report::Profit(total) => vec![render::format_money(*total)],
            Report::Positions(rows) | Report::LastPrices(rows) => render::aligned_rows(rows),
            Report::OrderHistogram(rows) => {
                let counts: Vec<u64> = rows.iter().map(|(_, n)| *n).collect();
                let lens = render::bar_lengths(&counts, BarScale::new(width, 1));
                rows.iter()
                    .zip(lens)
                    .map(|((ticker, _), len)| {
                        render::bar_row(ticker, render::POSITIVE_GLYPH, len)
                    })
                    .collect()
            }
            Report::PositionGraph(rows) => {
                let values: Vec<f64> = rows.iter().map(|(_, v)| *v).collect();
                let scale = BarScale::new(width, render::MONEY_UNITS_PER_CHAR);
                let lens = render::value_bar_lengths(&values, scale);
                rows.iter()
                    .zip(lens)
                    .map(|((ticker, value), len)| {
                        let glyph = if *value < 0.0 {
                            render::NEGATIVE_GLYPH
                        } else {
                            render::POSITIVE_GLYPH
                        };
                        render::bar_row(ticker, glyph, len)
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(lines: &[&str]) -> Vec<TradeRecord> {
        lines
            .iter()
            .map(|l| TradeRecord::parse(l).unwrap())
            .collect()
    }

    fn scenario() -> Vec<TradeRecord> {
        records(&[
            "2021-01-01 10:00:00;TICK;buy;100.0;;10",
            "2021-01-01 11:00:00;TICK;sell;110.0;;4",
        ])
    }

    fn width(w: u32) -> Option<NonZeroU32> {
        NonZeroU32::new(w)
    }

    #[test]
    fn ticker_list_sorted_distinct() {
        let recs = records(&[
            "2021-01-01 10:00:00;TSLA;buy;1;;1",
            "2021-01-01 10:00:01;AAPL;buy;1;;1",
            "2021-01-01 10:00:02;TSLA;sell;1;;1",
        ]);
        assert_eq!(TickerList::aggregate(recs), vec!["AAPL", "TSLA"]);
    }

    #[test]
    fn profit_scenario() {
        let total = Profit::aggregate(scenario());
        assert_eq!(total, -560.0);
        assert_eq!(Report::Profit(total).render(None), vec!["-560.00"]);
    }

    #[test]
    fn profit_empty() {
        assert_eq!(Report::Profit(Profit::aggregate(Vec::new())).render(None), vec!["0.00"]);
    }

    #[test]
    fn positions_scenario() {
        let rows = Positions::aggregate(scenario());
        assert_eq!(rows, vec![("TICK".to_string(), 660.0)]);
        assert_eq!(Report::Positions(rows).render(None), vec!["TICK      : 660.00"]);
    }

    #[test]
    fn positions_sorted_descending_with_ticker_ties() {
        let recs = records(&[
            "2021-01-01 10:00:00;LOW;sell;10;;5",
            "2021-01-01 10:00:00;BBB;buy;10;;1",
            "2021-01-01 10:00:00;HIGH;buy;100;;5",
            "2021-01-01 10:00:00;AAA;buy;10;;1",
        ]);
        let tickers: Vec<String> = Positions::aggregate(recs).into_iter().map(|r| r.0).collect();
        assert_eq!(tickers, vec!["HIGH", "AAA", "BBB", "LOW"]);
    }

    #[test]
    fn positions_all_buy_non_negative() {
        let recs = records(&[
            "2021-01-01 10:00:00;A;buy;3.5;;2",
            "2021-01-01 11:00:00;A;buy;4.0;;3",
        ]);
        assert_eq!(Positions::aggregate(recs), vec![("A".to_string(), 20.0)]);
    }

    #[test]
    fn last_price_is_chronological() {
        let recs = records(&[
            "2021-01-01 12:00:00;A;buy;3.0;;1",
            "2021-01-01 10:00:00;A;buy;1.0;;1",
            "2021-01-01 12:00:00;A;sell;4.0;;1",
        ]);
        // Earlier timestamp arriving later does not win; equal timestamp does.
        assert_eq!(LastPrices::aggregate(recs), vec![("A".to_string(), 4.0)]);
    }

    #[test]
    fn last_price_scenario_render() {
        let mut recs = scenario();
        recs.extend(records(&["2021-01-01 09:00:00;ABC;buy;1234.5;;1"]));
        let rows = LastPrices::aggregate(recs);
        assert_eq!(
            Report::LastPrices(rows).render(None),
            vec!["ABC       : 1234.50", "TICK      :  110.00"]
        );
    }

    #[test]
    fn histogram_counts() {
        let recs = records(&[
            "2021-01-01 10:00:00;B;buy;1;;1",
            "2021-01-01 10:00:00;A;buy;1;;1",
            "2021-01-01 10:00:00;B;sell;1;;1",
            "2021-01-01 10:00:00;B;buy;1;;1",
        ]);
        let rows = OrderHistogram::aggregate(recs);
        assert_eq!(rows, vec![("A".to_string(), 1), ("B".to_string(), 3)]);
        assert_eq!(
            Report::OrderHistogram(rows.clone()).render(None),
            vec!["A         : #", "B         : ###"]
        );
        assert_eq!(
            Report::OrderHistogram(rows).render(width(6)),
            vec!["A         : ##", "B         : ######"]
        );
    }

    #[test]
    fn graph_uses_position_values() {
        let recs = records(&[
            "2021-01-01 10:00:00;LONG;buy;1000;;5",
            "2021-01-01 10:00:00;SHORT;sell;500;;5",
            "2021-01-01 10:00:00;TINY;buy;1;;1",
        ]);
        let rows = PositionGraph::aggregate(recs);
        assert_eq!(
            rows,
            vec![
                ("LONG".to_string(), 5000.0),
                ("SHORT".to_string(), -2500.0),
                ("TINY".to_string(), 1.0),
            ]
        );
        assert_eq!(
            Report::PositionGraph(rows.clone()).render(None),
            vec!["LONG      : #####", "SHORT     : !!", "TINY      :"]
        );
        assert_eq!(
            Report::PositionGraph(rows).render(width(10)),
            vec!["LONG      : ##########", "SHORT     : !!!!!", "TINY      :"]
        );
    }

    #[test]
    fn graph_scales_unrounded_values() {
        let recs = records(&[
            "2021-01-01 10:00:00;A;buy;0.004;;1",
            "2021-01-01 10:00:00;B;buy;0.006;;1",
        ]);
        let rows = PositionGraph::aggregate(recs);
        assert_eq!(
            Report::PositionGraph(rows).render(width(10)),
            vec!["A         : ######", "B         : ##########"]
        );

        // 999.996 prints as 1000.00 in pos but is still under one bar step
        let recs = records(&["2021-01-01 10:00:00;C;buy;999.996;;1"]);
        let rows = PositionGraph::aggregate(recs);
        assert_eq!(Report::PositionGraph(rows).render(None), vec!["C         :"]);
    }

    #[test]
    fn graph_all_zero_with_width() {
        let recs = records(&[
            "2021-01-01 10:00:00;A;buy;10;;5",
            "2021-01-01 11:00:00;A;sell;10;;5",
        ]);
        let rows = PositionGraph::aggregate(recs);
        assert_eq!(Report::PositionGraph(rows).render(width(10)), vec!["A         :"]);
    }
}
