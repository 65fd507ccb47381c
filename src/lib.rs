//! # tradelog
//!
//! Filter and aggregate stock-exchange trade logs.
//!
//! A log is a sequence of `;`-separated buy/sell records:
//!
//! ```text
//! 2021-07-29 23:43:13;TSM;buy;667.90;USD;1234
//! ```
//!
//! Every run is one batch pass: lines are parsed into [`TradeRecord`]s,
//! malformed lines are dropped, the survivors go through a ticker filter and
//! a time-window filter, and one aggregator turns them into a report.
//!
//! ## Quick Start
//!
//! ```
//! use tradelog::{Analyzer, Command, Config};
//!
//! let log = [
//!     "2021-01-01 10:00:00;TICK;buy;100.0;;10",
//!     "2021-01-01 11:00:00;TICK;sell;110.0;;4",
//! ];
//!
//! let pos = Analyzer::new(&Config::new(Some(Command::Pos)));
//! assert_eq!(pos.run_lines(log), vec!["TICK      : 660.00"]);
//!
//! let last = Analyzer::new(&Config::new(Some(Command::LastPrice)));
//! assert_eq!(last.run_lines(log), vec!["TICK      : 110.00"]);
//! ```
//!
//! ## Commands
//!
//! | Command | Report |
//! |---------|--------|
//! | `list-tick` | Distinct tickers, sorted |
//! | `profit` | Sell proceeds minus buy cost |
//! | `pos` | Net units × last price per ticker, largest first |
//! | `last-price` | Last price per ticker |
//! | `hist-ord` | Record count per ticker as a bar |
//! | `graph-pos` | Position value per ticker as a bar (`#` long, `!` short) |
//!
//! ## Filters
//!
//! Bounds are exclusive and compared on the `YYYY-mm-dd HH:MM:SS` string:
//!
//! ```
//! use tradelog::{Analyzer, Command, Config};
//!
//! let config = Config::new(Some(Command::ListTick))
//!     .with_tickers(["AAPL", "TSM"])
//!     .with_after("2021-07-29 23:43:13");
//!
//! let out = Analyzer::new(&config).run_lines([
//!     "2021-07-29 23:43:13;TSM;buy;667.90;USD;1234",
//!     "2021-07-29 23:43:15;AAPL;sell;1000.00;USD;10",
//!     "2021-07-29 23:43:17;MSFT;buy;300.00;USD;5",
//! ]);
//! assert_eq!(out, vec!["AAPL"]);
//! ```

pub mod analyzer;
pub mod command;
pub mod config;
mod error;
pub mod filter;
pub mod input;
mod record;
pub mod render;
pub mod report;
mod side;

// Re-export public API
pub use analyzer::Analyzer;
pub use command::Command;
pub use config::Config;
pub use error::{Error, RecordError, Result};
pub use filter::{FilterChain, RecordFilter, TickerFilter, TimeFilter};
pub use record::TradeRecord;
pub use report::{Aggregator, Report};
pub use side::{ParseSideError, Side};
