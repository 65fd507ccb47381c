//! Trade side: Buy or Sell

use std::fmt;
use std::str::FromStr;

/// Direction of a logged trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Signed unit change this side applies to a position.
    ///
    /// Buying adds units, selling removes them.
    #[inline]
    pub fn signed(self, volume: i64) -> i64 {
        match self {
            Side::Buy => volume,
            Side::Sell => -volume,
        }
    }

    /// Signed cash flow of a trade: sell proceeds are positive, buy cost negative.
    #[inline]
    pub fn cash_flow(self, notional: f64) -> f64 {
        match self {
            Side::Buy => -notional,
            Side::Sell => notional,
        }
    }
}

/// Error returned when a side field is neither `buy` nor `sell`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSideError(pub String);

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown side '{}'", self.0)
    }
}

impl std::error::Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    /// Only the exact lowercase literals used in the log format are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(ParseSideError(other.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}
