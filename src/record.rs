//! Trade record representation and log line parsing

use crate::Side;
use crate::error::RecordError;
use std::fmt;

/// Field separator of the log format.
pub const FIELD_SEPARATOR: char = ';';

/// Number of fields a line must carry to be a record.
pub const FIELD_COUNT: usize = 6;

/// One buy/sell event from a trade log.
///
/// Layout: `timestamp;ticker;side;unit_price;currency;volume`.
#[derive(Clone, Debug, PartialEq)]
pub struct TradeRecord {
    /// `YYYY-mm-dd HH:MM:SS`, compared as a string
    pub timestamp: String,
    /// Traded symbol
    pub ticker: String,
    /// Direction of the trade
    pub side: Side,
    /// Price per unit, never negative
    pub unit_price: f64,
    /// Currency column, carried through but not interpreted
    pub currency: String,
    /// Units traded
    pub volume: u64,
}

impl TradeRecord {
    /// Parse one log line.
    ///
    /// Extra fields past the sixth are ignored. A trailing `\r` is stripped
    /// so CRLF logs parse the same as LF logs.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < FIELD_COUNT {
            return Err(RecordError::TooFewFields(fields.len()));
        }

        let side: Side = fields[2].parse()?;
        let unit_price = parse_price(fields[3])?;
        let volume = parse_volume(fields[5])?;

        Ok(Self {
            timestamp: fields[0].to_string(),
            ticker: fields[1].to_string(),
            side,
            unit_price,
            currency: fields[4].to_string(),
            volume,
        })
    }

    /// Price × volume.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.unit_price * self.volume as f64
    }

    /// Volume signed by side (buy positive, sell negative).
    #[inline]
    pub fn signed_volume(&self) -> i64 {
        self.side
            .signed(i64::try_from(self.volume).unwrap_or(i64::MAX))
    }
}

fn parse_price(field: &str) -> Result<f64, RecordError> {
    match field.parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(RecordError::Price(field.to_string())),
    }
}

fn parse_volume(field: &str) -> Result<u64, RecordError> {
    // Volumes must fit a signed position.
    match field.parse::<u64>() {
        Ok(v) if i64::try_from(v).is_ok() => Ok(v),
        _ => Err(RecordError::Volume(field.to_string())),
    }
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{};{}",
            self.timestamp, self.ticker, self.side, self.unit_price, self.currency, self.volume
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_buy_line() {
        let rec = TradeRecord::parse("2021-07-29 23:43:13;TSM;buy;667.90;USD;1234").unwrap();
        assert_eq!(rec.timestamp, "2021-07-29 23:43:13");
        assert_eq!(rec.ticker, "TSM");
        assert_eq!(rec.side, Side::Buy);
        assert_eq!(rec.unit_price, 667.90);
        assert_eq!(rec.currency, "USD");
        assert_eq!(rec.volume, 1234);
    }

    #[test]
    fn parse_with_empty_currency() {
        let rec = TradeRecord::parse("2021-01-01 10:00:00;TICK;sell;110.0;;4").unwrap();
        assert_eq!(rec.side, Side::Sell);
        assert_eq!(rec.currency, "");
        assert_eq!(rec.volume, 4);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let rec = TradeRecord::parse("2021-01-01 10:00:00;A;buy;1.5;EUR;2;id-77;x").unwrap();
        assert_eq!(rec.volume, 2);
    }

    #[test]
    fn crlf_is_stripped() {
        let rec = TradeRecord::parse("2021-01-01 10:00:00;A;buy;1.5;EUR;2\r").unwrap();
        assert_eq!(rec.volume, 2);
    }

    #[test]
    fn too_few_fields() {
        assert_eq!(
            TradeRecord::parse("2021-01-01 10:00:00;A;buy;1.5;EUR"),
            Err(RecordError::TooFewFields(5))
        );
        assert_eq!(TradeRecord::parse(""), Err(RecordError::TooFewFields(1)));
    }

    #[test]
    fn unknown_side() {
        let err = TradeRecord::parse("2021-01-01 10:00:00;A;BUY;1.5;EUR;2").unwrap_err();
        assert!(matches!(err, RecordError::Side(_)));
    }

    #[test]
    fn bad_price() {
        for price in ["", "abc", "-1.0", "NaN", "inf"] {
            let line = format!("2021-01-01 10:00:00;A;buy;{price};EUR;2");
            assert_eq!(
                TradeRecord::parse(&line),
                Err(RecordError::Price(price.to_string())),
                "price {price:?} should be rejected"
            );
        }
    }

    #[test]
    fn bad_volume() {
        for volume in ["", "-3", "2.5", "lots", "9223372036854775808"] {
            let line = format!("2021-01-01 10:00:00;A;buy;1.0;EUR;{volume}");
            assert_eq!(
                TradeRecord::parse(&line),
                Err(RecordError::Volume(volume.to_string())),
                "volume {volume:?} should be rejected"
            );
        }
    }

    #[test]
    fn notional_and_signed_volume() {
        let rec = TradeRecord::parse("2021-01-01 10:00:00;A;sell;2.5;;4").unwrap();
        assert_eq!(rec.notional(), 10.0);
        assert_eq!(rec.signed_volume(), -4);
    }

    #[test]
    fn display() {
        let rec = TradeRecord::parse("2021-01-01 10:00:00;A;buy;2.5;USD;4").unwrap();
        assert_eq!(rec.to_string(), "2021-01-01 10:00:00;A;buy;2.5;USD;4");
    }
}
