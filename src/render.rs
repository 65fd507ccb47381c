//! Report line formatting: ticker labels, money columns and text bars.

use std::num::NonZeroU32;

/// Width the ticker label is padded (or cut) to.
pub const LABEL_WIDTH: usize = 10;

/// Currency units per bar character when graphing money without `-w`.
pub const MONEY_UNITS_PER_CHAR: u64 = 1000;

/// Bar glyph for non-negative values.
pub const POSITIVE_GLYPH: char = '#';

/// Bar glyph for negative values.
pub const NEGATIVE_GLYPH: char = '!';

/// `ticker` left-aligned in a [`LABEL_WIDTH`] column.
pub fn label(ticker: &str) -> String {
    format!("{ticker:<w$.w$}", w = LABEL_WIDTH)
}

/// Money with two fraction digits; values that round to zero print `0.00`.
pub fn format_money(value: f64) -> String {
    let s = format!("{value:.2}");
    if s == "-0.00" { "0.00".to_string() } else { s }
}

/// Render `label: value` rows with values right-aligned in one column.
///
/// The column is as wide as the longest formatted value, so all values are
/// formatted once to measure before any row is emitted.
pub fn aligned_rows<S: AsRef<str>>(rows: &[(S, f64)]) -> Vec<String> {
    let values: Vec<String> = rows.iter().map(|(_, v)| format_money(*v)).collect();
    let width = values.iter().map(String::len).max().unwrap_or(0);

    rows.iter()
        .zip(&values)
        .map(|((ticker, _), value)| format!("{}: {value:>width$}", label(ticker.as_ref())))
        .collect()
}

/// How bar magnitudes translate to characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarScale {
    /// Fixed number of magnitude units per character.
    Fixed(u64),
    /// The largest magnitude fills exactly this many characters.
    Width(NonZeroU32),
}

impl BarScale {
    /// Explicit width when given, otherwise `units_per_char`.
    pub fn new(width: Option<NonZeroU32>, units_per_char: u64) -> Self {
        width.map_or(Self::Fixed(units_per_char), Self::Width)
    }
}

/// Bar length for each magnitude, rounded down.
///
/// With [`BarScale::Width`] the maximum magnitude maps to the full width and
/// the rest scale linearly. A zero maximum yields all-zero bars.
pub fn bar_lengths(magnitudes: &[u64], scale: BarScale) -> Vec<usize> {
    match scale {
        BarScale::Fixed(units) => {
            let units = units.max(1);
            magnitudes.iter().map(|&m| to_len(m / units)).collect()
        }
        BarScale::Width(width) => {
            let max = magnitudes.iter().copied().max().unwrap_or(0);
            if max == 0 {
                return vec![0; magnitudes.len()];
            }
            let width = u128::from(width.get());
            magnitudes
                .iter()
                .map(|&m| to_len((u128::from(m) * width / u128::from(max)) as u64))
                .collect()
        }
    }
}

fn to_len(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Bar length for each signed value, scaled by magnitude and rounded down.
///
/// Same rules as [`bar_lengths`] on `|value|`. The row holding the maximum
/// magnitude always gets exactly the full width.
pub fn value_bar_lengths(values: &[f64], scale: BarScale) -> Vec<usize> {
    match scale {
        BarScale::Fixed(units) => {
            let units = units.max(1) as f64;
            values.iter().map(|v| float_len(v.abs() / units)).collect()
        }
        BarScale::Width(width) => {
            let max = values.iter().map(|v| v.abs()).fold(0.0, f64::max);
            if max == 0.0 {
                return vec![0; values.len()];
            }
            let width = f64::from(width.get());
            values
                .iter()
                .map(|v| {
                    let m = v.abs();
                    if m == max { float_len(width) } else { float_len(m * width / max) }
                })
                .collect()
        }
    }
}

fn float_len(x: f64) -> usize {
    // Saturating cast: NaN maps to 0, overflow to usize::MAX.
    x.floor() as usize
}

/// `label:` followed by a space and `len` glyphs, or nothing for an empty bar.
pub fn bar_row(ticker: &str, glyph: char, len: usize) -> String {
    let mut row = label(ticker);
    row.push(':');
    if len > 0 {
        row.push(' ');
        row.extend(std::iter::repeat_n(glyph, len));
    }
    row
}
