//! Total parse functions for numeric-looking cells
//!
//! Every function here returns `None` instead of failing. Callers pick the
//! default for their field, so coercion failures stay visible at the call site.

use super::Cell;

/// Parse a decimal number, ignoring surrounding whitespace
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parse a currency amount such as `$25.00` or `$40b`
///
/// Leading `$` signs and any trailing characters that cannot end a number are
/// stripped before parsing.
pub fn parse_currency(s: &str) -> Option<f64> {
    let stripped = s
        .trim()
        .trim_start_matches('$')
        .trim_end_matches(|c: char| !c.is_ascii_digit() && c != '.');
    parse_number(stripped)
}

/// Number in `cell`, `None` if absent or not numeric
pub fn cell_number(cell: &Cell) -> Option<f64> {
    cell.as_text().and_then(parse_number)
}

/// Round a currency amount to cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
