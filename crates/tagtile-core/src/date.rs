//! Calendar date validation for free-text date fields.

use chrono::NaiveDate;

use crate::error::ParseError;

/// Accepted date layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks the `YYYY-M[M]-D[D]` shape: a four digit year, then a month and a
/// day of one or two digits, `-` separated, ASCII digits only.
///
/// chrono skips leading whitespace and accepts a signed year, so the shape
/// is checked before handing the text to it.
fn has_date_shape(text: &str) -> bool {
    let mut parts = text.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    digits(year, 4, 4) && digits(month, 1, 2) && digits(day, 1, 2)
}

/// Parses an ISO `YYYY-MM-DD` calendar date.
///
/// Parsing is strict: impossible dates (`2023-02-29`), surrounding
/// whitespace, a signed or short year and other layouts are rejected.
/// Month and day may drop their leading zero (`2024-1-5`).
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    if !has_date_shape(text) {
        return Err(ParseError::InvalidDate(text.to_string()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(text.to_string()))
}

/// Returns `true` iff `text` is a valid `YYYY-MM-DD` calendar date.
///
/// Never fails; anything unparsable is simply `false`.
///
/// ```rust
/// use tagtile_core::is_valid_date;
///
/// assert!(is_valid_date("2024-02-29"));
/// assert!(!is_valid_date("2023-02-29"));
/// assert!(!is_valid_date("not-a-date"));
/// ```
pub fn is_valid_date(text: &str) -> bool {
    parse_date(text).is_ok()
}
