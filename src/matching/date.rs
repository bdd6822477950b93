use chrono::{NaiveDate, NaiveDateTime};

/// One attempt in the date fallback chain
type DateParser = fn(&str) -> Option<NaiveDate>;

/// Formats tried in order; the first success wins.
const DATE_PARSERS: [DateParser; 4] = [
    parse_iso_date,
    parse_compact_date,
    parse_iso_datetime,
    parse_iso_date_prefix,
];

/// Parse a capture date from a metadata `date` value.
///
/// Accepts `YYYY-MM-DD`, `YYYYMMDD`, `YYYY-MM-DDTHH:MM:SS`, and finally any
/// string whose first 10 characters are `YYYY-MM-DD`. Time of day is
/// discarded. Values are not trimmed: whitespace inside the date part
/// makes the value unreadable.
#[must_use]
pub fn parse_frame_date(value: &str) -> Option<NaiveDate> {
    // chrono skips blanks before numeric fields; every format here is strict
    if value.chars().take(10).any(char::is_whitespace) {
        return None;
    }
    DATE_PARSERS.iter().find_map(|parse| parse(value))
}

/// Absolute number of calendar days between two dates
#[must_use]
pub fn days_between(a: NaiveDate, b: NaiveDate) -> u64 {
    a.signed_duration_since(b).num_days().unsigned_abs()
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn parse_compact_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[0..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

fn parse_iso_date_prefix(s: &str) -> Option<NaiveDate> {
    s.get(..10).and_then(parse_iso_date)
}
