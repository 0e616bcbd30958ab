//! Common utility functions

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};

/// Date format accepted on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format without separators (8 chars: YYYYMMDD)
pub const SHORT_DATE_FORMAT: &str = "%Y%m%d";

/// Get current UTC datetime at millisecond precision (the stored precision)
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// First and last millisecond of a calendar day (UTC)
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    let end = start + chrono::Duration::days(1) - chrono::Duration::milliseconds(1);
    (start, end)
}

/// Parse a date as `YYYY-MM-DD` or `YYYYMMDD`
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, SHORT_DATE_FORMAT))
        .ok()
}

/// Convert a string to asterisks (for masking passwords)
pub fn mask_string(s: &str) -> String {
    "*".repeat(s.chars().count())
}

/// Keep the first `visible` characters and mask the rest
pub fn mask_tail(s: &str, visible: usize) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| if i < visible { c } else { '*' })
        .collect()
}
