use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

const OUTPUT_FORMAT: &str = "%Y-%m-%d";
/// `%Y` renders anything past this (or before year 0) with a sign or extra digits.
const MAX_YEAR: i32 = 9999;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Normalize a published date to `YYYY-MM-DD`, falling back to today (UTC).
pub fn parse_date(input: &str) -> String {
    parse_date_or(input, Utc::now().date_naive())
}

/// Normalize a published date to `YYYY-MM-DD`, falling back to `today`.
///
/// Timestamps carrying an offset are converted to UTC before the date is taken;
/// timestamps without one are read as UTC.
pub fn parse_date_or(input: &str, today: NaiveDate) -> String {
    parse_naive_date(input)
        .filter(|date| (0..=MAX_YEAR).contains(&date.year()))
        .unwrap_or(today)
        .format(OUTPUT_FORMAT)
        .to_string()
}

fn parse_naive_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}
