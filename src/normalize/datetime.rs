use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Date-only formats accepted by [`normalize_date`], tried in order after the
/// timestamp forms.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]{1,2})(?::([0-9]{2}))?\s*(am|pm)?$").expect("time regex")
});

/// Normalizes a date string to canonical `YYYY-MM-DD`.
///
/// Accepted inputs, tried in order: an RFC 3339 timestamp (converted to UTC
/// before the calendar date is taken, so `2026-03-15T23:30:00-05:00` becomes
/// `2026-03-16`), a naive `YYYY-MM-DDTHH:MM:SS` timestamp, then the plain
/// date formats in [`DATE_FORMATS`]. Parsing is strict: impossible dates such
/// as February 30 are rejected rather than rolled over, and years outside
/// 1000-9999 are rejected so the canonical form is always ten characters.
/// Canonical input normalizes to itself.
pub fn normalize_date(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return to_canonical(timestamp.with_timezone(&Utc).date_naive(), raw);
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return to_canonical(timestamp.date(), raw);
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return to_canonical(date, raw);
        }
    }

    Err(ValidationError::InvalidFormat {
        field: "date",
        value: raw.to_string(),
    })
}

fn to_canonical(date: NaiveDate, raw: &str) -> Result<String, ValidationError> {
    if !(1000..=9999).contains(&date.year()) {
        return Err(ValidationError::InvalidValue {
            field: "date",
            value: raw.to_string(),
        });
    }
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Normalizes a clock time to canonical 24-hour `HH:MM`.
///
/// Accepts an hour with an optional `:MM` part and an optional `am`/`pm`
/// suffix in any case, e.g. `9`, `9:30`, `7pm`, `12:05 AM`. With a meridiem
/// the hour must be 1-12 (`12am` is midnight, `12pm` is noon); without one it
/// must be 0-23. Minutes must be two digits and below 60. A shape the grammar
/// does not match is an `InvalidFormat` error; a matching shape with an hour
/// or minute out of range is `InvalidValue`. Canonical input normalizes to
/// itself.
pub fn normalize_time(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();

    let caps = TIME_RE
        .captures(trimmed)
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "time",
            value: raw.to_string(),
        })?;

    let out_of_range = || ValidationError::InvalidValue {
        field: "time",
        value: raw.to_string(),
    };

    let mut hour: u32 = caps[1].parse().map_err(|_| out_of_range())?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().map_err(|_| out_of_range())?,
        None => 0,
    };

    match caps.get(3) {
        Some(meridiem) => {
            // 12-hour clock, so the written hour must be 1-12 before conversion.
            if !(1..=12).contains(&hour) {
                return Err(out_of_range());
            }
            if meridiem.as_str().eq_ignore_ascii_case("pm") && hour != 12 {
                hour += 12;
            } else if meridiem.as_str().eq_ignore_ascii_case("am") && hour == 12 {
                hour = 0;
            }
        }
        None => {
            if hour > 23 {
                return Err(out_of_range());
            }
        }
    }

    if minute > 59 {
        return Err(out_of_range());
    }

    Ok(format!("{:02}:{:02}", hour, minute))
}
