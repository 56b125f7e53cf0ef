//! Date parsing for campaign `sent` values and host date ranges.
//!
//! Accepted forms, fixed width:
//! - `YYYY-MM-DD`
//! - `YYYY-MM-DD HH:MM:SS` (any single ASCII whitespace between date and time)

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ConnectorError, Result};

const DATE_LEN: usize = 10;
const DATE_TIME_LEN: usize = 19;

/// Parses a date or date-time. A bare date is midnight.
pub fn parse_date(input: &str) -> Result<NaiveDateTime> {
    let invalid = || ConnectorError::InvalidDate(input.to_string());
    let bytes = input.as_bytes();

    let date = match bytes.len() {
        DATE_LEN | DATE_TIME_LEN => parse_ymd(&bytes[..DATE_LEN]).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };

    if bytes.len() == DATE_LEN {
        return date.and_hms_opt(0, 0, 0).ok_or_else(invalid);
    }

    if !bytes[DATE_LEN].is_ascii_whitespace() {
        return Err(invalid());
    }
    let time = parse_hms(&bytes[DATE_LEN + 1..]).ok_or_else(invalid)?;
    Ok(date.and_time(time))
}

/// Inclusive bounds for a host date range: start of `start`, `23:59:59` on `end`.
///
/// A time on `end` is discarded; a time on `start` is kept.
pub fn day_bounds(start: &str, end: &str) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let from = parse_date(start)?;
    let until = parse_date(end)?
        .date()
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| ConnectorError::InvalidDate(end.to_string()))?;
    Ok((from, until))
}

// `dddd-dd-dd`
fn parse_ymd(bytes: &[u8]) -> Option<NaiveDate> {
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let year = digits(&bytes[0..4])?;
    let month = digits(&bytes[5..7])?;
    let day = digits(&bytes[8..10])?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

// `dd:dd:dd`
fn parse_hms(bytes: &[u8]) -> Option<NaiveTime> {
    if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }
    let hour = digits(&bytes[0..2])?;
    let minute = digits(&bytes[3..5])?;
    let second = digits(&bytes[6..8])?;
    NaiveTime::from_hms_opt(hour, minute, second)
}

fn digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}
