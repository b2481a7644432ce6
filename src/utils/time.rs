//! Time utilities: parsing CLI date-times, DB round-trips, formatting seconds.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, NaiveTime};

/// Storage format for every timestamp column.
pub const DB_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Accepts `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]` or `HH:MM` (today).
pub fn parse_datetime(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();

    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Ok(Local::now().date_naive().and_time(t));
    }

    Err(AppError::InvalidTime(s.to_string()))
}

/// `--at` option: explicit value or the current local time.
pub fn parse_optional_datetime(input: Option<&String>) -> AppResult<NaiveDateTime> {
    match input {
        Some(s) => parse_datetime(s),
        None => Ok(now()),
    }
}

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DB_DATETIME_FORMAT).to_string()
}

pub fn parse_db_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DB_DATETIME_FORMAT).ok()
}
