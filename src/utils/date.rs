//! Period resolution for `list`, `stats` and `export`.
//!
//! Grammar:
//! - `today`, `week` (Monday → Sunday), `month`, `all`
//! - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
//! - `A:B` where both sides use the same one of the three formats above

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Inclusive date-time bounds of a period; `None` means no filter (`all`).
pub type Bounds = Option<(NaiveDateTime, NaiveDateTime)>;

pub fn resolve_period(p: &str, today: NaiveDate) -> AppResult<Bounds> {
    let p = p.trim();
    let (from, to) = match p.to_ascii_lowercase().as_str() {
        "all" => return Ok(None),
        "today" => (today, today),
        "week" => week_bounds(today),
        "month" => {
            let first = first_of_month(today.year(), today.month())?;
            (first, last_of_month(first))
        }
        _ => parse_range(p)?,
    };

    if to < from {
        return Err(AppError::InvalidDate(format!(
            "{p}: end of range is before its start"
        )));
    }

    Ok(Some(day_bounds(from, to)))
}

/// Monday..=Sunday of the week containing `day`.
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from_monday = i64::from(day.weekday().num_days_from_monday());
    let monday = day - Duration::days(from_monday);
    (monday, monday + Duration::days(6))
}

/// 00:00:00 of `from` to 23:59:59 of `to`.
pub fn day_bounds(from: NaiveDate, to: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    (from.and_time(NaiveTime::MIN), to.and_time(end_of_day))
}

/// Parse `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or a `A:B` range of them.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{r}: start and end must have the same format"
            )));
        }

        let (from, _) = parse_single(start)?;
        let (_, to) = parse_single(end)?;
        Ok((from, to))
    } else {
        parse_single(r.trim())
    }
}

fn parse_single(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(s.to_string());

    match s.len() {
        // YYYY
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
        // YYYY-MM
        7 => {
            let first =
                NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((first, last_of_month(first)))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn first_of_month(year: i32, month: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(first)
}
