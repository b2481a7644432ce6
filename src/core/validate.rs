//! Input boundary for delivery records.
//!
//! Everything stored in `deliveries` passes through [`validate_delivery`];
//! the calculators downstream never re-check.

use chrono::{Duration, NaiveDateTime};

use crate::errors::{AppError, AppResult};
use crate::models::delivery::NewDelivery;
use crate::models::session::WorkSession;
use crate::utils::time::format_datetime;

pub const MAX_EARNINGS: f64 = 100_000.0;
pub const MAX_TIP: f64 = 50_000.0;
pub const MAX_DURATION_MINUTES: i64 = 480;
pub const MAX_SERVICE_LEN: usize = 50;
pub const MAX_MEMO_LEN: usize = 500;
pub const MAX_HISTORY_DAYS: i64 = 365;

/// Raw values as they come from the command line.
#[derive(Debug, Clone)]
pub struct DeliveryInput {
    pub service: String,
    pub earnings: f64,
    pub tip: f64,
    pub duration_minutes: i64,
    pub timestamp: NaiveDateTime,
    pub memo: Option<String>,
}

/// Trim and drop markup-sensitive characters.
pub fn sanitize_text(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '&' | '"' | '\''))
        .collect()
}

pub fn sanitize_service(input: &str) -> AppResult<String> {
    let s: String = sanitize_text(input).chars().take(MAX_SERVICE_LEN).collect();
    let s = s.trim().to_string();
    if s.is_empty() {
        return Err(AppError::Validation("service name must not be empty".into()));
    }
    Ok(s)
}

pub fn validate_earnings(value: f64) -> AppResult<f64> {
    if !value.is_finite() || !(0.0..=MAX_EARNINGS).contains(&value) {
        return Err(AppError::Validation(format!(
            "earnings must be between 0 and {MAX_EARNINGS} (got {value})"
        )));
    }
    Ok(value)
}

pub fn validate_tip(value: f64) -> AppResult<f64> {
    if !value.is_finite() || !(0.0..=MAX_TIP).contains(&value) {
        return Err(AppError::Validation(format!(
            "tip must be between 0 and {MAX_TIP} (got {value})"
        )));
    }
    Ok(value)
}

pub fn validate_duration(minutes: i64) -> AppResult<u32> {
    if minutes <= 0 || minutes > MAX_DURATION_MINUTES {
        return Err(AppError::Validation(format!(
            "duration must be between 1 and {MAX_DURATION_MINUTES} minutes (got {minutes})"
        )));
    }
    Ok(minutes as u32)
}

/// Empty memos become `None`; over-long ones are rejected.
pub fn validate_memo(memo: Option<&str>) -> AppResult<Option<String>> {
    let Some(raw) = memo else {
        return Ok(None);
    };

    let clean = sanitize_text(raw);
    if clean.chars().count() > MAX_MEMO_LEN {
        return Err(AppError::Validation(format!(
            "memo must be at most {MAX_MEMO_LEN} characters"
        )));
    }

    Ok(if clean.is_empty() { None } else { Some(clean) })
}

/// `timestamp` must lie in `[now - 1 year, now]` and inside the session span.
pub fn validate_timestamp(
    timestamp: NaiveDateTime,
    session: &WorkSession,
    now: NaiveDateTime,
) -> AppResult<NaiveDateTime> {
    let oldest = now - Duration::days(MAX_HISTORY_DAYS);

    if timestamp > now {
        return Err(AppError::Validation(format!(
            "timestamp {} is in the future",
            format_datetime(&timestamp)
        )));
    }
    if timestamp < oldest {
        return Err(AppError::Validation(format!(
            "timestamp {} is older than {MAX_HISTORY_DAYS} days",
            format_datetime(&timestamp)
        )));
    }
    if timestamp < session.start {
        return Err(AppError::Validation(format!(
            "timestamp {} is before the start of session #{} ({})",
            format_datetime(&timestamp),
            session.id,
            session.start_str()
        )));
    }
    if let Some(end) = session.end
        && timestamp > end
    {
        return Err(AppError::Validation(format!(
            "timestamp {} is after the end of session #{} ({})",
            format_datetime(&timestamp),
            session.id,
            session.end_str()
        )));
    }

    Ok(timestamp)
}

/// Sanitize and check one delivery against its session.
pub fn validate_delivery(
    input: &DeliveryInput,
    session: &WorkSession,
    now: NaiveDateTime,
) -> AppResult<NewDelivery> {
    Ok(NewDelivery {
        service: sanitize_service(&input.service)?,
        earnings: validate_earnings(input.earnings)?,
        tip: validate_tip(input.tip)?,
        duration_minutes: validate_duration(input.duration_minutes)?,
        timestamp: validate_timestamp(input.timestamp, session, now)?,
        memo: validate_memo(input.memo.as_deref())?,
    })
}
