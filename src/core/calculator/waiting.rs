//! Waiting ("idle") time resolver.
//!
//! Splits the span between session start and horizon into time not covered by
//! any delivery's declared duration: before the first delivery, between
//! deliveries, after the last one. Every bucket is clamped at zero.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::models::delivery::DeliveryRecord;

/// All values are whole seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaitingBreakdown {
    pub total_waiting_seconds: i64,
    pub before_first_case: i64,
    pub between_cases: i64,
    pub after_last_case: i64,
}

/// Resolve against the local clock when the session is still open.
pub fn resolve_waiting_time(
    session_start: NaiveDateTime,
    session_end: Option<NaiveDateTime>,
    records: &[DeliveryRecord],
) -> WaitingBreakdown {
    resolve_waiting_time_at(
        session_start,
        session_end,
        records,
        Local::now().naive_local(),
    )
}

/// `now` is only used as horizon when `session_end` is `None`.
pub fn resolve_waiting_time_at(
    session_start: NaiveDateTime,
    session_end: Option<NaiveDateTime>,
    records: &[DeliveryRecord],
    now: NaiveDateTime,
) -> WaitingBreakdown {
    let horizon = session_end.unwrap_or(now);

    // stable: equal timestamps keep input order
    let mut sorted: Vec<&DeliveryRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        let before = seconds_between(session_start, horizon);
        return WaitingBreakdown {
            total_waiting_seconds: before,
            before_first_case: before,
            between_cases: 0,
            after_last_case: 0,
        };
    };

    let before_first_case = seconds_between(session_start, first.timestamp);

    let between_cases = sorted
        .windows(2)
        .map(|w| seconds_between(w[0].end(), w[1].timestamp))
        .sum::<i64>();

    let after_last_case = seconds_between(last.end(), horizon);

    WaitingBreakdown {
        total_waiting_seconds: before_first_case + between_cases + after_last_case,
        before_first_case,
        between_cases,
        after_last_case,
    }
}

/// Single-bucket approximation: working time minus total declared durations.
pub fn resolve_coarse_waiting_time(working_seconds: i64, records: &[DeliveryRecord]) -> i64 {
    let occupied: i64 = records
        .iter()
        .map(|r| i64::from(r.duration_minutes) * 60)
        .sum();
    (working_seconds - occupied).max(0)
}

fn seconds_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_seconds().max(0)
}
