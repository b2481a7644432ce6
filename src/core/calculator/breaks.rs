//! Break and net working time.

use chrono::NaiveDateTime;

use crate::models::session::{BreakPeriod, WorkSession};

/// Total break seconds inside `[window_start, horizon]`.
/// A running break counts up to `horizon`.
pub fn break_seconds(
    breaks: &[BreakPeriod],
    window_start: NaiveDateTime,
    horizon: NaiveDateTime,
) -> i64 {
    breaks
        .iter()
        .map(|b| {
            let start = b.start.max(window_start);
            let end = b.end.unwrap_or(horizon).min(horizon);
            (end - start).num_seconds().max(0)
        })
        .sum()
}

/// Elapsed session time minus breaks, never negative.
/// The horizon is the session end, or `now` while the session is open.
pub fn working_seconds(session: &WorkSession, breaks: &[BreakPeriod], now: NaiveDateTime) -> i64 {
    let horizon = session.horizon(now);
    (session.elapsed_seconds(now) - break_seconds(breaks, session.start, horizon)).max(0)
}
