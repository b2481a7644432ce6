use chrono::NaiveDateTime;

use crate::core::calculator::{aggregate, breaks, waiting};
use crate::models::delivery::DeliveryRecord;
use crate::models::session::{BreakPeriod, WorkSession};
use crate::models::session_summary::SessionSummary;

pub struct Core;

impl Core {
    /// Derive every figure for one session. `now` is the horizon of an open session.
    pub fn build_session_summary(
        session: &WorkSession,
        breaks: &[BreakPeriod],
        records: &[DeliveryRecord],
        now: NaiveDateTime,
    ) -> SessionSummary {
        let horizon = session.horizon(now);
        let elapsed_seconds = session.elapsed_seconds(now);
        let break_seconds = breaks::break_seconds(breaks, session.start, horizon);
        let working_seconds = breaks::working_seconds(session, breaks, now);

        let totals = aggregate::aggregate(records);
        let hourly_rate = aggregate::hourly_rate(totals.total_earnings, working_seconds);

        let waiting = waiting::resolve_waiting_time_at(session.start, session.end, records, now);
        let coarse_waiting_seconds = waiting::resolve_coarse_waiting_time(working_seconds, records);

        SessionSummary {
            elapsed_seconds,
            break_seconds,
            working_seconds,
            totals,
            hourly_rate,
            waiting,
            coarse_waiting_seconds,
        }
    }
}
