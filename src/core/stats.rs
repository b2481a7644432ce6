//! Period statistics for `stats` and `list`.

use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::calculator::aggregate::{self, Aggregate, ServiceTotals};
use crate::core::calculator::{breaks, waiting};
use crate::db::queries::{load_breaks, load_deliveries, load_sessions};
use crate::errors::AppResult;
use crate::utils::date::Bounds;

#[derive(Debug, Default, Clone, Serialize)]
pub struct PeriodStats {
    pub sessions: usize,
    pub working_seconds: i64,
    pub break_seconds: i64,
    pub totals: Aggregate,
    pub hourly_rate: f64,
    pub coarse_waiting_seconds: i64,
    pub by_service: BTreeMap<String, ServiceTotals>,
}

pub struct StatsLogic;

impl StatsLogic {
    /// Sessions that started in the period and deliveries logged in it.
    pub fn compute(
        conn: &Connection,
        bounds: &Bounds,
        now: NaiveDateTime,
    ) -> AppResult<PeriodStats> {
        let sessions = load_sessions(conn, bounds)?;
        let records = load_deliveries(conn, bounds)?;

        let mut working_seconds = 0;
        let mut break_seconds = 0;
        for s in &sessions {
            let bp = load_breaks(conn, s.id)?;
            working_seconds += breaks::working_seconds(s, &bp, now);
            break_seconds += breaks::break_seconds(&bp, s.start, s.horizon(now));
        }

        let totals = aggregate::aggregate(&records);
        let hourly_rate = aggregate::hourly_rate(totals.total_earnings, working_seconds);
        let coarse_waiting_seconds =
            waiting::resolve_coarse_waiting_time(working_seconds, &records);

        Ok(PeriodStats {
            sessions: sessions.len(),
            working_seconds,
            break_seconds,
            totals,
            hourly_rate,
            coarse_waiting_seconds,
            by_service: aggregate::group_by_service(&records),
        })
    }
}
