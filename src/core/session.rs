use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::core::logic::Core;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    close_open_break, close_session, insert_break, insert_session, latest_session,
    load_breaks, load_deliveries_by_session, session_by_id,
};
use crate::errors::{AppError, AppResult};
use crate::models::session::{BreakPeriod, SessionSnapshot, WorkSession};
use crate::models::session_summary::SessionSummary;
use crate::models::work_state::{Transition, WorkEvent, WorkState};
use crate::utils::time::format_datetime;

/// Current work state plus the session it was derived from.
pub struct CurrentState {
    pub state: WorkState,
    pub session: Option<WorkSession>,
    pub breaks: Vec<BreakPeriod>,
}

pub struct SessionLogic;

impl SessionLogic {
    pub fn current(conn: &Connection) -> AppResult<CurrentState> {
        let session = latest_session(conn)?;
        let breaks = match &session {
            Some(s) => load_breaks(conn, s.id)?,
            None => Vec::new(),
        };
        let state = WorkState::from_session(session.as_ref(), &breaks);

        Ok(CurrentState {
            state,
            session,
            breaks,
        })
    }

    /// Load breaks and deliveries of `session` and derive its summary.
    pub fn summary(
        conn: &Connection,
        session: &WorkSession,
        now: NaiveDateTime,
    ) -> AppResult<SessionSummary> {
        let breaks = load_breaks(conn, session.id)?;
        let records = load_deliveries_by_session(conn, session.id)?;
        Ok(Core::build_session_summary(session, &breaks, &records, now))
    }

    /// `Idle → Working`. Returns the new session id.
    pub fn start(pool: &mut DbPool, at: NaiveDateTime, now: NaiveDateTime) -> AppResult<i64> {
        if at > now {
            return Err(AppError::InvalidTime(format!(
                "Cannot start at {}: it is in the future.",
                format_datetime(&at)
            )));
        }

        let current = Self::current(&pool.conn)?;

        let Transition::OpenSession { at } = current.state.apply(WorkEvent::Start { at })? else {
            return Err(AppError::Other("unexpected transition for start".into()));
        };

        if let Some(prev) = &current.session
            && let Some(prev_end) = prev.end
            && at < prev_end
        {
            return Err(AppError::InvalidTime(format!(
                "Cannot start at {}: session #{} ended at {}.",
                format_datetime(&at),
                prev.id,
                format_datetime(&prev_end)
            )));
        }

        let id = insert_session(&pool.conn, &at)?;
        ttlog(
            &pool.conn,
            "start",
            &format!("session #{id}"),
            &format!("Work session started at {}", format_datetime(&at)),
        )?;
        log::debug!("session {id} opened at {at}");

        Ok(id)
    }

    /// `Working ⇄ OnBreak`.
    pub fn toggle_break(pool: &mut DbPool, at: NaiveDateTime) -> AppResult<Transition> {
        let current = Self::current(&pool.conn)?;
        if current.state == WorkState::Idle {
            return Err(AppError::NoActiveSession);
        }

        let transition = current.state.apply(WorkEvent::ToggleBreak { at })?;

        match transition {
            Transition::OpenBreak { session_id, at } => {
                insert_break(&pool.conn, session_id, &at)?;
                ttlog(
                    &pool.conn,
                    "break",
                    &format!("session #{session_id}"),
                    &format!("Break started at {}", format_datetime(&at)),
                )?;
            }
            Transition::CloseBreak { session_id, at } => {
                close_open_break(&pool.conn, session_id, &at)?;
                ttlog(
                    &pool.conn,
                    "break",
                    &format!("session #{session_id}"),
                    &format!("Break ended at {}", format_datetime(&at)),
                )?;
            }
            other => {
                return Err(AppError::Other(format!(
                    "unexpected transition for break: {other:?}"
                )));
            }
        }

        Ok(transition)
    }

    /// `Working | OnBreak → Idle`. Closes a running break at the same
    /// instant and freezes the session totals.
    pub fn end(pool: &mut DbPool, at: NaiveDateTime) -> AppResult<(WorkSession, SessionSummary)> {
        let current = Self::current(&pool.conn)?;
        if current.state == WorkState::Idle {
            return Err(AppError::NoActiveSession);
        }

        let Transition::CloseSession {
            session_id,
            at,
            close_break,
        } = current.state.apply(WorkEvent::End { at })?
        else {
            return Err(AppError::Other("unexpected transition for end".into()));
        };

        let records = load_deliveries_by_session(&pool.conn, session_id)?;
        if let Some(late) = records.iter().find(|r| r.timestamp > at) {
            return Err(AppError::InvalidTime(format!(
                "Cannot end at {}: delivery #{} is logged at {}.",
                format_datetime(&at),
                late.id,
                format_datetime(&late.timestamp)
            )));
        }

        let tx = pool.conn.unchecked_transaction()?;

        if close_break {
            close_open_break(&tx, session_id, &at)?;
        }

        let mut session =
            session_by_id(&tx, session_id)?.ok_or(AppError::SessionNotFound(session_id))?;
        session.end = Some(at);

        let breaks = load_breaks(&tx, session_id)?;
        let summary = Core::build_session_summary(&session, &breaks, &records, at);

        let snapshot = SessionSnapshot {
            working_seconds: summary.working_seconds,
            break_seconds: summary.break_seconds,
            total_earnings: summary.totals.total_earnings,
            total_cases: summary.totals.count as i64,
            average_hourly_rate: summary.hourly_rate,
        };
        close_session(&tx, session_id, &at, &snapshot)?;

        ttlog(
            &tx,
            "end",
            &format!("session #{session_id}"),
            &format!(
                "Work session ended at {} ({} cases)",
                format_datetime(&at),
                snapshot.total_cases
            ),
        )?;

        tx.commit()?;

        let session = session_by_id(&pool.conn, session_id)?
            .ok_or(AppError::SessionNotFound(session_id))?;
        Ok((session, summary))
    }
}
