//! Explicit state machine for the driver's work status.
//!
//! The state is always derived from persisted data (latest session + its
//! breaks) and advanced through [`WorkState::apply`]. Breaks form an ordered,
//! non-overlapping sequence inside the session.

use chrono::NaiveDateTime;

use crate::errors::{AppError, AppResult};
use crate::models::session::{BreakPeriod, WorkSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkState {
    Idle,
    Working {
        session_id: i64,
        since: NaiveDateTime,
        /// session start, or the end of the latest closed break
        resumed_at: NaiveDateTime,
    },
    OnBreak {
        session_id: i64,
        since: NaiveDateTime,
        break_since: NaiveDateTime,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkEvent {
    Start { at: NaiveDateTime },
    ToggleBreak { at: NaiveDateTime },
    End { at: NaiveDateTime },
}

/// Side effect the caller must persist for an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    OpenSession {
        at: NaiveDateTime,
    },
    OpenBreak {
        session_id: i64,
        at: NaiveDateTime,
    },
    CloseBreak {
        session_id: i64,
        at: NaiveDateTime,
    },
    CloseSession {
        session_id: i64,
        at: NaiveDateTime,
        /// set when a running break has to be closed at the same instant
        close_break: bool,
    },
}

impl WorkState {
    /// Build the current state from the latest session and its breaks.
    pub fn from_session(session: Option<&WorkSession>, breaks: &[BreakPeriod]) -> Self {
        match session {
            Some(s) if s.is_active() => match breaks.iter().rev().find(|b| b.is_open()) {
                Some(b) => WorkState::OnBreak {
                    session_id: s.id,
                    since: s.start,
                    break_since: b.start,
                },
                None => WorkState::Working {
                    session_id: s.id,
                    since: s.start,
                    resumed_at: breaks
                        .iter()
                        .filter_map(|b| b.end)
                        .fold(s.start, NaiveDateTime::max),
                },
            },
            _ => WorkState::Idle,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkState::Idle => "idle",
            WorkState::Working { .. } => "working",
            WorkState::OnBreak { .. } => "on break",
        }
    }

    pub fn session_id(&self) -> Option<i64> {
        match self {
            WorkState::Idle => None,
            WorkState::Working { session_id, .. } | WorkState::OnBreak { session_id, .. } => {
                Some(*session_id)
            }
        }
    }

    /// Transition function. Returns the side effect to persist; the next state
    /// is re-derived from storage afterwards.
    pub fn apply(&self, event: WorkEvent) -> AppResult<Transition> {
        match (*self, event) {
            (WorkState::Idle, WorkEvent::Start { at }) => Ok(Transition::OpenSession { at }),

            (
                WorkState::Working {
                    session_id,
                    resumed_at,
                    ..
                },
                WorkEvent::ToggleBreak { at },
            ) => {
                ensure_after(resumed_at, at, "start a break")?;
                Ok(Transition::OpenBreak { session_id, at })
            }

            (
                WorkState::OnBreak {
                    session_id,
                    break_since,
                    ..
                },
                WorkEvent::ToggleBreak { at },
            ) => {
                ensure_after(break_since, at, "end the break")?;
                Ok(Transition::CloseBreak { session_id, at })
            }

            (
                WorkState::Working {
                    session_id,
                    since,
                    resumed_at,
                },
                WorkEvent::End { at },
            ) => {
                ensure_after(since, at, "end the session")?;
                ensure_not_before(resumed_at, at, "end the session")?;
                Ok(Transition::CloseSession {
                    session_id,
                    at,
                    close_break: false,
                })
            }

            (
                WorkState::OnBreak {
                    session_id,
                    since,
                    break_since,
                },
                WorkEvent::End { at },
            ) => {
                ensure_after(since, at, "end the session")?;
                ensure_after(break_since, at, "end the session")?;
                Ok(Transition::CloseSession {
                    session_id,
                    at,
                    close_break: true,
                })
            }

            (state, event) => Err(AppError::InvalidTransition {
                action: event.action(),
                state: state.label(),
            }),
        }
    }
}

impl WorkEvent {
    fn action(&self) -> &'static str {
        match self {
            WorkEvent::Start { .. } => "start a session",
            WorkEvent::ToggleBreak { .. } => "toggle a break",
            WorkEvent::End { .. } => "end a session",
        }
    }
}

fn ensure_not_before(reference: NaiveDateTime, at: NaiveDateTime, what: &str) -> AppResult<()> {
    if at < reference {
        return Err(AppError::InvalidTime(format!(
            "Cannot {what} at {}: the last break ended at {}.",
            at.format("%Y-%m-%d %H:%M:%S"),
            reference.format("%Y-%m-%d %H:%M:%S")
        )));
    }
    Ok(())
}

fn ensure_after(reference: NaiveDateTime, at: NaiveDateTime, what: &str) -> AppResult<()> {
    if at <= reference {
        return Err(AppError::InvalidTime(format!(
            "Cannot {what} at {}: must be later than {}.",
            at.format("%Y-%m-%d %H:%M:%S"),
            reference.format("%Y-%m-%d %H:%M:%S")
        )));
    }
    Ok(())
}
