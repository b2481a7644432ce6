use chrono::NaiveDateTime;
use serde::Serialize;

use crate::utils::time::format_datetime;

/// Lifecycle status of a work session. The transition is one-way.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
}

impl SessionStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SessionStatus::Active),
            "completed" => Some(SessionStatus::Completed),
            _ => None,
        }
    }
}

/// A single pause inside a work session. `end == None` while the break is running.
#[derive(Debug, Clone, Serialize)]
pub struct BreakPeriod {
    pub id: i64,
    pub session_id: i64,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

impl BreakPeriod {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// Totals frozen at session close.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSnapshot {
    pub working_seconds: i64,
    pub break_seconds: i64,
    pub total_earnings: f64,
    pub total_cases: i64,
    pub average_hourly_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkSession {
    pub id: i64,
    pub start: NaiveDateTime,       // ⇔ sessions.start_time (TEXT "YYYY-MM-DD HH:MM:SS")
    pub end: Option<NaiveDateTime>, // ⇔ sessions.end_time (NULL while active)
    pub status: SessionStatus,
    pub snapshot: Option<SessionSnapshot>,
    pub created_at: String,
}

impl WorkSession {
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// End of the evaluation window: the stored end, or `now` while still open.
    pub fn horizon(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.end.unwrap_or(now)
    }

    /// Wall-clock seconds between start and horizon, never negative.
    pub fn elapsed_seconds(&self, now: NaiveDateTime) -> i64 {
        (self.horizon(now) - self.start).num_seconds().max(0)
    }

    pub fn start_str(&self) -> String {
        format_datetime(&self.start)
    }

    pub fn end_str(&self) -> String {
        self.end
            .as_ref()
            .map(format_datetime)
            .unwrap_or_else(|| "--".to_string())
    }
}
