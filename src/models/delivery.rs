use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// A logged delivery ("case"). Immutable once stored.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryRecord {
    pub id: i64,
    pub session_id: i64,
    pub service: String,
    pub earnings: f64,
    pub tip: f64,
    pub duration_minutes: u32,
    pub timestamp: NaiveDateTime,
    pub memo: Option<String>,
    pub source: String,
    pub created_at: String,
}

impl DeliveryRecord {
    /// Earnings plus tip.
    pub fn total(&self) -> f64 {
        self.earnings + self.tip
    }

    /// Declared end of the occupied interval.
    pub fn end(&self) -> NaiveDateTime {
        self.timestamp + Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// Validated input for a delivery that is not stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDelivery {
    pub service: String,
    pub earnings: f64,
    pub tip: f64,
    pub duration_minutes: u32,
    pub timestamp: NaiveDateTime,
    pub memo: Option<String>,
}
