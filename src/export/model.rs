use serde::Serialize;

use crate::models::delivery::DeliveryRecord;
use crate::utils::time::format_datetime;

/// Flat row written by every export format.
#[derive(Serialize, Clone, Debug)]
pub struct DeliveryExport {
    pub id: i64,
    pub session_id: i64,
    pub timestamp: String,
    pub service: String,
    pub earnings: f64,
    pub tip: f64,
    pub total: f64,
    pub duration_minutes: u32,
    pub memo: String,
    pub source: String,
}

impl From<&DeliveryRecord> for DeliveryExport {
    fn from(r: &DeliveryRecord) -> Self {
        Self {
            id: r.id,
            session_id: r.session_id,
            timestamp: format_datetime(&r.timestamp),
            service: r.service.clone(),
            earnings: r.earnings,
            tip: r.tip,
            total: r.total(),
            duration_minutes: r.duration_minutes,
            memo: r.memo.clone().unwrap_or_default(),
            source: r.source.clone(),
        }
    }
}

/// Typed cell for the spreadsheet writer.
pub(crate) enum Cell<'a> {
    Int(i64),
    Number(f64),
    DateTime(&'a str),
    Text(&'a str),
}

pub(crate) const HEADERS: [&str; 10] = [
    "id",
    "session_id",
    "timestamp",
    "service",
    "earnings",
    "tip",
    "total",
    "duration_minutes",
    "memo",
    "source",
];

pub(crate) fn export_to_cells(e: &DeliveryExport) -> [Cell<'_>; 10] {
    [
        Cell::Int(e.id),
        Cell::Int(e.session_id),
        Cell::DateTime(&e.timestamp),
        Cell::Text(&e.service),
        Cell::Number(e.earnings),
        Cell::Number(e.tip),
        Cell::Number(e.total),
        Cell::Int(i64::from(e.duration_minutes)),
        Cell::Text(&e.memo),
        Cell::Text(&e.source),
    ]
}
