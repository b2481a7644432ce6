use chrono::NaiveDateTime;
use serde::Serialize;

/// One GPS sample of an imported route.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: NaiveDateTime,
    /// km/h, when the producer reported it
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteStats {
    pub total_distance_meters: f64,
    pub duration_seconds: i64,
    pub average_speed_kmh: f64,
    pub max_speed_kmh: f64,
}

/// A stored route summary, optionally attached to a session.
#[derive(Debug, Clone, Serialize)]
pub struct DriveLog {
    pub id: i64,
    pub session_id: Option<i64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub stats: RouteStats,
    pub points: i64,
    pub created_at: String,
}
