use serde::Serialize;

use crate::core::calculator::aggregate::Aggregate;
use crate::core::calculator::waiting::WaitingBreakdown;

/// Everything derived for one session at a given instant.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SessionSummary {
    pub elapsed_seconds: i64,
    pub break_seconds: i64,
    pub working_seconds: i64,
    pub totals: Aggregate,
    pub hourly_rate: f64,
    pub waiting: WaitingBreakdown,
    pub coarse_waiting_seconds: i64,
}
