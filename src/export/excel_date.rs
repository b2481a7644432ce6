use chrono::{NaiveDate, NaiveDateTime};

use crate::utils::time::parse_db_datetime;

/// Stored timestamp → Excel serial number (days since 1899-12-30).
pub(crate) fn to_excel_serial(s: &str) -> Option<f64> {
    let dt = parse_db_datetime(s)?;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    Some(serial_since(&dt, &epoch))
}

fn serial_since(dt: &NaiveDateTime, epoch: &NaiveDateTime) -> f64 {
    let duration = *dt - *epoch;
    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;
    days + secs / 86400.0
}
