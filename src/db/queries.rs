use crate::errors::{AppError, AppResult};
use crate::models::delivery::{DeliveryRecord, NewDelivery};
use crate::models::drive_log::{DriveLog, RouteStats};
use crate::models::session::{BreakPeriod, SessionSnapshot, SessionStatus, WorkSession};
use crate::utils::date::Bounds;
use crate::utils::time::{format_datetime, parse_db_datetime};
use chrono::{Local, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SESSION_COLUMNS: &str = "id, start_time, end_time, status, created_at, \
     total_working_seconds, total_break_seconds, total_earnings, total_cases, average_hourly_rate";

const DELIVERY_COLUMNS: &str = "id, session_id, service, earnings, tip, duration_minutes, \
     timestamp, memo, source, created_at";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn get_datetime(row: &Row, col: &str) -> Result<NaiveDateTime> {
    let raw: String = row.get(col)?;
    parse_db_datetime(&raw).ok_or_else(|| conversion_error(0, AppError::InvalidTime(raw)))
}

fn get_optional_datetime(row: &Row, col: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_db_datetime(&s)
            .map(Some)
            .ok_or_else(|| conversion_error(0, AppError::InvalidTime(s))),
    }
}

fn created_now() -> String {
    Local::now().to_rfc3339()
}

fn collect<T>(rows: impl Iterator<Item = Result<T>>) -> AppResult<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

pub fn map_session_row(row: &Row) -> Result<WorkSession> {
    let status_str: String = row.get("status")?;
    let status = SessionStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(
            0,
            AppError::Other(format!("Invalid session status: {status_str}")),
        )
    })?;

    let snapshot = match row.get::<_, Option<i64>>("total_working_seconds")? {
        Some(working_seconds) => Some(SessionSnapshot {
            working_seconds,
            break_seconds: row
                .get::<_, Option<i64>>("total_break_seconds")?
                .unwrap_or(0),
            total_earnings: row.get::<_, Option<f64>>("total_earnings")?.unwrap_or(0.0),
            total_cases: row.get::<_, Option<i64>>("total_cases")?.unwrap_or(0),
            average_hourly_rate: row
                .get::<_, Option<f64>>("average_hourly_rate")?
                .unwrap_or(0.0),
        }),
        None => None,
    };

    Ok(WorkSession {
        id: row.get("id")?,
        start: get_datetime(row, "start_time")?,
        end: get_optional_datetime(row, "end_time")?,
        status,
        snapshot,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_session(conn: &Connection, start: &NaiveDateTime) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sessions (start_time, status, created_at) VALUES (?1, ?2, ?3)",
        params![
            format_datetime(start),
            SessionStatus::Active.to_db_str(),
            created_now()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Set end time, status and the close-time totals in one statement.
pub fn close_session(
    conn: &Connection,
    id: i64,
    end: &NaiveDateTime,
    snapshot: &SessionSnapshot,
) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE sessions
         SET end_time = ?1, status = 'completed',
             total_working_seconds = ?2, total_break_seconds = ?3,
             total_earnings = ?4, total_cases = ?5, average_hourly_rate = ?6
         WHERE id = ?7 AND status = 'active'",
        params![
            format_datetime(end),
            snapshot.working_seconds,
            snapshot.break_seconds,
            snapshot.total_earnings,
            snapshot.total_cases,
            snapshot.average_hourly_rate,
            id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::SessionNotFound(id));
    }
    Ok(())
}

pub fn session_by_id(conn: &Connection, id: i64) -> AppResult<Option<WorkSession>> {
    let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_session_row).optional()?)
}

pub fn latest_session(conn: &Connection) -> AppResult<Option<WorkSession>> {
    let sql = format!(
        "SELECT {SESSION_COLUMNS} FROM sessions ORDER BY start_time DESC, id DESC LIMIT 1"
    );
    Ok(conn.query_row(&sql, [], map_session_row).optional()?)
}

pub fn active_session(conn: &Connection) -> AppResult<Option<WorkSession>> {
    let sql = format!(
        "SELECT {SESSION_COLUMNS} FROM sessions WHERE status = 'active'
         ORDER BY start_time DESC, id DESC LIMIT 1"
    );
    Ok(conn.query_row(&sql, [], map_session_row).optional()?)
}

/// Sessions whose start falls within `bounds`, oldest first.
pub fn load_sessions(conn: &Connection, bounds: &Bounds) -> AppResult<Vec<WorkSession>> {
    match bounds {
        Some((from, to)) => {
            let sql = format!(
                "SELECT {SESSION_COLUMNS} FROM sessions
                 WHERE start_time BETWEEN ?1 AND ?2
                 ORDER BY start_time ASC, id ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(
                params![format_datetime(from), format_datetime(to)],
                map_session_row,
            )?;
            collect(rows)
        }
        None => {
            let sql =
                format!("SELECT {SESSION_COLUMNS} FROM sessions ORDER BY start_time ASC, id ASC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], map_session_row)?;
            collect(rows)
        }
    }
}

/// Deletes the session; breaks and deliveries follow through ON DELETE CASCADE.
pub fn delete_session(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?)
}

// ---------------------------------------------------------------------------
// Breaks
// ---------------------------------------------------------------------------

fn map_break_row(row: &Row) -> Result<BreakPeriod> {
    Ok(BreakPeriod {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        start: get_datetime(row, "start_time")?,
        end: get_optional_datetime(row, "end_time")?,
    })
}

pub fn insert_break(conn: &Connection, session_id: i64, start: &NaiveDateTime) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO breaks (session_id, start_time) VALUES (?1, ?2)",
        params![session_id, format_datetime(start)],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Close the running break of a session, if any. Returns the number of rows updated.
pub fn close_open_break(
    conn: &Connection,
    session_id: i64,
    end: &NaiveDateTime,
) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE breaks SET end_time = ?1 WHERE session_id = ?2 AND end_time IS NULL",
        params![format_datetime(end), session_id],
    )?)
}

pub fn load_breaks(conn: &Connection, session_id: i64) -> AppResult<Vec<BreakPeriod>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, session_id, start_time, end_time FROM breaks
         WHERE session_id = ?1
         ORDER BY start_time ASC, id ASC",
    )?;
    let rows = stmt.query_map([session_id], map_break_row)?;
    collect(rows)
}

// ---------------------------------------------------------------------------
// Deliveries
// ---------------------------------------------------------------------------

pub fn map_delivery_row(row: &Row) -> Result<DeliveryRecord> {
    Ok(DeliveryRecord {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        service: row.get("service")?,
        earnings: row.get("earnings")?,
        tip: row.get("tip")?,
        duration_minutes: row.get("duration_minutes")?,
        timestamp: get_datetime(row, "timestamp")?,
        memo: row.get("memo")?,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_delivery(conn: &Connection, session_id: i64, d: &NewDelivery) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO deliveries (session_id, service, earnings, tip, duration_minutes, timestamp, memo, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'cli', ?8)",
        params![
            session_id,
            d.service,
            d.earnings,
            d.tip,
            d.duration_minutes,
            format_datetime(&d.timestamp),
            d.memo,
            created_now(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delivery_by_id(conn: &Connection, id: i64) -> AppResult<Option<DeliveryRecord>> {
    let sql = format!("SELECT {DELIVERY_COLUMNS} FROM deliveries WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_delivery_row).optional()?)
}

pub fn load_deliveries_by_session(
    conn: &Connection,
    session_id: i64,
) -> AppResult<Vec<DeliveryRecord>> {
    let sql = format!(
        "SELECT {DELIVERY_COLUMNS} FROM deliveries
         WHERE session_id = ?1
         ORDER BY timestamp ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([session_id], map_delivery_row)?;
    collect(rows)
}

/// Deliveries whose timestamp falls within `bounds`, oldest first.
pub fn load_deliveries(conn: &Connection, bounds: &Bounds) -> AppResult<Vec<DeliveryRecord>> {
    match bounds {
        Some((from, to)) => {
            let sql = format!(
                "SELECT {DELIVERY_COLUMNS} FROM deliveries
                 WHERE timestamp BETWEEN ?1 AND ?2
                 ORDER BY timestamp ASC, id ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(
                params![format_datetime(from), format_datetime(to)],
                map_delivery_row,
            )?;
            collect(rows)
        }
        None => {
            let sql =
                format!("SELECT {DELIVERY_COLUMNS} FROM deliveries ORDER BY timestamp ASC, id ASC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], map_delivery_row)?;
            collect(rows)
        }
    }
}

pub fn count_deliveries(conn: &Connection, session_id: i64) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM deliveries WHERE session_id = ?1",
        [session_id],
        |row| row.get(0),
    )?)
}

pub fn delete_delivery(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM deliveries WHERE id = ?1", [id])?)
}

// ---------------------------------------------------------------------------
// Drive logs
// ---------------------------------------------------------------------------

fn map_drive_log_row(row: &Row) -> Result<DriveLog> {
    Ok(DriveLog {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        start: get_datetime(row, "start_time")?,
        end: get_datetime(row, "end_time")?,
        stats: RouteStats {
            total_distance_meters: row.get("distance_meters")?,
            duration_seconds: row.get("duration_seconds")?,
            average_speed_kmh: row.get("average_speed_kmh")?,
            max_speed_kmh: row.get("max_speed_kmh")?,
        },
        points: row.get("points")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_drive_log(
    conn: &Connection,
    session_id: Option<i64>,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
    stats: &RouteStats,
    points: usize,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO drive_logs (session_id, start_time, end_time, distance_meters, duration_seconds,
                                 average_speed_kmh, max_speed_kmh, points, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            session_id,
            format_datetime(start),
            format_datetime(end),
            stats.total_distance_meters,
            stats.duration_seconds,
            stats.average_speed_kmh,
            stats.max_speed_kmh,
            points as i64,
            created_now(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_drive_logs(conn: &Connection) -> AppResult<Vec<DriveLog>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, start_time, end_time, distance_meters, duration_seconds,
                average_speed_kmh, max_speed_kmh, points, created_at
         FROM drive_logs ORDER BY start_time ASC, id ASC",
    )?;
    let rows = stmt.query_map([], map_drive_log_row)?;
    collect(rows)
}
