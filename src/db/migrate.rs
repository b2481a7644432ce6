//! Schema management.
//!
//! Every schema change is a named migration applied at most once. Applied
//! migrations are recorded in the `log` table as `migration_applied` rows,
//! keyed by their version string.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, params};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250601_0001_base_schema",
        description: "Created sessions, breaks and deliveries tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time  TEXT NOT NULL,
            end_time    TEXT,
            status      TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','completed')),
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS breaks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id  INTEGER NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
            start_time  TEXT NOT NULL,
            end_time    TEXT
        );

        CREATE TABLE IF NOT EXISTS deliveries (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id        INTEGER NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
            service           TEXT NOT NULL,
            earnings          REAL NOT NULL CHECK(earnings >= 0 AND earnings <= 100000),
            tip               REAL NOT NULL DEFAULT 0 CHECK(tip >= 0 AND tip <= 50000),
            duration_minutes  INTEGER NOT NULL CHECK(duration_minutes > 0 AND duration_minutes <= 480),
            timestamp         TEXT NOT NULL,
            memo              TEXT,
            source            TEXT NOT NULL DEFAULT 'cli',
            created_at        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_start ON sessions(start_time);
        CREATE INDEX IF NOT EXISTS idx_breaks_session ON breaks(session_id);
        CREATE INDEX IF NOT EXISTS idx_deliveries_session ON deliveries(session_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_deliveries_timestamp ON deliveries(timestamp);
        "#,
    },
    Migration {
        version: "20250715_0002_session_snapshot",
        description: "Added close-time totals to sessions",
        sql: r#"
        ALTER TABLE sessions ADD COLUMN total_working_seconds INTEGER;
        ALTER TABLE sessions ADD COLUMN total_break_seconds INTEGER;
        ALTER TABLE sessions ADD COLUMN total_earnings REAL;
        ALTER TABLE sessions ADD COLUMN total_cases INTEGER;
        ALTER TABLE sessions ADD COLUMN average_hourly_rate REAL;
        "#,
    },
    Migration {
        version: "20250902_0003_drive_logs",
        description: "Created drive_logs table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS drive_logs (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id         INTEGER REFERENCES sessions(id) ON DELETE SET NULL,
            start_time         TEXT NOT NULL,
            end_time           TEXT NOT NULL,
            distance_meters    REAL NOT NULL DEFAULT 0,
            duration_seconds   INTEGER NOT NULL DEFAULT 0,
            average_speed_kmh  REAL NOT NULL DEFAULT 0,
            max_speed_kmh      REAL NOT NULL DEFAULT 0,
            points             INTEGER NOT NULL DEFAULT 0,
            created_at         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_drive_logs_session ON drive_logs(session_id);
        "#,
    },
];

/// Ensure that the `log` table exists; it also stores the migration ledger.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now', 'localtime'), 'migration_applied', ?1, ?2)",
        params![m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Versions of all known migrations that are not recorded yet.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations in order.
///
/// Invoked by `db::initialize::init_db()`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        apply(conn, m)?;
        log::debug!("migration applied: {}", m.version);
        success(format!("Migration applied: {} → {}", m.version, m.description));
    }

    Ok(())
}
