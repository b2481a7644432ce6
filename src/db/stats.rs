use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

fn count(conn: &Connection, table: &str) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}

fn first_last_session(conn: &Connection) -> AppResult<(Option<String>, Option<String>)> {
    let first: Option<String> = conn
        .query_row(
            "SELECT start_time FROM sessions ORDER BY start_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = conn
        .query_row(
            "SELECT start_time FROM sessions ORDER BY start_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok((first, last))
}

/// Print file size, row counts and the covered date range.
pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let sessions = count(&pool.conn, "sessions")?;
    let deliveries = count(&pool.conn, "deliveries")?;
    let breaks = count(&pool.conn, "breaks")?;
    let drive_logs = count(&pool.conn, "drive_logs")?;

    println!("{}• Sessions:{} {}{}{}", CYAN, RESET, GREEN, sessions, RESET);
    println!("{}• Deliveries:{} {}{}{}", CYAN, RESET, GREEN, deliveries, RESET);
    println!("{}• Breaks:{} {}{}{}", CYAN, RESET, GREEN, breaks, RESET);
    println!("{}• Drive logs:{} {}{}{}", CYAN, RESET, GREEN, drive_logs, RESET);

    let (first, last) = first_last_session(&pool.conn)?;
    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    if sessions > 0 {
        let avg = deliveries as f64 / sessions as f64;
        println!("{}• Average deliveries/session:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
