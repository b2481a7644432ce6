#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::env;
use std::fs;
use std::path::PathBuf;

use rdashlog::models::delivery::DeliveryRecord;
use rdashlog::models::session::{BreakPeriod, SessionStatus, WorkSession};

pub fn rdl() -> Command {
    cargo_bin_cmd!("rdashlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdashlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Local wall-clock time `minutes` ago, in the CLI's `--at` format.
pub fn ago(minutes: i64) -> String {
    (Local::now().naive_local() - Duration::minutes(minutes))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn init_db(db_path: &str) {
    rdl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Closed session of four hours with two deliveries:
/// Uber Eats ¥1,000 (30 min) and Demae-can ¥800 + ¥200 tip (20 min).
pub fn init_db_with_session(db_path: &str) {
    init_db(db_path);

    rdl()
        .args(["--db", db_path, "start", "--at", &ago(250)])
        .assert()
        .success();

    rdl()
        .args([
            "--db", db_path, "add", "--earnings", "1000", "--duration", "30", "--at", &ago(200),
        ])
        .assert()
        .success();

    rdl()
        .args([
            "--db",
            db_path,
            "add",
            "--earnings",
            "800",
            "--tip",
            "200",
            "--duration",
            "20",
            "--service",
            "Demae-can",
            "--at",
            &ago(120),
        ])
        .assert()
        .success();

    rdl()
        .args(["--db", db_path, "end", "--at", &ago(10)])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// Fixtures for the library-level tests
// ---------------------------------------------------------------------------

pub fn dt(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 2)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

pub fn record(
    id: i64,
    service: &str,
    at: NaiveDateTime,
    minutes: u32,
    earnings: f64,
    tip: f64,
) -> DeliveryRecord {
    DeliveryRecord {
        id,
        session_id: 1,
        service: service.to_string(),
        earnings,
        tip,
        duration_minutes: minutes,
        timestamp: at,
        memo: None,
        source: "cli".to_string(),
        created_at: String::new(),
    }
}

pub fn session(start: NaiveDateTime, end: Option<NaiveDateTime>) -> WorkSession {
    WorkSession {
        id: 1,
        start,
        end,
        status: if end.is_some() {
            SessionStatus::Completed
        } else {
            SessionStatus::Active
        },
        snapshot: None,
        created_at: String::new(),
    }
}

pub fn pause(id: i64, start: NaiveDateTime, end: Option<NaiveDateTime>) -> BreakPeriod {
    BreakPeriod {
        id,
        session_id: 1,
        start,
        end,
    }
}
