use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{init_db, init_db_with_session, rdl, setup_test_db, temp_out};

#[test]
fn test_init_applies_migrations_once() {
    let db_path = setup_test_db("init_migrations");

    rdl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("20250601_0001_base_schema").and(contains("Database initialized")));

    rdl()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Schema already up to date"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db_with_session(&db_path);

    rdl()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(
            contains("Sessions:")
                .and(contains("Deliveries:"))
                .and(contains("Average deliveries/session:"))
                .and(contains("2.00"))
                .and(contains("Integrity check passed")),
        );

    rdl()
        .args(["--db", &db_path, "db", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_log_print_shows_audit_trail() {
    let db_path = setup_test_db("log_print");
    init_db_with_session(&db_path);

    rdl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("migration_applied")
                .and(contains("init"))
                .and(contains("start"))
                .and(contains("delivery #2"))
                .and(contains("end")),
        );
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup");
    init_db_with_session(&db_path);

    let out = temp_out("backup_plain", "sqlite");
    rdl()
        .args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&out).exists());

    let out_zip_src = temp_out("backup_zip", "sqlite");
    let zip_path = out_zip_src.replace(".sqlite", ".zip");
    fs::remove_file(&zip_path).ok();

    rdl()
        .args(["--db", &db_path, "backup", "--file", &out_zip_src, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(Path::new(&zip_path).exists());
    assert!(!Path::new(&out_zip_src).exists());
}

#[test]
fn test_route_import_and_list() {
    let db_path = setup_test_db("route");
    init_db(&db_path);

    let csv_path = temp_out("route_points", "csv");
    fs::write(
        &csv_path,
        "timestamp,latitude,longitude,speed\n\
         2025-06-02 10:00:00,35.6812,139.7671,0\n\
         2025-06-02 10:10:00,35.6896,139.7006,38.5\n\
         2025-06-02 10:20:00,35.6580,139.7016,41.0\n",
    )
    .unwrap();

    rdl()
        .args(["--db", &db_path, "route", "--file", &csv_path])
        .assert()
        .success()
        .stdout(contains("Drive log #1 imported").and(contains("41.0 km/h")));

    rdl()
        .args(["--db", &db_path, "route", "--list"])
        .assert()
        .success()
        .stdout(contains("2025-06-02 10:00:00").and(contains("00h 20m")));

    rdl()
        .args(["--db", &db_path, "route", "--file", &csv_path, "--session", "7"])
        .assert()
        .failure()
        .stderr(contains("Work session #7 not found"));
}

#[test]
fn test_route_rejects_empty_file() {
    let db_path = setup_test_db("route_empty");
    init_db(&db_path);

    let csv_path = temp_out("route_empty_points", "csv");
    fs::write(&csv_path, "timestamp,latitude,longitude\n").unwrap();

    rdl()
        .args(["--db", &db_path, "route", "--file", &csv_path])
        .assert()
        .failure()
        .stderr(contains("contains no route points"));
}
