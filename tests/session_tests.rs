use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ago, init_db, init_db_with_session, rdl, setup_test_db};

#[test]
fn test_start_break_end_cycle() {
    let db_path = setup_test_db("session_cycle");
    init_db(&db_path);

    rdl()
        .args(["--db", &db_path, "start", "--at", &ago(180)])
        .assert()
        .success()
        .stdout(contains("Session #1 started at"));

    rdl()
        .args(["--db", &db_path, "break", "--at", &ago(120)])
        .assert()
        .success()
        .stdout(contains("Break started"));

    rdl()
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("on break"));

    rdl()
        .args(["--db", &db_path, "break", "--at", &ago(90)])
        .assert()
        .success()
        .stdout(contains("Break ended"));

    rdl()
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("working").and(contains("Session #1")));

    rdl()
        .args(["--db", &db_path, "end", "--at", &ago(0)])
        .assert()
        .success()
        .stdout(contains("Session #1 ended at").and(contains("Waiting")));

    rdl()
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("idle").and(contains("No active work session")));
}

#[test]
fn test_end_while_on_break_closes_the_break() {
    let db_path = setup_test_db("end_on_break");
    init_db(&db_path);

    rdl()
        .args(["--db", &db_path, "start", "--at", &ago(60)])
        .assert()
        .success();
    rdl()
        .args(["--db", &db_path, "break", "--at", &ago(30)])
        .assert()
        .success();
    rdl()
        .args(["--db", &db_path, "end", "--at", &ago(0)])
        .assert()
        .success()
        .stdout(contains("00h 30m"));

    rdl()
        .args(["--db", &db_path, "show", "1"])
        .assert()
        .success()
        .stdout(contains("Breaks").and(contains("running").not()));
}

#[test]
fn test_invalid_transitions_are_rejected() {
    let db_path = setup_test_db("invalid_transitions");
    init_db(&db_path);

    rdl()
        .args(["--db", &db_path, "break"])
        .assert()
        .failure()
        .stderr(contains("No active work session"));

    rdl()
        .args(["--db", &db_path, "end"])
        .assert()
        .failure()
        .stderr(contains("No active work session"));

    rdl()
        .args(["--db", &db_path, "start", "--at", &ago(60)])
        .assert()
        .success();

    rdl()
        .args(["--db", &db_path, "start"])
        .assert()
        .failure()
        .stderr(contains("Invalid transition"));

    rdl()
        .args(["--db", &db_path, "end", "--at", &ago(90)])
        .assert()
        .failure()
        .stderr(contains("must be later than"));
}

#[test]
fn test_break_cannot_overlap_previous_break() {
    let db_path = setup_test_db("break_overlap");
    init_db(&db_path);

    rdl()
        .args(["--db", &db_path, "start", "--at", &ago(300)])
        .assert()
        .success();
    rdl()
        .args(["--db", &db_path, "break", "--at", &ago(240)])
        .assert()
        .success();
    rdl()
        .args(["--db", &db_path, "break", "--at", &ago(180)])
        .assert()
        .success();

    rdl()
        .args(["--db", &db_path, "break", "--at", &ago(230)])
        .assert()
        .failure()
        .stderr(contains("must be later than"));

    rdl()
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("working").and(contains("01h 00m")));
}

#[test]
fn test_end_cannot_precede_last_break() {
    let db_path = setup_test_db("end_before_break");
    init_db(&db_path);

    rdl()
        .args(["--db", &db_path, "start", "--at", &ago(300)])
        .assert()
        .success();
    rdl()
        .args(["--db", &db_path, "break", "--at", &ago(200)])
        .assert()
        .success();
    rdl()
        .args(["--db", &db_path, "break", "--at", &ago(100)])
        .assert()
        .success();

    rdl()
        .args(["--db", &db_path, "end", "--at", &ago(250)])
        .assert()
        .failure()
        .stderr(contains("the last break ended at"));

    rdl()
        .args(["--db", &db_path, "end", "--at", &ago(100)])
        .assert()
        .success()
        .stdout(contains("Breaks").and(contains("01h 40m")));
}

#[test]
fn test_start_in_the_future_is_rejected() {
    let db_path = setup_test_db("start_future");
    init_db(&db_path);

    rdl()
        .args(["--db", &db_path, "start", "--at", &ago(-60)])
        .assert()
        .failure()
        .stderr(contains("in the future"));

    rdl()
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("idle"));
}

#[test]
fn test_start_cannot_overlap_previous_session() {
    let db_path = setup_test_db("overlap_previous");
    init_db_with_session(&db_path);

    rdl()
        .args(["--db", &db_path, "start", "--at", &ago(60)])
        .assert()
        .failure()
        .stderr(contains("ended at"));

    rdl()
        .args(["--db", &db_path, "start", "--at", &ago(5)])
        .assert()
        .success()
        .stdout(contains("Session #2 started"));
}

#[test]
fn test_add_requires_active_session() {
    let db_path = setup_test_db("add_no_session");
    init_db(&db_path);

    rdl()
        .args(["--db", &db_path, "add", "--earnings", "500", "--duration", "20"])
        .assert()
        .failure()
        .stderr(contains("No active work session"));
}

#[test]
fn test_add_validation() {
    let db_path = setup_test_db("add_validation");
    init_db(&db_path);

    rdl()
        .args(["--db", &db_path, "start", "--at", &ago(60)])
        .assert()
        .success();

    rdl()
        .args(["--db", &db_path, "add", "--earnings=-1", "--duration", "20"])
        .assert()
        .failure()
        .stderr(contains("Invalid input"));

    rdl()
        .args(["--db", &db_path, "add", "--earnings", "100001", "--duration", "20"])
        .assert()
        .failure()
        .stderr(contains("earnings"));

    rdl()
        .args(["--db", &db_path, "add", "--earnings", "500", "--duration", "0"])
        .assert()
        .failure()
        .stderr(contains("duration"));

    rdl()
        .args(["--db", &db_path, "add", "--earnings", "500", "--duration", "481"])
        .assert()
        .failure()
        .stderr(contains("duration"));

    // before the session start
    rdl()
        .args([
            "--db", &db_path, "add", "--earnings", "500", "--duration", "20", "--at", &ago(90),
        ])
        .assert()
        .failure()
        .stderr(contains("before the start"));

    rdl()
        .args([
            "--db", &db_path, "add", "--earnings", "500", "--duration", "480", "--at", &ago(30),
            "--memo", "<b>ring twice</b>",
        ])
        .assert()
        .success()
        .stdout(contains("Delivery #1 added").and(contains("¥500")));
}

#[test]
fn test_add_to_closed_session_by_id() {
    let db_path = setup_test_db("add_closed_session");
    init_db_with_session(&db_path);

    rdl()
        .args([
            "--db", &db_path, "add", "--session", "1", "--earnings", "300", "--duration", "10",
            "--service", "Wolt", "--at", &ago(60),
        ])
        .assert()
        .success()
        .stdout(contains("Wolt"));

    // after the session end
    rdl()
        .args([
            "--db", &db_path, "add", "--session", "1", "--earnings", "300", "--duration", "10",
            "--at", &ago(5),
        ])
        .assert()
        .failure()
        .stderr(contains("after the end"));

    rdl()
        .args([
            "--db", &db_path, "add", "--session", "42", "--earnings", "300", "--duration", "10",
        ])
        .assert()
        .failure()
        .stderr(contains("Work session #42 not found"));
}

#[test]
fn test_show_and_list() {
    let db_path = setup_test_db("show_list");
    init_db_with_session(&db_path);

    rdl()
        .args(["--db", &db_path, "show", "1"])
        .assert()
        .success()
        .stdout(
            contains("Session #1")
                .and(contains("Uber Eats"))
                .and(contains("Demae-can"))
                .and(contains("¥2,000"))
                .and(contains("before first")),
        );

    rdl()
        .args(["--db", &db_path, "list", "--period", "all", "--details"])
        .assert()
        .success()
        .stdout(
            contains("1 session(s), 2 case(s), ¥2,000")
                .and(contains("Session #1 deliveries")),
        );

    rdl()
        .args(["--db", &db_path, "show", "99"])
        .assert()
        .failure()
        .stderr(contains("Work session #99 not found"));
}

#[test]
fn test_status_last_shows_closed_session() {
    let db_path = setup_test_db("status_last");
    init_db_with_session(&db_path);

    rdl()
        .args(["--db", &db_path, "status", "--last"])
        .assert()
        .success()
        .stdout(contains("Session #1").and(contains("¥2,000")));
}

#[test]
fn test_stats_by_service() {
    let db_path = setup_test_db("stats_by_service");
    init_db_with_session(&db_path);

    rdl()
        .args(["--db", &db_path, "stats", "--period", "all", "--by-service"])
        .assert()
        .success()
        .stdout(
            contains("By service")
                .and(contains("Demae-can"))
                .and(contains("Uber Eats"))
                .and(contains("50.0%")),
        );
}

#[test]
fn test_del_delivery_with_confirmation() {
    let db_path = setup_test_db("del_delivery");
    init_db_with_session(&db_path);

    rdl()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    rdl()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Delivery #1 (Uber Eats ¥1,000) has been deleted"));

    rdl()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(contains("Delivery #1 not found"));
}

#[test]
fn test_del_session_cascades() {
    let db_path = setup_test_db("del_session");
    init_db_with_session(&db_path);

    rdl()
        .args(["--db", &db_path, "del", "--session", "1"])
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(contains("Session #1"));

    rdl()
        .args(["--db", &db_path, "show", "1"])
        .assert()
        .failure();

    rdl()
        .args(["--db", &db_path, "list", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("No sessions"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let orphans: i64 = conn
        .query_row("SELECT COUNT(*) FROM deliveries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(orphans, 0);
}
