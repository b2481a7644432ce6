mod common;
use common::{dt, pause, record, session};

use rdashlog::core::calculator::aggregate::{
    aggregate, average_earnings_per_record, group_by_service, hourly_rate, total_earnings,
    total_occupied_minutes,
};
use rdashlog::core::calculator::breaks::{break_seconds, working_seconds};
use rdashlog::core::calculator::waiting::{
    resolve_coarse_waiting_time, resolve_waiting_time, resolve_waiting_time_at,
};
use rdashlog::core::logic::Core;

#[test]
fn test_waiting_without_records_is_all_before_first_case() {
    let w = resolve_waiting_time_at(dt(9, 0), Some(dt(17, 0)), &[], dt(23, 0));

    assert_eq!(w.before_first_case, 28800);
    assert_eq!(w.between_cases, 0);
    assert_eq!(w.after_last_case, 0);
    assert_eq!(w.total_waiting_seconds, 28800);
}

#[test]
fn test_waiting_three_phases() {
    let records = vec![
        record(1, "Uber Eats", dt(10, 0), 30, 500.0, 0.0),
        record(2, "Uber Eats", dt(12, 0), 20, 500.0, 0.0),
    ];

    let w = resolve_waiting_time_at(dt(9, 0), Some(dt(17, 0)), &records, dt(23, 0));

    assert_eq!(w.before_first_case, 3600);
    assert_eq!(w.between_cases, 5400);
    // 12:20 → 17:00
    assert_eq!(w.after_last_case, 16800);
    assert_eq!(w.total_waiting_seconds, 3600 + 5400 + 16800);
}

#[test]
fn test_waiting_sorts_unordered_input() {
    let ordered = vec![
        record(1, "A", dt(10, 0), 30, 0.0, 0.0),
        record(2, "A", dt(12, 0), 20, 0.0, 0.0),
        record(3, "A", dt(14, 0), 10, 0.0, 0.0),
    ];
    let shuffled = vec![ordered[2].clone(), ordered[0].clone(), ordered[1].clone()];

    assert_eq!(
        resolve_waiting_time_at(dt(9, 0), Some(dt(17, 0)), &ordered, dt(17, 0)),
        resolve_waiting_time_at(dt(9, 0), Some(dt(17, 0)), &shuffled, dt(17, 0)),
    );
}

#[test]
fn test_waiting_equal_timestamps_keep_input_order() {
    let long_first = vec![
        record(1, "A", dt(10, 0), 30, 500.0, 0.0),
        record(2, "B", dt(10, 0), 10, 300.0, 100.0),
    ];
    let short_first = vec![long_first[1].clone(), long_first[0].clone()];

    let w = resolve_waiting_time_at(dt(9, 0), Some(dt(12, 0)), &long_first, dt(12, 0));
    assert_eq!(w.before_first_case, 3600);
    assert_eq!(w.between_cases, 0);
    // last in input order ends at 10:10
    assert_eq!(w.after_last_case, 6600);

    let w = resolve_waiting_time_at(dt(9, 0), Some(dt(12, 0)), &short_first, dt(12, 0));
    assert_eq!(w.before_first_case, 3600);
    assert_eq!(w.between_cases, 0);
    // last in input order ends at 10:30
    assert_eq!(w.after_last_case, 5400);

    assert_eq!(aggregate(&long_first), aggregate(&short_first));
}

#[test]
fn test_waiting_overlapping_records_clamp_to_zero() {
    let records = vec![
        record(1, "A", dt(10, 0), 60, 0.0, 0.0),
        record(2, "A", dt(10, 30), 15, 0.0, 0.0),
    ];

    let w = resolve_waiting_time_at(dt(9, 0), Some(dt(11, 0)), &records, dt(11, 0));

    assert_eq!(w.between_cases, 0);
    // last record ends 10:45
    assert_eq!(w.after_last_case, 900);
    assert!(w.before_first_case >= 0);
}

#[test]
fn test_waiting_record_before_session_start_clamps() {
    let records = vec![record(1, "A", dt(8, 0), 30, 0.0, 0.0)];

    let w = resolve_waiting_time_at(dt(9, 0), Some(dt(10, 0)), &records, dt(10, 0));

    assert_eq!(w.before_first_case, 0);
    // 08:30 → 10:00
    assert_eq!(w.after_last_case, 5400);
    assert_eq!(w.total_waiting_seconds, 5400);
}

#[test]
fn test_waiting_open_session_uses_now_as_horizon() {
    let records = vec![record(1, "A", dt(10, 0), 30, 0.0, 0.0)];

    let w = resolve_waiting_time_at(dt(9, 0), None, &records, dt(11, 0));

    assert_eq!(w.before_first_case, 3600);
    assert_eq!(w.after_last_case, 1800);
}

#[test]
fn test_waiting_last_record_running_past_horizon() {
    let records = vec![record(1, "A", dt(10, 45), 30, 0.0, 0.0)];

    let w = resolve_waiting_time_at(dt(9, 0), Some(dt(11, 0)), &records, dt(11, 0));

    assert_eq!(w.after_last_case, 0);
    assert_eq!(w.total_waiting_seconds, w.before_first_case);
}

#[test]
fn test_waiting_clock_entry_point_with_closed_session() {
    let w = resolve_waiting_time(dt(9, 0), Some(dt(10, 0)), &[]);
    assert_eq!(w.total_waiting_seconds, 3600);
}

#[test]
fn test_coarse_waiting() {
    let records = vec![
        record(1, "A", dt(10, 0), 30, 0.0, 0.0),
        record(2, "A", dt(11, 0), 20, 0.0, 0.0),
    ];
    assert_eq!(resolve_coarse_waiting_time(7200, &records), 4200);

    let long = vec![record(1, "A", dt(10, 0), 60, 0.0, 0.0)];
    assert_eq!(resolve_coarse_waiting_time(1800, &long), 0);

    assert_eq!(resolve_coarse_waiting_time(900, &[]), 900);
}

#[test]
fn test_hourly_rate() {
    assert_eq!(hourly_rate(2000.0, 7200), 1000.0);
    assert_eq!(hourly_rate(2000.0, 0), 0.0);
    assert_eq!(hourly_rate(0.0, 7200), 0.0);
    assert_eq!(hourly_rate(1500.0, 5400), 1000.0);
    assert_eq!(hourly_rate(1500.0, -10), 0.0);
}

#[test]
fn test_aggregate_totals_and_average() {
    let records = vec![
        record(1, "Uber Eats", dt(10, 0), 30, 1000.0, 0.0),
        record(2, "Demae-can", dt(11, 0), 20, 800.0, 200.0),
    ];

    let a = aggregate(&records);
    assert_eq!(a.total_earnings, 2000.0);
    assert_eq!(a.total_occupied_minutes, 50);
    assert_eq!(a.count, 2);
    assert_eq!(a.average_earnings, 1000.0);

    assert_eq!(total_earnings(&records), 2000.0);
    assert_eq!(total_occupied_minutes(&records), 50);
}

#[test]
fn test_aggregate_empty_is_zeroed() {
    let a = aggregate(&[]);
    assert_eq!(a.total_earnings, 0.0);
    assert_eq!(a.total_occupied_minutes, 0);
    assert_eq!(a.count, 0);
    assert_eq!(a.average_earnings, 0.0);
    assert_eq!(average_earnings_per_record(&[]), 0.0);
}

#[test]
fn test_group_by_service_is_order_independent() {
    let records = vec![
        record(1, "Uber Eats", dt(10, 0), 30, 1000.0, 100.0),
        record(2, "Demae-can", dt(11, 0), 20, 800.0, 0.0),
        record(3, "Wolt", dt(12, 0), 15, 600.0, 0.0),
        record(4, "Menu", dt(13, 0), 25, 700.0, 50.0),
    ];
    let reversed: Vec<_> = records.iter().rev().cloned().collect();

    let groups = group_by_service(&records);
    assert_eq!(groups.len(), 4);
    assert_eq!(groups, group_by_service(&reversed));

    let uber = &groups["Uber Eats"];
    assert_eq!(uber.count, 1);
    assert_eq!(uber.earnings, 1100.0);

    let names: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Demae-can", "Menu", "Uber Eats", "Wolt"]);
}

#[test]
fn test_group_by_service_accumulates() {
    let records = vec![
        record(1, "Uber Eats", dt(10, 0), 30, 1000.0, 0.0),
        record(2, "Uber Eats", dt(11, 0), 20, 500.0, 100.0),
    ];

    let groups = group_by_service(&records);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups["Uber Eats"].count, 2);
    assert_eq!(groups["Uber Eats"].earnings, 1600.0);
}

#[test]
fn test_break_seconds_open_break_counts_to_horizon() {
    let breaks = vec![
        pause(1, dt(10, 0), Some(dt(10, 15))),
        pause(2, dt(12, 0), None),
    ];

    assert_eq!(break_seconds(&breaks, dt(9, 0), dt(12, 30)), 900 + 1800);
}

#[test]
fn test_break_seconds_clamped_to_session_window() {
    let breaks = vec![
        pause(1, dt(8, 0), Some(dt(8, 30))),
        pause(2, dt(9, 20), Some(dt(11, 0))),
    ];

    // only 09:20 → 10:00 lies inside the session
    assert_eq!(break_seconds(&breaks, dt(9, 0), dt(10, 0)), 2400);

    let s = session(dt(9, 0), Some(dt(9, 50)));
    let late = vec![pause(1, dt(9, 10), Some(dt(10, 50)))];
    assert!(break_seconds(&late, s.start, dt(9, 50)) <= s.elapsed_seconds(dt(9, 50)));
    assert_eq!(working_seconds(&s, &late, dt(23, 0)), 600);
}

#[test]
fn test_working_seconds_subtracts_breaks() {
    let s = session(dt(9, 0), Some(dt(17, 0)));
    let breaks = vec![pause(1, dt(12, 0), Some(dt(13, 0)))];

    assert_eq!(working_seconds(&s, &breaks, dt(23, 0)), 7 * 3600);
}

#[test]
fn test_working_seconds_open_session() {
    let s = session(dt(9, 0), None);
    let breaks = vec![pause(1, dt(10, 0), None)];

    // 2h elapsed, 1h of running break
    assert_eq!(working_seconds(&s, &breaks, dt(11, 0)), 3600);
}

#[test]
fn test_session_summary() {
    let s = session(dt(9, 0), Some(dt(13, 0)));
    let breaks = vec![pause(1, dt(11, 0), Some(dt(11, 30)))];
    let records = vec![
        record(1, "Uber Eats", dt(9, 30), 30, 1000.0, 0.0),
        record(2, "Demae-can", dt(12, 0), 20, 1500.0, 0.0),
    ];

    let summary = Core::build_session_summary(&s, &breaks, &records, dt(23, 0));

    assert_eq!(summary.elapsed_seconds, 4 * 3600);
    assert_eq!(summary.break_seconds, 1800);
    assert_eq!(summary.working_seconds, 3 * 3600 + 1800);
    assert_eq!(summary.totals.total_earnings, 2500.0);
    assert_eq!(summary.hourly_rate, 2500.0 / 3.5);

    // breaks are not subtracted from the detailed breakdown
    assert_eq!(summary.waiting.before_first_case, 1800);
    assert_eq!(summary.waiting.between_cases, 7200);
    assert_eq!(summary.waiting.after_last_case, 2400);
    assert_eq!(summary.coarse_waiting_seconds, 12600 - 3000);
}
