mod common;
use common::dt;

use rdashlog::core::calculator::route::{haversine_meters, route_stats};
use rdashlog::core::route::RouteLogic;
use rdashlog::models::drive_log::{RoutePoint, RouteStats};

fn point(lat: f64, lon: f64, h: u32, m: u32, speed: Option<f64>) -> RoutePoint {
    RoutePoint {
        latitude: lat,
        longitude: lon,
        timestamp: dt(h, m),
        speed,
    }
}

#[test]
fn test_haversine_identical_points() {
    assert_eq!(haversine_meters(35.6812, 139.7671, 35.6812, 139.7671), 0.0);
}

#[test]
fn test_haversine_tokyo_osaka() {
    let d = haversine_meters(35.6812, 139.7671, 34.7025, 135.4959);
    assert!((d - 397_000.0).abs() < 10_000.0, "got {d}");
}

#[test]
fn test_route_stats_empty() {
    assert_eq!(route_stats(&[]), RouteStats::default());
}

#[test]
fn test_route_stats_single_point() {
    let stats = route_stats(&[point(35.0, 139.0, 10, 0, Some(20.0))]);
    assert_eq!(stats.total_distance_meters, 0.0);
    assert_eq!(stats.duration_seconds, 0);
    assert_eq!(stats.average_speed_kmh, 0.0);
}

#[test]
fn test_route_stats_distance_and_speed() {
    let points = vec![
        point(35.0, 139.0, 10, 0, Some(10.0)),
        point(35.0, 139.01, 10, 30, Some(42.5)),
        point(35.0, 139.02, 11, 0, Some(30.0)),
    ];

    let stats = route_stats(&points);
    let expected = 2.0 * haversine_meters(35.0, 139.0, 35.0, 139.01);

    assert!((stats.total_distance_meters - expected).abs() < 1.0);
    assert_eq!(stats.duration_seconds, 3600);
    assert!((stats.average_speed_kmh - expected / 1000.0).abs() < 0.01);
    assert_eq!(stats.max_speed_kmh, 42.5);
}

#[test]
fn test_parse_points_from_csv() {
    let csv = "timestamp,latitude,longitude,speed\n\
               2025-06-02 10:00:00,35.0,139.0,12.5\n\
               2025-06-02 10:05:00,35.001,139.001,\n";

    let points = RouteLogic::parse_points(csv.as_bytes()).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].speed, Some(12.5));
    assert_eq!(points[1].speed, None);
    assert_eq!(points[1].timestamp, dt(10, 5));
}

#[test]
fn test_parse_points_rejects_bad_latitude() {
    let csv = "timestamp,latitude,longitude\n2025-06-02 10:00:00,95.0,139.0\n";
    assert!(RouteLogic::parse_points(csv.as_bytes()).is_err());
}
