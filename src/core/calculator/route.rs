//! Distance and speed over an ordered list of GPS samples.

use crate::models::drive_log::{RoutePoint, RouteStats};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters.
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Points are taken in the given order (no re-sorting).
pub fn route_stats(points: &[RoutePoint]) -> RouteStats {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return RouteStats::default();
    };

    let mut total_distance_meters = 0.0;
    let mut max_speed_kmh: f64 = 0.0;

    for w in points.windows(2) {
        let (prev, curr) = (&w[0], &w[1]);
        total_distance_meters +=
            haversine_meters(prev.latitude, prev.longitude, curr.latitude, curr.longitude);

        if let Some(speed) = curr.speed {
            max_speed_kmh = max_speed_kmh.max(speed);
        }
    }

    let duration_seconds = (last.timestamp - first.timestamp).num_seconds();
    let average_speed_kmh = if duration_seconds > 0 {
        (total_distance_meters / 1000.0) / (duration_seconds as f64 / 3600.0)
    } else {
        0.0
    };

    RouteStats {
        total_distance_meters,
        duration_seconds,
        average_speed_kmh,
        max_speed_kmh,
    }
}
