//! Route import: CSV of GPS samples → stored drive log.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::calculator::route::route_stats;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_drive_log, session_by_id};
use crate::errors::{AppError, AppResult};
use crate::models::drive_log::{RoutePoint, RouteStats};
use crate::utils::formatting::format_distance;
use crate::utils::time::parse_datetime;

#[derive(Debug, Deserialize)]
struct RouteRow {
    timestamp: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    speed: Option<f64>,
}

pub struct RouteLogic;

impl RouteLogic {
    /// Read `timestamp,latitude,longitude[,speed]` rows (header required).
    pub fn parse_points<R: Read>(reader: R) -> AppResult<Vec<RoutePoint>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut points = Vec::new();
        for (idx, row) in rdr.deserialize::<RouteRow>().enumerate() {
            let row = row?;
            let line = idx + 2;

            if !(-90.0..=90.0).contains(&row.latitude) {
                return Err(AppError::Route(format!(
                    "line {line}: latitude {} out of range",
                    row.latitude
                )));
            }
            if !(-180.0..=180.0).contains(&row.longitude) {
                return Err(AppError::Route(format!(
                    "line {line}: longitude {} out of range",
                    row.longitude
                )));
            }

            let timestamp = parse_datetime(&row.timestamp).map_err(|_| {
                AppError::Route(format!("line {line}: bad timestamp '{}'", row.timestamp))
            })?;

            points.push(RoutePoint {
                latitude: row.latitude,
                longitude: row.longitude,
                timestamp,
                speed: row.speed.filter(|s| s.is_finite() && *s >= 0.0),
            });
        }

        Ok(points)
    }

    /// Import a route file and store its summary. Returns the drive log id.
    pub fn import(
        pool: &mut DbPool,
        file: &Path,
        session_id: Option<i64>,
    ) -> AppResult<(i64, RouteStats)> {
        if let Some(id) = session_id
            && session_by_id(&pool.conn, id)?.is_none()
        {
            return Err(AppError::SessionNotFound(id));
        }

        let points = Self::parse_points(File::open(file)?)?;

        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(AppError::Route(format!(
                "{} contains no route points",
                file.display()
            )));
        };

        if points.windows(2).any(|w| w[1].timestamp < w[0].timestamp) {
            return Err(AppError::Route(
                "route points must be in chronological order".into(),
            ));
        }

        let stats = route_stats(&points);
        let id = insert_drive_log(
            &pool.conn,
            session_id,
            &first.timestamp,
            &last.timestamp,
            &stats,
            points.len(),
        )?;

        ttlog(
            &pool.conn,
            "route",
            &format!("drive log #{id}"),
            &format!(
                "Imported {} points ({}) from {}",
                points.len(),
                format_distance(stats.total_distance_meters),
                file.display()
            ),
        )?;

        Ok((id, stats))
    }
}
