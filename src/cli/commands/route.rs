use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::route::RouteLogic;
use crate::db::pool::DbPool;
use crate::db::queries::load_drive_logs;
use crate::errors::AppResult;
use crate::ui::messages::{field, header, info, success};
use crate::utils::formatting::{format_distance, secs2readable};
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;
use crate::utils::time::format_datetime;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Route {
        file,
        session,
        list,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;

        if *list {
            let logs = load_drive_logs(&pool.conn)?;
            if logs.is_empty() {
                info("No drive logs stored.");
                return Ok(());
            }

            header("Drive logs");
            let mut table = Table::new(vec![
                "ID", "Session", "Start", "End", "Distance", "Duration", "Avg km/h", "Max km/h",
                "Points",
            ]);
            for l in &logs {
                table.add_row(vec![
                    l.id.to_string(),
                    l.session_id
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "--".into()),
                    format_datetime(&l.start),
                    format_datetime(&l.end),
                    format_distance(l.stats.total_distance_meters),
                    secs2readable(l.stats.duration_seconds),
                    format!("{:.1}", l.stats.average_speed_kmh),
                    format!("{:.1}", l.stats.max_speed_kmh),
                    l.points.to_string(),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
            return Ok(());
        }

        if let Some(file) = file {
            let path = expand_tilde(file);
            let (id, stats) = RouteLogic::import(&mut pool, &path, *session)?;

            success(format!("Drive log #{id} imported from {}", path.display()));
            field("Distance", format_distance(stats.total_distance_meters));
            field("Duration", secs2readable(stats.duration_seconds));
            field("Average speed", format!("{:.1} km/h", stats.average_speed_kmh));
            field("Max speed", format!("{:.1} km/h", stats.max_speed_kmh));
        }
    }

    Ok(())
}
