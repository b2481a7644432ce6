use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::StatsLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{field, header};
use crate::utils::colors::{colorize_money, colorize_optional};
use crate::utils::date::{resolve_period, today};
use crate::utils::formatting::secs2readable;
use crate::utils::table::Table;
use crate::utils::time::now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { period, by_service } = cmd {
        let pool = DbPool::open(&cfg.database)?;

        let period = period.as_deref().unwrap_or("week");
        let bounds = resolve_period(period, today())?;
        let stats = StatsLogic::compute(&pool.conn, &bounds, now())?;

        header(format!("Statistics ({period})"));
        field("Sessions", stats.sessions);
        field("Working", secs2readable(stats.working_seconds));
        field("Breaks", colorize_optional(&secs2readable(stats.break_seconds)));
        field(
            "Earnings",
            colorize_money(&cfg.format_money(stats.totals.total_earnings)),
        );
        field("Cases", stats.totals.count);
        field(
            "Average/case",
            colorize_optional(&cfg.format_money(stats.totals.average_earnings)),
        );
        field(
            "Occupied",
            secs2readable(stats.totals.total_occupied_minutes * 60),
        );
        field(
            "Hourly rate",
            colorize_optional(&format!("{}/h", cfg.format_money(stats.hourly_rate))),
        );
        field(
            "Waiting",
            colorize_optional(&secs2readable(stats.coarse_waiting_seconds)),
        );

        if *by_service && !stats.by_service.is_empty() {
            header("By service");
            let mut table = Table::new(vec!["Service", "Cases", "Earnings", "Share"]);
            for (name, totals) in &stats.by_service {
                let share = if stats.totals.total_earnings > 0.0 {
                    totals.earnings / stats.totals.total_earnings * 100.0
                } else {
                    0.0
                };
                table.add_row(vec![
                    name.clone(),
                    totals.count.to_string(),
                    cfg.format_money(totals.earnings),
                    format!("{share:.1}%"),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
        }
    }

    Ok(())
}
