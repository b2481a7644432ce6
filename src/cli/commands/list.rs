use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::db::queries::{load_deliveries_by_session, load_sessions};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::date::{resolve_period, today};
use crate::utils::formatting::secs2readable;
use crate::utils::table::Table;
use crate::utils::time::now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, details } = cmd {
        let pool = DbPool::open(&cfg.database)?;

        let period = period.as_deref().unwrap_or("month");
        let bounds = resolve_period(period, today())?;
        let sessions = load_sessions(&pool.conn, &bounds)?;

        if sessions.is_empty() {
            info(format!("No sessions for period '{period}'."));
            return Ok(());
        }

        header(format!("Sessions ({period})"));

        let now = now();
        let mut table = Table::new(vec![
            "ID", "Start", "End", "Working", "Breaks", "Cases", "Earnings", "Rate/h", "Waiting",
        ]);

        let mut summaries = Vec::with_capacity(sessions.len());
        for s in &sessions {
            let summary = SessionLogic::summary(&pool.conn, s, now)?;
            table.add_row(vec![
                s.id.to_string(),
                s.start_str(),
                s.end_str(),
                secs2readable(summary.working_seconds),
                secs2readable(summary.break_seconds),
                summary.totals.count.to_string(),
                cfg.format_money(summary.totals.total_earnings),
                cfg.format_money(summary.hourly_rate),
                secs2readable(summary.waiting.total_waiting_seconds),
            ]);
            summaries.push(summary);
        }

        print!("{}", table.render(&cfg.separator_char));

        let total_earnings: f64 = summaries.iter().map(|s| s.totals.total_earnings).sum();
        let total_cases: usize = summaries.iter().map(|s| s.totals.count).sum();
        println!(
            "\n{} session(s), {} case(s), {}",
            sessions.len(),
            total_cases,
            cfg.format_money(total_earnings)
        );

        if *details {
            for s in &sessions {
                let records = load_deliveries_by_session(&pool.conn, s.id)?;
                if records.is_empty() {
                    continue;
                }

                header(format!("Session #{} deliveries", s.id));
                let mut dt = Table::new(vec![
                    "ID", "Time", "Service", "Earnings", "Tip", "Min", "Memo",
                ]);
                for r in &records {
                    dt.add_row(vec![
                        r.id.to_string(),
                        r.timestamp.format("%H:%M").to_string(),
                        r.service.clone(),
                        cfg.format_money(r.earnings),
                        cfg.format_money(r.tip),
                        r.duration_minutes.to_string(),
                        r.memo.clone().unwrap_or_default(),
                    ]);
                }
                print!("{}", dt.render(&cfg.separator_char));
            }
        }
    }
    Ok(())
}
