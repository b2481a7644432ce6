use crate::cli::commands::status::print_summary;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::pool::DbPool;
use crate::db::queries::{load_breaks, load_deliveries_by_session, session_by_id};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::formatting::secs2readable;
use crate::utils::table::Table;
use crate::utils::time::{format_datetime, now};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let pool = DbPool::open(&cfg.database)?;

        let session = session_by_id(&pool.conn, *id)?.ok_or(AppError::SessionNotFound(*id))?;
        let breaks = load_breaks(&pool.conn, session.id)?;
        let records = load_deliveries_by_session(&pool.conn, session.id)?;
        let now = now();

        let summary = Core::build_session_summary(&session, &breaks, &records, now);
        print_summary(cfg, &session, &summary);

        if !breaks.is_empty() {
            header("Breaks");
            let horizon = session.horizon(now);
            let mut table = Table::new(vec!["#", "From", "To", "Length"]);
            for (i, b) in breaks.iter().enumerate() {
                let end = b.end.unwrap_or(horizon);
                table.add_row(vec![
                    (i + 1).to_string(),
                    format_datetime(&b.start),
                    b.end
                        .as_ref()
                        .map(format_datetime)
                        .unwrap_or_else(|| "running".to_string()),
                    secs2readable((end - b.start).num_seconds().max(0)),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
        }

        if !records.is_empty() {
            header("Deliveries");
            let mut table = Table::new(vec![
                "ID", "Start", "End", "Service", "Earnings", "Tip", "Min", "Memo",
            ]);
            for r in &records {
                table.add_row(vec![
                    r.id.to_string(),
                    r.timestamp.format("%H:%M").to_string(),
                    r.end().format("%H:%M").to_string(),
                    r.service.clone(),
                    cfg.format_money(r.earnings),
                    cfg.format_money(r.tip),
                    r.duration_minutes.to_string(),
                    r.memo.clone().unwrap_or_default(),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
        }
    }

    Ok(())
}
