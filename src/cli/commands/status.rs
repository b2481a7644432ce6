use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::session::WorkSession;
use crate::models::session_summary::SessionSummary;
use crate::ui::messages::{field, header, info};
use crate::utils::colors::{RESET, color_for_status, colorize_money, colorize_optional};
use crate::utils::formatting::secs2readable;
use crate::utils::time::now;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { last } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let current = SessionLogic::current(&pool.conn)?;

        let label = current.state.label();
        println!("Status: {}{}{}", color_for_status(label), label, RESET);

        let session = match &current.session {
            Some(s) if s.is_active() || *last => s,
            _ => {
                info("No active work session. Use `rdashlog start` to begin.");
                return Ok(());
            }
        };

        let summary = SessionLogic::summary(&pool.conn, session, now())?;
        print_summary(cfg, session, &summary);
    }

    Ok(())
}

/// Block shared by `status`, `end` and `show`.
pub(crate) fn print_summary(cfg: &Config, session: &WorkSession, summary: &SessionSummary) {
    header(format!("Session #{}", session.id));

    field("Start", session.start_str());
    field("End", colorize_optional(&session.end_str()));
    field("Elapsed", secs2readable(summary.elapsed_seconds));
    field("Breaks", colorize_optional(&secs2readable(summary.break_seconds)));
    field("Working", secs2readable(summary.working_seconds));
    field(
        "Earnings",
        colorize_money(&cfg.format_money(summary.totals.total_earnings)),
    );
    field("Cases", summary.totals.count);
    field(
        "Average/case",
        colorize_optional(&cfg.format_money(summary.totals.average_earnings)),
    );
    field(
        "Hourly rate",
        colorize_optional(&format!("{}/h", cfg.format_money(summary.hourly_rate))),
    );

    println!();
    field(
        "Waiting",
        secs2readable(summary.waiting.total_waiting_seconds),
    );
    field(
        "  before first",
        colorize_optional(&secs2readable(summary.waiting.before_first_case)),
    );
    field(
        "  between cases",
        colorize_optional(&secs2readable(summary.waiting.between_cases)),
    );
    field(
        "  after last",
        colorize_optional(&secs2readable(summary.waiting.after_last_case)),
    );
    field(
        "Coarse waiting",
        colorize_optional(&secs2readable(summary.coarse_waiting_seconds)),
    );
}
