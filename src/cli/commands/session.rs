//! `start`, `break` and `end`: the three transitions of the work state.

use crate::cli::commands::status::print_summary;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::work_state::Transition;
use crate::ui::messages::success;
use crate::utils::time::{format_datetime, now, parse_optional_datetime};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(&cfg.database)?;

    match cmd {
        Commands::Start { at } => {
            let at = parse_optional_datetime(at.as_ref())?;
            let id = SessionLogic::start(&mut pool, at, now())?;
            success(format!("Session #{} started at {}", id, format_datetime(&at)));
        }

        Commands::Break { at } => {
            let at = parse_optional_datetime(at.as_ref())?;
            match SessionLogic::toggle_break(&mut pool, at)? {
                Transition::OpenBreak { session_id, at } => success(format!(
                    "Break started at {} (session #{})",
                    format_datetime(&at),
                    session_id
                )),
                Transition::CloseBreak { session_id, at } => success(format!(
                    "Break ended at {} (session #{})",
                    format_datetime(&at),
                    session_id
                )),
                _ => {}
            }
        }

        Commands::End { at } => {
            let at = parse_optional_datetime(at.as_ref())?;
            let (session, summary) = SessionLogic::end(&mut pool, at)?;
            success(format!("Session #{} ended at {}", session.id, format_datetime(&at)));
            print_summary(cfg, &session, &summary);
        }

        _ => {}
    }

    Ok(())
}
