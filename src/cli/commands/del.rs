use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{ask_confirmation, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { session, id } = cmd {
        let prompt = if *session {
            format!(
                "Delete session #{id} with all its breaks and deliveries? This action is irreversible."
            )
        } else {
            format!("Delete delivery #{id}? This action is irreversible.")
        };

        if !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut pool = DbPool::open(&cfg.database)?;

        if *session {
            let s = DeleteLogic::delete_session(&mut pool, *id)?;
            success(format!(
                "Session #{} (started {}) has been deleted.",
                s.id,
                s.start_str()
            ));
        } else {
            let r = DeleteLogic::delete_delivery(&mut pool, *id)?;
            success(format!(
                "Delivery #{} ({} {}) has been deleted.",
                r.id,
                r.service,
                cfg.format_money(r.total())
            ));
        }
    }

    Ok(())
}
