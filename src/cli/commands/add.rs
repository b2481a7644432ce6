use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::validate::DeliveryInput;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::{now, parse_optional_datetime};

/// Log a delivery.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        earnings,
        duration,
        service,
        tip,
        at,
        memo,
        session,
    } = cmd
    {
        let input = DeliveryInput {
            service: service.clone().unwrap_or_else(|| cfg.default_service.clone()),
            earnings: *earnings,
            tip: *tip,
            duration_minutes: *duration,
            timestamp: parse_optional_datetime(at.as_ref())?,
            memo: memo.clone(),
        };

        let mut pool = DbPool::open(&cfg.database)?;
        let (id, stored) = AddLogic::apply(&mut pool, cfg, &input, *session, now())?;

        success(format!(
            "Delivery #{} added: {} {} ({} min)",
            id,
            stored.service,
            cfg.format_money(stored.earnings + stored.tip),
            stored.duration_minutes
        ));
    }

    Ok(())
}
