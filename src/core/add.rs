use chrono::NaiveDateTime;

use crate::config::Config;
use crate::core::validate::{DeliveryInput, validate_delivery};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{active_session, count_deliveries, insert_delivery, session_by_id};
use crate::errors::{AppError, AppResult};
use crate::models::delivery::NewDelivery;
use crate::models::session::WorkSession;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Target session: the one given explicitly, otherwise the active one.
    pub fn target_session(pool: &DbPool, session_id: Option<i64>) -> AppResult<WorkSession> {
        match session_id {
            Some(id) => session_by_id(&pool.conn, id)?.ok_or(AppError::SessionNotFound(id)),
            None => active_session(&pool.conn)?.ok_or(AppError::NoActiveSession),
        }
    }

    /// Validate and store one delivery. Returns the new row id and the stored values.
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        input: &DeliveryInput,
        session_id: Option<i64>,
        now: NaiveDateTime,
    ) -> AppResult<(i64, NewDelivery)> {
        let session = Self::target_session(pool, session_id)?;
        let delivery = validate_delivery(input, &session, now)?;

        let existing = count_deliveries(&pool.conn, session.id)?;
        if existing >= i64::from(cfg.max_daily_cases) {
            return Err(AppError::Validation(format!(
                "session #{} already holds {} deliveries (max_daily_cases = {})",
                session.id, existing, cfg.max_daily_cases
            )));
        }

        let id = insert_delivery(&pool.conn, session.id, &delivery)?;

        ttlog(
            &pool.conn,
            "add",
            &format!("delivery #{id}"),
            &format!(
                "{} {} ({} min) added to session #{}",
                delivery.service,
                cfg.format_money(delivery.earnings + delivery.tip),
                delivery.duration_minutes,
                session.id
            ),
        )?;
        log::debug!("delivery {id} stored in session {}", session.id);

        Ok((id, delivery))
    }
}
