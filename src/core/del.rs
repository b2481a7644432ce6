use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_delivery, delete_session, delivery_by_id, session_by_id};
use crate::errors::{AppError, AppResult};
use crate::models::delivery::DeliveryRecord;
use crate::models::session::WorkSession;

pub struct DeleteLogic;

impl DeleteLogic {
    pub fn delete_delivery(pool: &mut DbPool, id: i64) -> AppResult<DeliveryRecord> {
        let record = delivery_by_id(&pool.conn, id)?.ok_or(AppError::DeliveryNotFound(id))?;

        delete_delivery(&pool.conn, id)?;
        ttlog(
            &pool.conn,
            "del",
            &format!("delivery #{id}"),
            &format!(
                "Deleted {} delivery of {} from session #{}",
                record.service,
                record.timestamp.format("%Y-%m-%d %H:%M"),
                record.session_id
            ),
        )?;

        Ok(record)
    }

    /// Removes the session together with its breaks and deliveries.
    pub fn delete_session(pool: &mut DbPool, id: i64) -> AppResult<WorkSession> {
        let session = session_by_id(&pool.conn, id)?.ok_or(AppError::SessionNotFound(id))?;

        delete_session(&pool.conn, id)?;
        ttlog(
            &pool.conn,
            "del",
            &format!("session #{id}"),
            &format!("Deleted session started at {}", session.start_str()),
        )?;

        Ok(session)
    }
}
