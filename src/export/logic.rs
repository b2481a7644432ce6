use crate::db::pool::DbPool;
use crate::db::queries::load_deliveries;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::DeliveryExport;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::date::{resolve_period, today};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export deliveries of `range` (any period expression, `None` = all).
    /// `file` must be absolute. Returns the number of exported rows.
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = resolve_period(range.unwrap_or("all"), today())?;
        let rows: Vec<DeliveryExport> = load_deliveries(&pool.conn, &bounds)?
            .iter()
            .map(DeliveryExport::from)
            .collect();

        if rows.is_empty() {
            warning("No deliveries found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
        }

        log::debug!("exported {} rows as {}", rows.len(), format.as_str());
        Ok(rows.len())
    }
}
