use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::path::resolve_output_path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let dest = resolve_output_path(file);
        BackupLogic::backup(&pool, cfg, &dest.to_string_lossy(), *compress)?;
    }

    Ok(())
}
