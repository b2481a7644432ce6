use crate::config::migrate::{missing_keys, run_config_migration};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        println!("{}", content);
        Ok(())
    }

    /// Editor resolution: `--editor`, `$EDITOR`, `$VISUAL`, then the platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = if cfg!(target_os = "windows") {
            "notepad"
        } else {
            "nano"
        };

        let ed = editor
            .map(str::to_string)
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| default_editor.into());

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot launch '{ed}': {e}")))?;

        if !status.success() {
            warning(format!("Editor '{ed}' exited with {status}"));
        }
        Ok(())
    }

    /// Report missing keys. Returns `true` when the file is complete.
    pub fn check(path: &Path) -> AppResult<bool> {
        let missing = missing_keys(path)?;
        if missing.is_empty() {
            success(format!("{} is up to date.", path.display()));
            return Ok(true);
        }

        warning(format!("{} is missing {} key(s):", path.display(), missing.len()));
        for k in &missing {
            println!("  - {k}");
        }
        info("Run `rdashlog config --migrate` to add them with default values.");
        Ok(false)
    }

    pub fn migrate(path: &Path) -> AppResult<bool> {
        let changed = run_config_migration(path)?;
        if !changed {
            info("Configuration already up to date.");
        }
        Ok(changed)
    }
}
