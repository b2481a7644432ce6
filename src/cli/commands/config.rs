use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            if path.exists() {
                println!("📄 {}:\n", path.display());
                ConfigLogic::print(&path)?;
            } else {
                info("No configuration file found; effective defaults:");
                println!("{}", serde_yaml::to_string(cfg)?);
            }
        }

        if *check || *migrate {
            if !path.exists() {
                warning(format!(
                    "{} does not exist. Run `rdashlog init` first.",
                    path.display()
                ));
                return Ok(());
            }

            if *check {
                ConfigLogic::check(&path)?;
            }
            if *migrate {
                ConfigLogic::migrate(&path)?;
            }
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor.as_deref())?;
        }
    }

    Ok(())
}
