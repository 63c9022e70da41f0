use std::path::Path;

use clap::{Args, Subcommand};
use gazopti_sdk::ClientConfig;

use crate::error::CliError;
use crate::utils::print_success;

#[derive(Args, Clone)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write the effective configuration to the config file
    Init,
}

impl ConfigCommand {
    /// Whether the command rewrites the config file
    pub fn writes_file(&self) -> bool {
        matches!(self.command, ConfigCommands::Init)
    }

    pub fn execute(self, config: &ClientConfig, path: &Path) -> Result<(), CliError> {
        match self.command {
            ConfigCommands::Show => {
                println!("# {}", path.display());
                print!("{}", toml::to_string_pretty(config)?);
                println!("# session storage: {}", config.storage_path().display());
                Ok(())
            }
            ConfigCommands::Init => {
                config.save(path)?;
                print_success(&format!("Configuration written to {}", path.display()));
                Ok(())
            }
        }
    }
}
