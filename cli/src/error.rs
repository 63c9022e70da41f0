use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Sdk(#[from] gazopti_sdk::Error),

    #[error("Toml Error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Command Error: {0}")]
    Command(String),

    /// A screen action ended with an error alert
    #[error("{0}")]
    Alert(String),
}
