use std::path::{Path, PathBuf};

use colored::Colorize;
use gazopti_sdk::{AlertKind, ClientConfig, Delivery, Effect, GazOptiClient, Route};
use prettytable::{Cell, Row, Table};

use crate::error::CliError;

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a table with data
pub fn print_table(headers: Vec<&str>, rows: Vec<Vec<String>>) {
    let mut table = Table::new();

    // Add headers
    table.set_titles(Row::new(headers.iter().map(|h| Cell::new(h)).collect()));

    // Add data rows
    for row_data in rows {
        table.add_row(Row::new(row_data.iter().map(|c| Cell::new(c)).collect()));
    }

    table.printstd();
}

/// Print the alert of a screen effect and return the route it asks for.
///
/// Error alerts become `CliError::Alert` so the process exits non-zero.
pub fn apply_effect(effect: Effect) -> Result<Option<Route>, CliError> {
    if let Some(alert) = effect.alert {
        match alert.kind {
            AlertKind::Success => print_success(&alert.message),
            AlertKind::Error => {
                if effect.navigate == Some(Route::Login) {
                    eprintln!("{}", "Run `gazopti login --email <email>` first.".yellow());
                }
                return Err(CliError::Alert(alert.message));
            }
        }
    }
    Ok(effect.navigate)
}

/// Print deliveries as a table
pub fn print_deliveries(deliveries: &[Delivery]) {
    if deliveries.is_empty() {
        println!("No deliveries found yet.");
        return;
    }

    let rows = deliveries
        .iter()
        .map(|d| {
            vec![
                d.short_id(),
                d.driver_label(),
                d.truck_label(),
                d.full_bottles_sent.unwrap_or(0).to_string(),
                d.empty_bottles_sent.unwrap_or(0).to_string(),
                d.full_bottles_returned.unwrap_or(0).to_string(),
                d.empty_bottles_returned.unwrap_or(0).to_string(),
                d.status_label().to_string(),
            ]
        })
        .collect();

    print_table(
        vec![
            "Delivery ID",
            "Driver",
            "Truck",
            "Full sent",
            "Empty sent",
            "Full returned",
            "Empty returned",
            "Status",
        ],
        rows,
    );
}

/// Resolve the config file path from the CLI argument
pub fn config_path(arg: Option<&str>) -> PathBuf {
    arg.map(PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path)
}

/// Load the configuration, applying a `--base-url` override before validation.
///
/// With `repair`, invalid values are replaced by the defaults instead of
/// failing, so the file can be rewritten.
pub fn load_config(
    path: &Path,
    base_url: Option<&str>,
    repair: bool,
) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::load_unchecked(path)?;
    if let Some(url) = base_url {
        config.base_url = url.to_string();
    }

    if let Err(e) = config.validate() {
        if !repair {
            return Err(e.into());
        }
        tracing::warn!("Replacing invalid configuration with defaults: {}", e);
        config = ClientConfig {
            storage_path: config.storage_path,
            ..ClientConfig::default()
        };
    }
    Ok(config)
}

/// Create a client instance from the config
pub fn create_client(config: &ClientConfig) -> GazOptiClient {
    GazOptiClient::new(config.clone())
}
