mod commands;
mod error;
mod utils;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{
    auth::LoginCommand, config::ConfigCommand, deliveries::DeliveryCommand, fleet,
};
use crate::error::CliError;
use crate::utils::{config_path, create_client, load_config};

#[derive(Parser)]
#[command(name = "gazopti")]
#[command(about = "GazOpti delivery CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override the service base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Sign in and store the session token
    Login(LoginCommand),

    /// List drivers
    Drivers,

    /// List trucks
    Trucks,

    /// Delivery operations
    Deliveries(DeliveryCommand),

    /// Configuration file management
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    // Load .env before the configuration reads GAZOPTI_* variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "✗".red(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let path = config_path(cli.config.as_deref());
    let repair = matches!(&cli.command, Commands::Config(cmd) if cmd.writes_file());
    let config = load_config(&path, cli.base_url.as_deref(), repair)?;
    tracing::debug!("Using config {:?}, service {}", path, config.base_url);

    let client = create_client(&config);
    match cli.command {
        Commands::Login(cmd) => cmd.execute(&client).await,
        Commands::Drivers => fleet::list_drivers(&client).await,
        Commands::Trucks => fleet::list_trucks(&client).await,
        Commands::Deliveries(cmd) => cmd.execute(&client).await,
        Commands::Config(cmd) => cmd.execute(&config, &path),
    }
}
