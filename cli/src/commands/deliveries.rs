use clap::{Args, Subcommand};
use gazopti_sdk::screens::{CreateDeliveryScreen, DeliveryListScreen, EditDeliveryScreen};
use gazopti_sdk::{FocusHandle, GazOptiClient, Route};

use crate::error::CliError;
use crate::utils::{apply_effect, print_deliveries};

#[derive(Args, Clone)]
pub struct DeliveryCommand {
    #[command(subcommand)]
    pub command: DeliveryCommands,
}

#[derive(Subcommand, Clone)]
pub enum DeliveryCommands {
    /// List all deliveries
    List,

    /// Create a delivery
    Create {
        /// Driver ID (defaults to the first available driver)
        #[arg(short, long)]
        driver: Option<String>,

        /// Truck ID (defaults to the first available truck)
        #[arg(short, long)]
        truck: Option<String>,

        /// Full bottles sent
        #[arg(long)]
        full: String,

        /// Empty bottles sent
        #[arg(long)]
        empty: String,
    },

    /// Change the sent bottle counts of a delivery
    Edit {
        /// Delivery ID
        id: String,

        /// Full bottles sent
        #[arg(long)]
        full: String,

        /// Empty bottles sent
        #[arg(long)]
        empty: String,
    },
}

impl DeliveryCommand {
    pub async fn execute(self, client: &GazOptiClient) -> Result<(), CliError> {
        match self.command {
            DeliveryCommands::List => show_list(client).await,

            DeliveryCommands::Create {
                driver,
                truck,
                full,
                empty,
            } => {
                let mut screen = CreateDeliveryScreen::new();
                apply_effect(screen.load(client).await)?;

                if let Some(driver) = driver {
                    screen.form.driver = driver;
                }
                if let Some(truck) = truck {
                    screen.form.truck = truck;
                }
                screen.form.set_full_bottles_sent(&full);
                screen.form.set_empty_bottles_sent(&empty);

                let route = apply_effect(screen.submit(client).await)?;
                follow(route, client).await
            }

            DeliveryCommands::Edit { id, full, empty } => {
                let mut screen = EditDeliveryScreen::new();
                screen.form.delivery_id = id;
                screen.form.set_full_bottles_sent(&full);
                screen.form.set_empty_bottles_sent(&empty);

                let route = apply_effect(screen.submit(client).await)?;
                follow(route, client).await
            }
        }
    }
}

async fn show_list(client: &GazOptiClient) -> Result<(), CliError> {
    let mut screen = DeliveryListScreen::new();
    let focus = FocusHandle::new();
    apply_effect(screen.refresh(client, &focus).await)?;
    print_deliveries(screen.deliveries());
    Ok(())
}

/// Show the delivery list when a screen navigates to it
async fn follow(route: Option<Route>, client: &GazOptiClient) -> Result<(), CliError> {
    match route {
        Some(Route::DeliveryList) => show_list(client).await,
        _ => Ok(()),
    }
}
