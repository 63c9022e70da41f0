use gazopti_sdk::screens::CreateDeliveryScreen;
use gazopti_sdk::GazOptiClient;

use crate::error::CliError;
use crate::utils::{apply_effect, print_table};

/// List the drivers a delivery can be assigned to
pub async fn list_drivers(client: &GazOptiClient) -> Result<(), CliError> {
    let screen = load_choices(client).await?;
    if screen.drivers().is_empty() {
        println!("No drivers available.");
        return Ok(());
    }

    let rows = screen
        .drivers()
        .iter()
        .map(|d| vec![d.id.clone(), d.name.clone()])
        .collect();
    print_table(vec!["Driver ID", "Name"], rows);
    Ok(())
}

/// List the trucks a delivery can be assigned to
pub async fn list_trucks(client: &GazOptiClient) -> Result<(), CliError> {
    let screen = load_choices(client).await?;
    if screen.trucks().is_empty() {
        println!("No trucks available.");
        return Ok(());
    }

    let rows = screen
        .trucks()
        .iter()
        .map(|t| vec![t.id.clone(), t.label()])
        .collect();
    print_table(vec!["Truck ID", "Plate"], rows);
    Ok(())
}

async fn load_choices(client: &GazOptiClient) -> Result<CreateDeliveryScreen, CliError> {
    let mut screen = CreateDeliveryScreen::new();
    let effect = screen.load(client).await;
    apply_effect(effect)?;
    Ok(screen)
}
