//! Create Delivery screen

use tracing::{debug, error};

use super::{Alert, Effect, LoadingState, Route};
use crate::client::GazOptiClient;
use crate::error::Error;
use crate::forms::DeliveryForm;
use crate::models::{Driver, Truck};

/// Create Delivery screen state
#[derive(Debug, Clone, Default)]
pub struct CreateDeliveryScreen {
    pub form: DeliveryForm,
    drivers: Vec<Driver>,
    trucks: Vec<Truck>,
    loading: LoadingState,
    submitting: LoadingState,
}

impl CreateDeliveryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_loading()
    }

    /// Fetch drivers, then trucks, and preselect the first of each
    pub async fn load(&mut self, client: &GazOptiClient) -> Effect {
        self.loading = LoadingState::loading("Loading data...");
        let result = self.fetch_choices(client).await;
        self.loading = LoadingState::Idle;

        match result {
            Ok(()) => Effect::none(),
            Err(e) => {
                error!("Error loading drivers or trucks: {}", e);
                Effect::failure(&e, Some("Unable to load drivers or trucks."))
            }
        }
    }

    async fn fetch_choices(&mut self, client: &GazOptiClient) -> Result<(), Error> {
        self.drivers = client.list_drivers().await?;
        if self.drivers.is_empty() {
            debug!("No drivers available");
        }
        self.form.driver = first_driver(&self.drivers);

        self.trucks = client.list_trucks().await?;
        if self.trucks.is_empty() {
            debug!("No trucks available");
        }
        self.form.truck = first_truck(&self.trucks);
        Ok(())
    }

    /// Create the delivery described by the form.
    ///
    /// Incomplete forms are rejected before any request. On success the form
    /// is reset and the app moves to the delivery list.
    pub async fn submit(&mut self, client: &GazOptiClient) -> Effect {
        let delivery = match self.form.validate() {
            Ok(delivery) => delivery,
            Err(e) => return Effect::failure(&e, None),
        };

        self.submitting = LoadingState::loading("Creating delivery...");
        let result = client.create_delivery(&delivery).await;
        self.submitting = LoadingState::Idle;

        match result {
            Ok(()) => {
                self.reset_form();
                Effect::alert(Alert::success("Delivery created.")).and_navigate(Route::DeliveryList)
            }
            Err(e) => {
                error!("Error creating delivery: {}", e);
                Effect::failure(&e, None)
            }
        }
    }

    fn reset_form(&mut self) {
        self.form.driver = first_driver(&self.drivers);
        self.form.truck = first_truck(&self.trucks);
        self.form.clear_counts();
    }
}

fn first_driver(drivers: &[Driver]) -> String {
    drivers.first().map(|d| d.id.clone()).unwrap_or_default()
}

fn first_truck(trucks: &[Truck]) -> String {
    trucks.first().map(|t| t.id.clone()).unwrap_or_default()
}
