//! Delivery List screen

use tracing::{debug, error};

use super::{Effect, FocusHandle, LoadingState};
use crate::client::GazOptiClient;
use crate::models::Delivery;

/// Delivery List screen state
#[derive(Debug, Clone, Default)]
pub struct DeliveryListScreen {
    deliveries: Vec<Delivery>,
    loading: LoadingState,
}

impl DeliveryListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Re-fetch every delivery. Runs each time the screen gains focus.
    ///
    /// If `focus` was blurred by the time the response arrives, the result is
    /// dropped and no effect is returned.
    pub async fn refresh(&mut self, client: &GazOptiClient, focus: &FocusHandle) -> Effect {
        self.loading = LoadingState::loading("Loading deliveries...");
        let result = client.list_deliveries().await;
        self.loading = LoadingState::Idle;

        if !focus.is_active() {
            debug!("Delivery list lost focus, discarding result");
            return Effect::none();
        }

        match result {
            Ok(deliveries) => {
                self.deliveries = deliveries;
                Effect::none()
            }
            Err(e) => {
                error!("Error fetching deliveries: {}", e);
                Effect::failure(&e, Some("Unable to load deliveries."))
            }
        }
    }
}
