//! Edit Delivery screen

use tracing::error;

use super::{Alert, Effect, LoadingState, Route};
use crate::client::GazOptiClient;
use crate::forms::EditDeliveryForm;

/// Edit Delivery screen state
#[derive(Debug, Clone, Default)]
pub struct EditDeliveryScreen {
    pub form: EditDeliveryForm,
    submitting: LoadingState,
}

impl EditDeliveryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_loading()
    }

    /// Send the new sent counts. The form is cleared only on success.
    pub async fn submit(&mut self, client: &GazOptiClient) -> Effect {
        let (id, update) = match self.form.validate() {
            Ok(valid) => valid,
            Err(e) => return Effect::failure(&e, None),
        };

        self.submitting = LoadingState::loading("Updating delivery...");
        let result = client.update_delivery(&id, &update).await;
        self.submitting = LoadingState::Idle;

        match result {
            Ok(()) => {
                self.form.clear();
                Effect::alert(Alert::success("Delivery updated!")).and_navigate(Route::DeliveryList)
            }
            Err(e) => {
                error!("Error updating delivery {}: {}", id, e);
                Effect::failure(&e, None)
            }
        }
    }
}
