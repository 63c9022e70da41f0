//! Login screen

use tracing::error;

use super::{Alert, Effect, LoadingState, Route};
use crate::client::GazOptiClient;
use crate::forms::LoginForm;

/// Login screen state
#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    pub form: LoginForm,
    loading: LoadingState,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Sign in with the form's credentials.
    ///
    /// On success the token is persisted and the app moves on to delivery
    /// creation. Driver accounts get an alert and stay here.
    pub async fn submit(&mut self, client: &GazOptiClient) -> Effect {
        if let Err(e) = self.form.validate() {
            return Effect::failure(&e, None);
        }

        self.loading = LoadingState::loading("Signing in...");
        let result = client.login(self.form.email.trim(), &self.form.password).await;
        self.loading = LoadingState::Idle;

        match result {
            Ok(_) => Effect::alert(Alert::success("Signed in successfully!"))
                .and_navigate(Route::CreateDelivery),
            // Already on the login screen, so failures never redirect
            Err(e) => {
                error!("Login error: {}", e);
                Effect::alert(Alert::error(e.to_string()))
            }
        }
    }
}
