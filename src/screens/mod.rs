//! Screen controllers
//!
//! Presentation-free state for each screen of the delivery app. A screen
//! action runs `idle -> loading -> (success | error) -> idle` and returns an
//! [`Effect`] telling the host UI which alert to show and where to navigate.
//! Layout and navigation wiring belong to the host.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Error;

pub mod create_delivery;
pub mod delivery_list;
pub mod edit_delivery;
pub mod login;

pub use create_delivery::CreateDeliveryScreen;
pub use delivery_list::DeliveryListScreen;
pub use edit_delivery::EditDeliveryScreen;
pub use login::LoginScreen;

/// Alert shown when the session token is missing or rejected
pub const SESSION_EXPIRED_MESSAGE: &str = "Session token not found. Please log in again.";

/// Screens the app can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    CreateDelivery,
    DeliveryList,
    EditDelivery,
}

impl Route {
    /// Route shown when the app starts
    pub fn initial() -> Self {
        Route::Home
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// User-visible alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }
}

/// What a screen action asks the host UI to do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effect {
    pub alert: Option<Alert>,
    pub navigate: Option<Route>,
}

impl Effect {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn alert(alert: Alert) -> Self {
        Self {
            alert: Some(alert),
            navigate: None,
        }
    }

    pub fn and_navigate(mut self, route: Route) -> Self {
        self.navigate = Some(route);
        self
    }

    /// Effect for a failed action. Session failures send the user to login;
    /// anything else is an error alert, prefixed with `context` when given.
    pub fn failure(err: &Error, context: Option<&str>) -> Self {
        if err.requires_login() {
            return Effect::alert(Alert::error(SESSION_EXPIRED_MESSAGE)).and_navigate(Route::Login);
        }
        let message = match context {
            Some(context) => format!("{} Details: {}", context, err),
            None => err.to_string(),
        };
        Effect::alert(Alert::error(message))
    }
}

/// Loading flag of a screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading {
        message: String,
    },
}

impl LoadingState {
    pub fn loading(message: impl Into<String>) -> Self {
        Self::Loading {
            message: message.into(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading { .. })
    }
}

/// Whether a screen is still displayed.
///
/// Clones share the flag. Blurring does not abort an in-flight request; the
/// screen only drops the result.
#[derive(Debug, Clone)]
pub struct FocusHandle {
    active: Arc<AtomicBool>,
}

impl FocusHandle {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn blur(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Default for FocusHandle {
    fn default() -> Self {
        Self::new()
    }
}
