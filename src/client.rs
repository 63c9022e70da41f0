use std::sync::Arc;

use reqwest::{Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::models::{
    Delivery, DeliveryUpdate, Driver, LoginRequest, LoginResponse, NewDelivery, Session, Truck,
    DRIVER_ROLE,
};
use crate::storage::{FileStore, KeyValueStore};

const LOGIN_PATH: &str = "/api/auth/login";
const DRIVERS_PATH: &str = "/api/users?role=driver";
const TRUCKS_PATH: &str = "/api/trucks";
const DELIVERIES_PATH: &str = "/api/deliveries";

/// Client for the GazOpti delivery service
pub struct GazOptiClient {
    /// HTTP client
    http: reqwest::Client,
    /// Client configuration
    config: ClientConfig,
    /// Persistent storage holding the session token
    store: Arc<dyn KeyValueStore>,
}

impl GazOptiClient {
    /// Create a new client storing its session in the configured file
    pub fn new(config: ClientConfig) -> Self {
        let store = Arc::new(FileStore::new(config.storage_path()));
        Self::with_store(config, store)
    }

    /// Create a new client on top of an existing store
    pub fn with_store(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            store,
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Read the stored session token. An empty value counts as absent.
    pub fn token(&self) -> Result<Option<String>, Error> {
        Ok(self
            .store
            .get(&self.config.token_key)?
            .filter(|token| !token.is_empty()))
    }

    /// Whether a session token is stored
    pub fn has_session(&self) -> Result<bool, Error> {
        Ok(self.token()?.is_some())
    }

    /// Sign in and persist the returned token.
    ///
    /// Driver accounts are refused and nothing is persisted for them.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        let url = self.config.endpoint(LOGIN_PATH);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let body: LoginResponse = read_response(response, Some("Invalid credentials")).await?;

        if body.role.as_deref() == Some(DRIVER_ROLE) {
            warn!("Refusing sign-in for a driver account");
            return Err(Error::RoleNotAllowed(DRIVER_ROLE.to_string()));
        }

        let token = match body.token {
            Some(token) if !token.is_empty() => token,
            _ => {
                warn!("Login succeeded, but no token received from the service");
                return Err(Error::MissingToken);
            }
        };

        self.store.set(&self.config.token_key, &token)?;
        info!("Session token saved (role: {:?})", body.role);
        Ok(Session { role: body.role })
    }

    /// Send an authenticated request and decode the JSON response.
    ///
    /// Fails with `Error::Unauthenticated` without touching the network when
    /// no token is stored.
    pub async fn request<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let text = self.send(method, self.config.url(path)?, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Send an authenticated request whose success body is not needed.
    ///
    /// Any 2xx status counts as success, whatever the body holds.
    pub async fn request_unit<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, url, body).await.map(|_| ())
    }

    async fn send<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<String, Error>
    where
        B: Serialize + ?Sized,
    {
        let token = match self.token()? {
            Some(token) => token,
            None => {
                warn!("No session token stored for {}", url.path());
                return Err(Error::Unauthenticated);
            }
        };

        debug!("Sending {} {}", method, url);

        let mut builder = self.http.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        read_body(response, None).await
    }

    /// Fetch a collection.
    ///
    /// A non-array body is treated as an empty list. Elements that do not
    /// decode are skipped with a warning.
    async fn request_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let value: Value = self.request::<(), _>(Method::GET, path, None).await?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                warn!(path, kind = json_kind(&other), "Expected a JSON array");
                return Ok(Vec::new());
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value(item) {
                Ok(record) => records.push(record),
                Err(e) => warn!(path, index, "Skipping malformed record: {}", e),
            }
        }
        Ok(records)
    }

    /// List driver accounts
    pub async fn list_drivers(&self) -> Result<Vec<Driver>, Error> {
        let drivers: Vec<Driver> = self.request_list(DRIVERS_PATH).await?;
        Ok(drivers
            .into_iter()
            .filter(|driver| driver.is_driver() && !driver.id.is_empty())
            .collect())
    }

    /// List trucks. Trucks without an id cannot be selected and are dropped.
    pub async fn list_trucks(&self) -> Result<Vec<Truck>, Error> {
        let trucks: Vec<Truck> = self.request_list(TRUCKS_PATH).await?;
        Ok(trucks
            .into_iter()
            .filter(|truck| !truck.id.is_empty())
            .collect())
    }

    /// List deliveries
    pub async fn list_deliveries(&self) -> Result<Vec<Delivery>, Error> {
        self.request_list(DELIVERIES_PATH).await
    }

    /// Create a delivery
    pub async fn create_delivery(&self, delivery: &NewDelivery) -> Result<(), Error> {
        let url = self.config.url(DELIVERIES_PATH)?;
        self.request_unit(Method::POST, url, Some(delivery)).await
    }

    /// Update the sent bottle counts of a delivery
    pub async fn update_delivery(&self, id: &str, update: &DeliveryUpdate) -> Result<(), Error> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::Validation("Delivery ID is required.".to_string()));
        }
        let url = self.config.resource_url(DELIVERIES_PATH, id)?;
        self.request_unit(Method::PATCH, url, Some(update)).await
    }
}

/// Decode a success body, or turn a failure status into `Error::Api`.
async fn read_response<R: DeserializeOwned>(
    response: Response,
    fallback: Option<&str>,
) -> Result<R, Error> {
    let body = read_body(response, fallback).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Return the raw success body, or turn a failure status into `Error::Api`.
///
/// The failure message comes from a JSON `message` field when present,
/// then `fallback`, then the status code.
async fn read_body(response: Response, fallback: Option<&str>) -> Result<String, Error> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = server_message(&body)
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        warn!("Request failed with status {}: {}", status.as_u16(), message);
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
