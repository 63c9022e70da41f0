pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod screens;
pub mod storage;

// Re-export the HTTP types used by `GazOptiClient::request` and `request_unit`
pub use reqwest::{Method, Url};

pub use client::GazOptiClient;
pub use config::ClientConfig;
pub use error::Error;
pub use models::{Delivery, DeliveryUpdate, Driver, NewDelivery, Reference, Session, Truck};
pub use screens::{Alert, AlertKind, Effect, FocusHandle, Route};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
