pub mod auth;
pub mod config;
pub mod deliveries;
pub mod fleet;
