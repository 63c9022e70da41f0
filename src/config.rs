use config::{Config as ConfigLoader, Environment, File};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Default address of the delivery service
pub const DEFAULT_BASE_URL: &str = "http://31.97.55.154:5000";

/// Storage key the session token is kept under
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Prefix for environment variable overrides (e.g. `GAZOPTI_BASE_URL`)
pub const ENV_PREFIX: &str = "GAZOPTI";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the delivery service, without trailing `/api`
    pub base_url: String,
    /// Key the session token is stored under
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Location of the key-value storage file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

fn default_token_key() -> String {
    DEFAULT_TOKEN_KEY.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_key: default_token_key(),
            storage_path: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at the given service
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the storage file location
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Set the key the session token is stored under
    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    /// Load configuration: defaults, then the optional TOML file at `path`,
    /// then `GAZOPTI_*` environment variables
    pub fn load(path: &Path) -> Result<Self, Error> {
        let config = Self::load_unchecked(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration the same way as [`ClientConfig::load`], without
    /// validating the values
    pub fn load_unchecked(path: &Path) -> Result<Self, Error> {
        let settings = ConfigLoader::builder()
            .set_default("base_url", DEFAULT_BASE_URL)
            .and_then(|b| b.set_default("token_key", DEFAULT_TOKEN_KEY))
            .map_err(|e| Error::Config(format!("Failed to set defaults: {}", e)))?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| Error::Config(format!("Failed to load config: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("gazopti");
        path.push("config.toml");
        path
    }

    /// Storage file location, falling back to `~/.gazopti/storage.json`
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".gazopti")
                .join("storage.json")
        })
    }

    /// Absolute URL for a resource path such as `/api/trucks`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Parsed URL for a resource path
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let endpoint = self.endpoint(path);
        Url::parse(&endpoint)
            .map_err(|e| Error::Config(format!("Invalid URL '{}': {}", endpoint, e)))
    }

    /// URL of one record under `path`. `id` is pushed as a single encoded
    /// path segment.
    pub fn resource_url(&self, path: &str, id: &str) -> Result<Url, Error> {
        let mut url = self.url(path)?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base_url '{}' cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Check that the values are usable by a client
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.token_key.trim().is_empty() {
            return Err(Error::Config("token_key must not be empty".to_string()));
        }
        Ok(())
    }
}
