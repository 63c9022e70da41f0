use thiserror::Error;

/// SDK Error type
#[derive(Error, Debug)]
pub enum Error {
    /// No session token is stored, or the service rejected it
    #[error("Session token not found. Please log in again.")]
    Unauthenticated,

    /// Network or transport failure before a response was received
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status returned by the service
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Client-side validation failure, raised before any request is sent
    #[error("{0}")]
    Validation(String),

    /// The account's role is not allowed to sign in from this client
    #[error("Drivers cannot sign in yet.")]
    RoleNotAllowed(String),

    /// Login succeeded but the response carried no token
    #[error("Signed in, but no authentication token was received.")]
    MissingToken,

    /// Local key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the caller should send the user back to the login screen
    pub fn requires_login(&self) -> bool {
        match self {
            Error::Unauthenticated => true,
            Error::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// HTTP status code for errors returned by the service
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
