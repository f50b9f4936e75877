//! Error types for the hub GraphQL client.

use hubconsole_core::Error as CoreError;
use thiserror::Error;

/// Result type alias for hub client operations.
pub type Result<T> = std::result::Result<T, HubClientError>;

/// Errors that can occur while talking to the hub.
#[derive(Debug, Error)]
pub enum HubClientError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success HTTP status from the endpoint
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The GraphQL response carried an `errors` array
    #[error("GraphQL error: {}", .messages.join(", "))]
    GraphQl { messages: Vec<String> },

    /// A successful response without the expected `data` field
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Invalid request (bad endpoint URL, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl HubClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn missing_data(field: impl Into<String>) -> Self {
        Self::MissingData(field.into())
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<HubClientError> for CoreError {
    fn from(err: HubClientError) -> Self {
        match err {
            HubClientError::GraphQl { messages } => CoreError::from_messages(messages),
            HubClientError::Json(err) => CoreError::Serialization(err),
            HubClientError::InvalidRequest(message) => CoreError::Validation(message),
            other => CoreError::Transport(other.to_string()),
        }
    }
}
