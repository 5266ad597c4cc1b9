//! Error types.

use thiserror::Error;

/// The main error type for lnr operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-related error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status without a GraphQL error payload.
    #[error("HTTP error [{status}]: {message}")]
    Http { status: u16, message: String },

    /// The API returned a GraphQL error.
    #[error("Linear API error: {message}")]
    Api {
        code: Option<String>,
        message: String,
    },

    /// The API key was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Operation requires an API key but none was provided.
    #[error("Authentication required")]
    AuthRequired,

    /// The API rate limit was hit.
    #[error("Rate limited")]
    RateLimited,

    /// Requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A mutation reported `success: false`.
    #[error("Mutation failed: {0}")]
    MutationFailed(String),

    /// A required field was missing in the response.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Invalid argument passed to an API method.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create an API error.
    pub fn api(code: Option<String>, message: impl Into<String>) -> Self {
        Error::Api {
            code,
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }

    /// Create a missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Error::MissingField(field.into())
    }

    /// Classify a GraphQL error entry by its extension code and message.
    pub fn from_graphql(code: Option<&str>, message: &str) -> Self {
        let lower = message.to_lowercase();
        match code {
            Some("AUTHENTICATION_ERROR") | Some("FORBIDDEN") => {
                return Error::Unauthorized(message.to_owned())
            }
            Some("RATELIMITED") => return Error::RateLimited,
            _ => {}
        }
        if lower.contains("unauthorized") || lower.contains("authentication") {
            Error::Unauthorized(message.to_owned())
        } else if lower.contains("rate limit") {
            Error::RateLimited
        } else if lower.contains("not found") {
            Error::NotFound(message.to_owned())
        } else {
            Error::api(code.map(str::to_owned), message)
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::AuthRequired | Error::Unauthorized(_))
    }

    /// Check if the requested entity was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if the request was rejected by rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited)
    }
}

/// Result type alias for lnr operations.
pub type Result<T> = std::result::Result<T, Error>;
