use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid endpoint URL {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication failed")]
    AuthError,

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}
