use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Session expired, please login again")]
    SessionExpired,

    #[error("Exchange rate unavailable: {0}")]
    RateUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server rejected request: {status_code} - {message}")]
    ServerRejected { status_code: u16, message: String },

    #[error("Invalid API response: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}
