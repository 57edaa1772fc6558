use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use serde_json::Value;
use thiserror::Error as ThisError;

#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<Value>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(json!({"error": message})),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.body).into_response()
    }
}

impl From<(StatusCode, &str)> for Error {
    fn from((code, msg): (StatusCode, &str)) -> Self {
        Self::new(code, msg)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        tracing::error!(%error, "token operation failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<argon2::password_hash::errors::Error> for Error {
    fn from(error: argon2::password_hash::errors::Error) -> Self {
        tracing::error!(%error, "password hashing failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

/// Failure while loading configuration from the environment.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Failure inside the user store.
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("username already taken: {0}")]
    Duplicate(String),
    #[error("no such user: {0}")]
    NotFound(String),
    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failure of a single provider call. Always recovered by the aggregator.
#[derive(Debug, ThisError)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("undecodable body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("provider reported an error: {0}")]
    Api(String),
}

/// Failure of the merge step. Surfaces to callers as a 500.
#[derive(Debug, ThisError)]
pub enum AggregateError {
    #[error("provider task for {provider} did not complete: {source}")]
    Join {
        provider: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },
}
