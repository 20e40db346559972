//! Error hierarchy for the catalog client.
//!
//! Goals:
//! - Single error type for all public client functions.
//! - Status-aware mapping (401→Unauthorized, 429→RateLimited, 5xx→Server, etc.).
//! - Structured `{code, message}` service bodies carried verbatim; the
//!   engine's classifier decides what they mean.
//! - Ergonomic `?` via `From` impls, no dynamic dispatch.

use thiserror::Error;

/// Convenient alias for client-wide results.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Transport and service failures surfaced by the catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429). `retry_after_secs` comes from the
    /// `Retry-After` header when the service sends one.
    #[error("rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Gateway/Server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (4xx/3xx) not covered above.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// JSON (de)serialization error outside a response body.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Structured error body returned by the service, carried as-is.
    #[error("service error {code}: {message}")]
    Service { code: String, message: String },

    /// Unexpected/invalid shape of a service response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return CatalogError::Timeout;
        }
        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => CatalogError::Unauthorized,
                403 => CatalogError::Forbidden,
                404 => CatalogError::NotFound,
                429 => CatalogError::RateLimited {
                    retry_after_secs: None,
                },
                500..=599 => CatalogError::Server(code),
                _ => CatalogError::HttpStatus(code),
            };
        }
        CatalogError::Network(e.to_string())
    }
}
