//! Maps transport failures into the small taxonomy the UI consumes.
//!
//! Classification is total: it always returns a value, so the orchestrator
//! can decide the accumulation policy without exception-driven control
//! flow. Only this module interprets service error codes and statuses.

use catalog_client::CatalogError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Coarse failure classes; the accumulation policy keys off these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryErrorKind {
    /// The backend throttled the request; existing results stay visible.
    RateLimited,
    /// Connectivity or service-side failure.
    Transport,
    /// Unexpected response shape; treated as transport for state purposes.
    Unknown,
}

/// A classified, display-ready failure. Never fatal.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub message: String,
}

fn is_rate_limit_code(code: &str) -> bool {
    matches!(
        code.to_ascii_uppercase().as_str(),
        "RATE_LIMITED" | "TOO_MANY_REQUESTS" | "THROTTLED"
    )
}

/// Total classification of a catalog failure.
pub fn classify(err: &CatalogError) -> QueryError {
    match err {
        CatalogError::RateLimited { retry_after_secs } => QueryError {
            kind: QueryErrorKind::RateLimited,
            message: match retry_after_secs {
                Some(secs) => format!("Too many requests. Try again in {secs}s."),
                None => "Too many requests. Wait a moment and try again.".to_string(),
            },
        },
        CatalogError::Service { code, .. } if is_rate_limit_code(code) => QueryError {
            kind: QueryErrorKind::RateLimited,
            message: "Too many requests. Wait a moment and try again.".to_string(),
        },
        CatalogError::Serde(_) | CatalogError::InvalidResponse(_) => {
            warn!(error = %err, "unexpected catalog response shape");
            QueryError {
                kind: QueryErrorKind::Unknown,
                message: "Something went wrong. Try again.".to_string(),
            }
        }
        _ => QueryError {
            kind: QueryErrorKind::Transport,
            message: "Couldn't reach the catalog. Check your connection and retry.".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttling_status_is_rate_limited_with_wait_hint() {
        let classified = classify(&CatalogError::RateLimited {
            retry_after_secs: Some(30),
        });
        assert_eq!(classified.kind, QueryErrorKind::RateLimited);
        assert!(classified.message.contains("30s"));
    }

    #[test]
    fn structured_throttling_code_is_rate_limited() {
        let classified = classify(&CatalogError::Service {
            code: "rate_limited".to_string(),
            message: "slow down".to_string(),
        });
        assert_eq!(classified.kind, QueryErrorKind::RateLimited);
    }

    #[test]
    fn connectivity_failures_are_transport() {
        assert_eq!(classify(&CatalogError::Timeout).kind, QueryErrorKind::Transport);
        assert_eq!(
            classify(&CatalogError::Network("reset".into())).kind,
            QueryErrorKind::Transport
        );
        assert_eq!(classify(&CatalogError::Server(502)).kind, QueryErrorKind::Transport);
    }

    #[test]
    fn unexpected_shapes_are_unknown() {
        assert_eq!(
            classify(&CatalogError::InvalidResponse("missing items".into())).kind,
            QueryErrorKind::Unknown
        );
    }
}
