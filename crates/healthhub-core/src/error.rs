//! Shared error type across HealthHub crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Backing store unreachable or query failed.
    StoreUnavailable,
    /// A composite statistic could not be assembled.
    AggregationFailure,
    /// A computed time window was malformed.
    InvalidTimeWindow,
    /// Invalid input / malformed config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::AggregationFailure => "AGGREGATION_FAILURE",
            ClientCode::InvalidTimeWindow => "INVALID_TIME_WINDOW",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HealthHubError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum HealthHubError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("aggregation failed in {query}: {source}")]
    AggregationFailure {
        query: &'static str,
        source: Box<HealthHubError>,
    },
    #[error("invalid time window: {0}")]
    InvalidTimeWindow(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl HealthHubError {
    /// Wrap a sub-query failure so the composite names the part that failed.
    pub fn aggregation(query: &'static str, source: HealthHubError) -> Self {
        HealthHubError::AggregationFailure {
            query,
            source: Box::new(source),
        }
    }

    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HealthHubError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            HealthHubError::AggregationFailure { .. } => ClientCode::AggregationFailure,
            HealthHubError::InvalidTimeWindow(_) => ClientCode::InvalidTimeWindow,
            HealthHubError::BadRequest(_) => ClientCode::BadRequest,
            HealthHubError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            HealthHubError::Internal(_) => ClientCode::Internal,
        }
    }
}
