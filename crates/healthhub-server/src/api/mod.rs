//! HTTP surface consumed by the HealthHub dashboards.
//!
//! Handlers are thin: they call one `UserMetricsService` operation and wrap
//! the result in a typed response record.

pub mod error;
pub mod users;

pub use error::ApiError;

/// Handler result type.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
