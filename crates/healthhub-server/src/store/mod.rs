//! User store port.
//!
//! The document database lives outside this service. Everything the metrics
//! service needs from it is expressed as one read-only round-trip per method,
//! so adapters can push each query down to the database.

pub mod memory;

use std::collections::BTreeMap;

use async_trait::async_trait;

use healthhub_core::error::Result;
use healthhub_core::{Period, TimeWindow, User};

pub use memory::InMemoryUserStore;

/// Read-only view of the user collection.
///
/// Windows are closed intervals. Connectivity and query failures are
/// reported as `HealthHubError::StoreUnavailable`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, oldest first (ties broken by id).
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn count_users(&self) -> Result<u64>;

    async fn count_created_within(&self, window: TimeWindow) -> Result<u64>;

    async fn count_active_within(&self, window: TimeWindow) -> Result<u64>;

    /// Users created within `window`, grouped by calendar month.
    /// Months without any creations may be absent from the map.
    async fn created_per_period(&self, window: TimeWindow) -> Result<BTreeMap<Period, u64>>;
}
