//! Shared fixtures: pinned clock, user builder, and misbehaving stores.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use healthhub_core::error::{HealthHubError, Result};
use healthhub_core::{Period, Role, TimeWindow, User};
use healthhub_server::app_state::AppState;
use healthhub_server::config;
use healthhub_server::service::SharedClock;
use healthhub_server::store::{InMemoryUserStore, UserStore};

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

/// Request time used across tests.
pub fn now() -> DateTime<Utc> {
    at(2026, 10, 18, 12, 0, 0)
}

pub fn clock() -> SharedClock {
    Arc::new(FixedClock(now()))
}

pub fn user(id: &str, created_at: DateTime<Utc>, last_active_at: Option<DateTime<Utc>>) -> User {
    User {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        first_name: id.to_uppercase(),
        last_name: "Tester".to_string(),
        role: Role::User,
        password_hash: format!("hash-of-{id}"),
        created_at,
        last_active_at,
    }
}

/// Three users in three different months, one active in the last week.
pub fn three_month_store() -> InMemoryUserStore {
    InMemoryUserStore::from_users([
        user("aug", at(2026, 8, 10, 9, 0, 0), Some(at(2026, 8, 20, 0, 0, 0))),
        user("sep", at(2026, 9, 5, 9, 0, 0), None),
        user("oct", at(2026, 10, 2, 9, 0, 0), Some(at(2026, 10, 15, 0, 0, 0))),
    ])
}

pub fn test_state(store: Arc<dyn UserStore>) -> AppState {
    let cfg = config::load_from_str("version: 1\nserver:\n  store_timeout_ms: 200\n").unwrap();
    AppState::new(cfg, store, clock())
}

/// Fails one named query with `StoreUnavailable`; the rest are empty.
pub struct FailingStore {
    pub fail: &'static str,
}

impl FailingStore {
    fn check(&self, query: &'static str) -> Result<()> {
        if self.fail == query {
            return Err(HealthHubError::StoreUnavailable(format!("{query}: connection refused")));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for FailingStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.check("list")?;
        Ok(vec![])
    }

    async fn count_users(&self) -> Result<u64> {
        self.check("count")?;
        Ok(0)
    }

    async fn count_created_within(&self, _window: TimeWindow) -> Result<u64> {
        self.check("new-this-month")?;
        Ok(0)
    }

    async fn count_active_within(&self, _window: TimeWindow) -> Result<u64> {
        self.check("active-this-week")?;
        Ok(0)
    }

    async fn created_per_period(&self, _window: TimeWindow) -> Result<BTreeMap<Period, u64>> {
        self.check("growth")?;
        Ok(BTreeMap::new())
    }
}

/// Never answers `count_users` within any sensible timeout.
pub struct StalledStore;

#[async_trait]
impl UserStore for StalledStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(vec![])
    }

    async fn count_users(&self) -> Result<u64> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(0)
    }

    async fn count_created_within(&self, _window: TimeWindow) -> Result<u64> {
        Ok(0)
    }

    async fn count_active_within(&self, _window: TimeWindow) -> Result<u64> {
        Ok(0)
    }

    async fn created_per_period(&self, _window: TimeWindow) -> Result<BTreeMap<Period, u64>> {
        Ok(BTreeMap::new())
    }
}
