//! In-memory `UserStore` backed by `DashMap`, with optional JSON seeding.

use std::collections::BTreeMap;
use std::fs;

use async_trait::async_trait;
use dashmap::DashMap;

use healthhub_core::error::{HealthHubError, Result};
use healthhub_core::{Period, TimeWindow, User};

use super::UserStore;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        for u in users {
            store.insert(u);
        }
        store
    }

    /// Load a JSON array of stored user records.
    pub fn load_seed_file(path: &str) -> Result<Self> {
        let s = fs::read_to_string(path)
            .map_err(|e| HealthHubError::StoreUnavailable(format!("read seed {path} failed: {e}")))?;
        let users: Vec<User> = serde_json::from_str(&s)
            .map_err(|e| HealthHubError::BadRequest(format!("invalid seed {path}: {e}")))?;
        Ok(Self::from_users(users))
    }

    /// Insert or replace by id.
    pub fn insert(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        let mut out: Vec<User> = self.users.iter().map(|r| r.value().clone()).collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn count_users(&self) -> Result<u64> {
        Ok(self.users.len() as u64)
    }

    async fn count_created_within(&self, window: TimeWindow) -> Result<u64> {
        Ok(self
            .users
            .iter()
            .filter(|r| r.value().created_within(&window))
            .count() as u64)
    }

    async fn count_active_within(&self, window: TimeWindow) -> Result<u64> {
        Ok(self
            .users
            .iter()
            .filter(|r| r.value().active_within(&window))
            .count() as u64)
    }

    async fn created_per_period(&self, window: TimeWindow) -> Result<BTreeMap<Period, u64>> {
        let mut buckets = BTreeMap::new();
        for r in self.users.iter() {
            let u = r.value();
            if u.created_within(&window) {
                *buckets.entry(Period::of(u.created_at)).or_insert(0) += 1;
            }
        }
        Ok(buckets)
    }
}
