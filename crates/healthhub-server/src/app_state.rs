//! Shared application state for the HealthHub server.
//!
//! The store handle and clock are injected here once at startup; handlers
//! only ever see the metrics service built on top of them.

use std::sync::Arc;

use mockable::DefaultClock;

use healthhub_core::error::Result;

use crate::config::ServerConfig;
use crate::obs::ServerMetrics;
use crate::service::{MetricsSettings, SharedClock, UserMetricsService};
use crate::store::{InMemoryUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    service: UserMetricsService,
    metrics: Arc<ServerMetrics>,
    seeded_users: u64,
}

impl AppState {
    pub fn new(cfg: ServerConfig, store: Arc<dyn UserStore>, clock: SharedClock) -> Self {
        Self::build(cfg, store, clock, 0)
    }

    /// Build state from config: opens the in-memory store (seeded when
    /// `store.seed_path` is set) and uses the system clock.
    pub fn from_config(cfg: ServerConfig) -> Result<Self> {
        let store = match cfg.store.seed_path.as_deref() {
            Some(path) => InMemoryUserStore::load_seed_file(path)?,
            None => InMemoryUserStore::new(),
        };
        let seeded = store.len() as u64;
        tracing::info!(seeded, seed_path = ?cfg.store.seed_path, "user store ready");

        Ok(Self::build(cfg, Arc::new(store), Arc::new(DefaultClock), seeded))
    }

    fn build(
        cfg: ServerConfig,
        store: Arc<dyn UserStore>,
        clock: SharedClock,
        seeded_users: u64,
    ) -> Self {
        let metrics = Arc::new(ServerMetrics::default());
        let service = UserMetricsService::new(store, clock, MetricsSettings::from(&cfg.server))
            .with_metrics(Arc::clone(&metrics));

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                service,
                metrics,
                seeded_users,
            }),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metrics_service(&self) -> &UserMetricsService {
        &self.inner.service
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.inner.metrics
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![("healthhub_users_seeded", self.inner.seeded_users)]
    }
}
