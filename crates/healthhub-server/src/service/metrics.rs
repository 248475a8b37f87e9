//! User metrics service.
//!
//! Answers read-only aggregate questions about the user population as of the
//! request time. Each operation reads the clock once, derives its windows from
//! that instant, and issues a single store round-trip bounded by the
//! configured timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

use healthhub_core::error::{HealthHubError, Result};
use healthhub_core::{Period, TimeWindow, UserView};

use crate::config::ServerSection;
use crate::obs::ServerMetrics;
use crate::store::UserStore;

pub const QUERY_LIST: &str = "list";
pub const QUERY_COUNT: &str = "count";
pub const QUERY_NEW_THIS_MONTH: &str = "new-this-month";
pub const QUERY_ACTIVE_THIS_WEEK: &str = "active-this-week";
pub const QUERY_GROWTH: &str = "growth";

const ACTIVE_WINDOW_DAYS: i64 = 7;

/// Clock handle shared between the service and its callers.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

#[derive(Debug, Clone, Copy)]
pub struct MetricsSettings {
    pub store_timeout: Duration,
    /// Number of calendar months in the growth series, current month included.
    pub growth_months: usize,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(2),
            growth_months: 6,
        }
    }
}

impl From<&ServerSection> for MetricsSettings {
    fn from(s: &ServerSection) -> Self {
        Self {
            store_timeout: s.store_timeout(),
            growth_months: s.growth_months,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthPoint {
    pub period: Period,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    pub total_users: u64,
    pub new_this_month: u64,
    pub active_this_week: u64,
    pub growth: Vec<GrowthPoint>,
}

pub struct UserMetricsService {
    store: Arc<dyn UserStore>,
    clock: SharedClock,
    settings: MetricsSettings,
    metrics: Arc<ServerMetrics>,
}

impl UserMetricsService {
    pub fn new(store: Arc<dyn UserStore>, clock: SharedClock, settings: MetricsSettings) -> Self {
        Self {
            store,
            clock,
            settings,
            metrics: Arc::new(ServerMetrics::default()),
        }
    }

    /// Record store timings and failures into a shared registry.
    pub fn with_metrics(mut self, metrics: Arc<ServerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn settings(&self) -> MetricsSettings {
        self.settings
    }

    /// Every user, oldest first, without credentials.
    pub async fn all_users(&self) -> Result<Vec<UserView>> {
        let users = self.query(QUERY_LIST, None, self.store.list_users()).await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    pub async fn user_count(&self) -> Result<u64> {
        self.query(QUERY_COUNT, None, self.store.count_users()).await
    }

    pub async fn new_users_this_month(&self) -> Result<u64> {
        self.new_users_at(self.clock.utc()).await
    }

    pub async fn active_users_this_week(&self) -> Result<u64> {
        self.active_users_at(self.clock.utc()).await
    }

    pub async fn user_growth(&self) -> Result<Vec<GrowthPoint>> {
        self.growth_at(self.clock.utc()).await
    }

    /// All four statistics evaluated against one instant. Any failing
    /// sub-query fails the whole record.
    pub async fn activity_stats(&self) -> Result<ActivityStats> {
        let now = self.clock.utc();
        let (total_users, new_this_month, active_this_week, growth) = tokio::try_join!(
            async {
                self.user_count()
                    .await
                    .map_err(|e| HealthHubError::aggregation(QUERY_COUNT, e))
            },
            async {
                self.new_users_at(now)
                    .await
                    .map_err(|e| HealthHubError::aggregation(QUERY_NEW_THIS_MONTH, e))
            },
            async {
                self.active_users_at(now)
                    .await
                    .map_err(|e| HealthHubError::aggregation(QUERY_ACTIVE_THIS_WEEK, e))
            },
            async {
                self.growth_at(now)
                    .await
                    .map_err(|e| HealthHubError::aggregation(QUERY_GROWTH, e))
            },
        )?;

        Ok(ActivityStats {
            total_users,
            new_this_month,
            active_this_week,
            growth,
        })
    }

    async fn new_users_at(&self, now: DateTime<Utc>) -> Result<u64> {
        let window = self.window(QUERY_NEW_THIS_MONTH, now, TimeWindow::month_to_date(now))?;
        self.query(
            QUERY_NEW_THIS_MONTH,
            Some(window),
            self.store.count_created_within(window),
        )
        .await
    }

    async fn active_users_at(&self, now: DateTime<Utc>) -> Result<u64> {
        let window = self.window(
            QUERY_ACTIVE_THIS_WEEK,
            now,
            TimeWindow::trailing_days(now, ACTIVE_WINDOW_DAYS),
        )?;
        self.query(
            QUERY_ACTIVE_THIS_WEEK,
            Some(window),
            self.store.count_active_within(window),
        )
        .await
    }

    async fn growth_at(&self, now: DateTime<Utc>) -> Result<Vec<GrowthPoint>> {
        let periods = Period::trailing(now, self.settings.growth_months);
        let first = periods
            .first()
            .copied()
            .ok_or_else(|| HealthHubError::InvalidTimeWindow("growth horizon is empty".into()));
        let window = self.window(
            QUERY_GROWTH,
            now,
            first.and_then(|p| p.start()).and_then(|start| TimeWindow::new(start, now)),
        )?;

        let buckets = self
            .query(QUERY_GROWTH, Some(window), self.store.created_per_period(window))
            .await?;

        Ok(periods
            .into_iter()
            .map(|period| GrowthPoint {
                count: buckets.get(&period).copied().unwrap_or(0),
                period,
            })
            .collect())
    }

    fn window(
        &self,
        op: &'static str,
        now: DateTime<Utc>,
        computed: Result<TimeWindow>,
    ) -> Result<TimeWindow> {
        computed.map_err(|e| {
            tracing::warn!(op, now = %now.to_rfc3339(), error = %e, "time window rejected");
            self.metrics
                .store_failures
                .inc(&[("query", op), ("code", e.client_code().as_str())]);
            e
        })
    }

    async fn query<T, F>(&self, op: &'static str, window: Option<TimeWindow>, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let timeout = self.settings.store_timeout;
        let started = Instant::now();
        let res = match tokio::time::timeout(timeout, fut).await {
            Ok(r) => r,
            Err(_) => Err(HealthHubError::StoreUnavailable(format!(
                "{op} timed out after {}ms",
                timeout.as_millis()
            ))),
        };
        let elapsed = started.elapsed();
        self.metrics
            .store_query_duration
            .observe(&[("query", op)], elapsed);

        let window = window.map(|w| w.to_string()).unwrap_or_else(|| "all".into());
        match &res {
            Ok(_) => {
                tracing::debug!(op, %window, elapsed_us = elapsed.as_micros() as u64, "user metrics query ok");
            }
            Err(e) => {
                tracing::warn!(op, %window, error = %e, "user metrics query failed");
                self.metrics
                    .store_failures
                    .inc(&[("query", op), ("code", e.client_code().as_str())]);
            }
        }
        res
    }
}
