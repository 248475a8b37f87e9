//! Domain services layered over the store port.

pub mod metrics;

pub use metrics::{ActivityStats, GrowthPoint, MetricsSettings, SharedClock, UserMetricsService};
