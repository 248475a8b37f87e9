//! Lightweight in-process metrics (dependency-free).
//!
//! Request and store-query metrics are stored as atomics and rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::ServerMetrics;
