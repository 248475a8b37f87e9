//! HealthHub server library entry.
//!
//! This crate wires config, the user store port, the metrics service and the
//! HTTP surface into one server. It is consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod service;
pub mod store;
