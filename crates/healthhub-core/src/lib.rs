//! HealthHub core: domain records, calendar/time-window arithmetic, and the
//! shared error surface.
//!
//! This crate defines the user model and the window math consumed by the
//! metrics service and the HTTP layer. It carries no runtime, storage, or HTTP
//! dependencies so store adapters and tooling can reuse it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `HealthHubError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod user;
pub mod window;

/// Shared result type.
pub use error::{Result, HealthHubError};
pub use user::{Role, User, UserView};
pub use window::{Period, TimeWindow};
