//! Top-level facade crate for HealthHub.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use healthhub_core::*;
}

pub mod server {
    pub use healthhub_server::*;
}
