//! Shared types for the fleet inventory backend
//!
//! Data models and ID/time utilities used by fleet-server and exposed
//! to API consumers. DB row derives are feature-gated behind `db` so
//! frontend-facing builds don't pull in sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
