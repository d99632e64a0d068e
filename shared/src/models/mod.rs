//! Data models
//!
//! Shared between fleet-server and the admin frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake-generated).

pub mod amenity;
pub mod bus;
pub mod bus_model;
pub mod diagram_model;
pub mod seat_diagram;

// Re-exports
pub use amenity::*;
pub use bus::*;
pub use bus_model::*;
pub use diagram_model::*;
pub use seat_diagram::*;
