//! Seat Diagram Models (bus-owned instances)
//!
//! Created by cloning a diagram template when a bus is created or
//! re-modeled. Independently editable afterward; rows carry no FK back
//! to their source template.

use serde::{Deserialize, Serialize};

/// Seat diagram instance: exactly one live diagram per bus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SeatDiagram {
    pub id: i64,
    pub name: String,
    pub max_capacity: i32,
    pub num_floors: i32,
    pub total_seats: i32,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub seats_per_floor: Vec<i32>,
    /// Always false for provisioned clones
    pub is_factory_default: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Zone cloned from a template zone, scoped to one seat diagram
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SeatDiagramZone {
    pub id: i64,
    pub seat_diagram_id: i64,
    pub name: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub row_numbers: Vec<i32>,
    pub price_multiplier: f64,
}

/// Update payload for a post-clone zone edit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatDiagramZoneUpdate {
    pub name: Option<String>,
    pub row_numbers: Option<Vec<i32>>,
    pub price_multiplier: Option<f64>,
}

/// Physical seat cloned from a template seat, scoped to one seat diagram
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BusSeat {
    pub id: i64,
    pub seat_diagram_id: i64,
    pub floor: i32,
    pub seat_number: String,
    pub position_row: i32,
    pub position_col: i32,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub amenities: Vec<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub metadata: serde_json::Value,
    pub is_active: bool,
}

/// Update payload for a post-clone seat edit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusSeatUpdate {
    pub floor: Option<i32>,
    pub seat_number: Option<String>,
    pub position_row: Option<i32>,
    pub position_col: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub metadata: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}
