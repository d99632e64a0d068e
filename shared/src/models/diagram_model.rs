//! Diagram Template Models
//!
//! A `BusDiagramModel` is the reusable, manufacturer-level seating
//! layout. Its zones and seat models are cloned (deep copy, no FK back)
//! into a bus-owned seat diagram at provisioning time, so later template
//! edits never affect already-provisioned buses.

use serde::{Deserialize, Serialize};

/// Diagram template entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BusDiagramModel {
    pub id: i64,
    pub name: String,
    pub max_capacity: i32,
    pub num_floors: i32,
    pub total_seats: i32,
    /// Seat count per floor, index 0 = floor 1 (stored as JSON array)
    #[cfg_attr(feature = "db", sqlx(json))]
    pub seats_per_floor: Vec<i32>,
    pub is_factory_default: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create diagram template payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusDiagramModelCreate {
    pub name: String,
    pub max_capacity: i32,
    pub num_floors: i32,
    pub total_seats: i32,
    pub seats_per_floor: Vec<i32>,
    pub is_factory_default: Option<bool>,
}

/// Update diagram template payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusDiagramModelUpdate {
    pub name: Option<String>,
    pub max_capacity: Option<i32>,
    pub num_floors: Option<i32>,
    pub total_seats: Option<i32>,
    pub seats_per_floor: Option<Vec<i32>>,
    pub is_factory_default: Option<bool>,
    pub is_active: Option<bool>,
}

/// Pricing zone attached to a diagram template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BusDiagramModelZone {
    pub id: i64,
    pub bus_diagram_model_id: i64,
    pub name: String,
    /// Ordered row numbers covered by the zone (stored as JSON array)
    #[cfg_attr(feature = "db", sqlx(json))]
    pub row_numbers: Vec<i32>,
    pub price_multiplier: f64,
}

/// Create template zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusDiagramModelZoneCreate {
    pub name: String,
    pub row_numbers: Vec<i32>,
    pub price_multiplier: f64,
}

/// Update template zone payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusDiagramModelZoneUpdate {
    pub name: Option<String>,
    pub row_numbers: Option<Vec<i32>>,
    pub price_multiplier: Option<f64>,
}

/// Per-seat definition attached to a diagram template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BusSeatModel {
    pub id: i64,
    pub bus_diagram_model_id: i64,
    pub floor: i32,
    pub seat_number: String,
    pub position_row: i32,
    pub position_col: i32,
    /// Seat amenity tags, e.g. "USB", "RECLINER" (stored as JSON array)
    #[cfg_attr(feature = "db", sqlx(json))]
    pub amenities: Vec<String>,
    /// Free-form seat metadata (stored as JSON object)
    #[cfg_attr(feature = "db", sqlx(json))]
    pub metadata: serde_json::Value,
    pub is_active: bool,
}

/// Create template seat payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusSeatModelCreate {
    pub floor: i32,
    pub seat_number: String,
    pub position_row: i32,
    pub position_col: i32,
    pub amenities: Option<Vec<String>>,
    pub metadata: Option<serde_json::Value>,
}

/// Update template seat payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusSeatModelUpdate {
    pub floor: Option<i32>,
    pub seat_number: Option<String>,
    pub position_row: Option<i32>,
    pub position_col: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub metadata: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}
