//! Bus Model (manufacturer catalogue entry)

use serde::{Deserialize, Serialize};

/// Bus model entity: links a manufacturer model to its default
/// diagram template used when provisioning buses of this model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BusModel {
    pub id: i64,
    pub manufacturer: String,
    pub model_name: String,
    pub year: i32,
    pub max_capacity: i32,
    pub num_floors: i32,
    pub total_seats: i32,
    pub default_diagram_model_id: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create bus model payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusModelCreate {
    pub manufacturer: String,
    pub model_name: String,
    pub year: i32,
    pub max_capacity: i32,
    pub num_floors: i32,
    pub total_seats: i32,
    pub default_diagram_model_id: i64,
}

/// Update bus model payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusModelUpdate {
    pub manufacturer: Option<String>,
    pub model_name: Option<String>,
    pub year: Option<i32>,
    pub max_capacity: Option<i32>,
    pub num_floors: Option<i32>,
    pub total_seats: Option<i32>,
    pub default_diagram_model_id: Option<i64>,
    pub is_active: Option<bool>,
}
