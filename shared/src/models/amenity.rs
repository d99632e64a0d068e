//! Amenity Model

use serde::{Deserialize, Serialize};

/// Bus-level amenity (WiFi, WC, air conditioning, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Amenity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Create amenity payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmenityCreate {
    pub name: String,
    pub description: Option<String>,
}

/// Update amenity payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmenityUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
