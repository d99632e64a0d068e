//! Bus Model

use serde::{Deserialize, Serialize};

/// Bus operational status
///
/// Transitions between statuses are constrained by the status state
/// machine in fleet-server; no persistence path writes this field
/// without going through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BusStatus {
    Active,
    Maintenance,
    Repair,
    OutOfService,
    Reserved,
    InTransit,
    Retired,
}

impl BusStatus {
    /// Wire name of the status (matches the stored TEXT value)
    pub fn as_str(&self) -> &'static str {
        match self {
            BusStatus::Active => "ACTIVE",
            BusStatus::Maintenance => "MAINTENANCE",
            BusStatus::Repair => "REPAIR",
            BusStatus::OutOfService => "OUT_OF_SERVICE",
            BusStatus::Reserved => "RESERVED",
            BusStatus::InTransit => "IN_TRANSIT",
            BusStatus::Retired => "RETIRED",
        }
    }
}

impl std::fmt::Display for BusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bus entity: owns exactly one live seat diagram via `seat_diagram_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Bus {
    pub id: i64,
    pub registration_number: String,
    pub model_id: i64,
    pub seat_diagram_id: i64,
    pub status: BusStatus,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create bus payload
///
/// No `seat_diagram_id`: the diagram is provisioned by cloning the
/// model's default template, never client-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusCreate {
    pub registration_number: String,
    pub model_id: i64,
    pub status: Option<BusStatus>,
    pub notes: Option<String>,
}

/// Update bus payload
///
/// A present `model_id` different from the current one triggers a full
/// seat-diagram replacement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusUpdate {
    pub registration_number: Option<String>,
    pub model_id: Option<i64>,
    pub status: Option<BusStatus>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}
