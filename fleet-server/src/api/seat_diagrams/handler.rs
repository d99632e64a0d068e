//! Seat Diagram API Handlers
//!
//! Post-clone edits to a bus-owned diagram. Zone and seat updates check
//! that the child row actually belongs to the addressed diagram before
//! writing, so an id from another bus's diagram cannot be edited
//! through the wrong path.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{bus_seat, seat_diagram, seat_diagram_zone};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{
    BusSeat, BusSeatUpdate, SeatDiagram, SeatDiagramZone, SeatDiagramZoneUpdate,
};

/// Diagram detail response (diagram + zones + seats)
#[derive(serde::Serialize)]
pub struct SeatDiagramDetail {
    #[serde(flatten)]
    pub diagram: SeatDiagram,
    pub zones: Vec<SeatDiagramZone>,
    pub seats: Vec<BusSeat>,
}

/// GET /api/seat-diagrams/:id - 获取座位图详情（含分区与座位）
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SeatDiagramDetail>> {
    let diagram = seat_diagram::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Seat diagram {id} not found")))?;
    let zones = seat_diagram_zone::find_all_by_diagram(&state.pool, id).await?;
    let seats = bus_seat::find_all_by_diagram(&state.pool, id).await?;
    Ok(Json(SeatDiagramDetail {
        diagram,
        zones,
        seats,
    }))
}

/// PUT /api/seat-diagrams/:id/zones/:zone_id - 更新座位图分区
pub async fn update_zone(
    State(state): State<ServerState>,
    Path((id, zone_id)): Path<(i64, i64)>,
    Json(payload): Json<SeatDiagramZoneUpdate>,
) -> AppResult<Json<SeatDiagramZone>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(multiplier) = payload.price_multiplier
        && multiplier <= 0.0
    {
        return Err(AppError::validation("price_multiplier must be positive"));
    }

    let zone = seat_diagram_zone::find_by_id(&state.pool, zone_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Zone {zone_id} not found")))?;
    if zone.seat_diagram_id != id {
        return Err(AppError::not_found(format!(
            "Zone {zone_id} not found in seat diagram {id}"
        )));
    }

    let zone = seat_diagram_zone::update(&state.pool, zone_id, payload).await?;
    Ok(Json(zone))
}

/// PUT /api/seat-diagrams/:id/seats/:seat_id - 更新座位图座位
pub async fn update_seat(
    State(state): State<ServerState>,
    Path((id, seat_id)): Path<(i64, i64)>,
    Json(payload): Json<BusSeatUpdate>,
) -> AppResult<Json<BusSeat>> {
    if let Some(seat_number) = &payload.seat_number {
        validate_required_text(seat_number, "seat_number", MAX_SHORT_TEXT_LEN)?;
    }

    let seat = bus_seat::find_by_id(&state.pool, seat_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Seat {seat_id} not found")))?;
    if seat.seat_diagram_id != id {
        return Err(AppError::not_found(format!(
            "Seat {seat_id} not found in seat diagram {id}"
        )));
    }

    let seat = bus_seat::update(&state.pool, seat_id, payload).await?;
    Ok(Json(seat))
}
