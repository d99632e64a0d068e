//! Bus API Handlers
//!
//! Creation and model-change updates go through the seat-diagram
//! provisioner; status changes go through the status machine. Handlers
//! only do input validation and uniqueness checks before handing off.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{bus, bus_seat, seat_diagram, seat_diagram_zone};
use crate::fleet::{provisioner, status};
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Amenity, Bus, BusCreate, BusSeat, BusStatus, BusUpdate, SeatDiagram, SeatDiagramZone};

/// GET /api/buses - 获取所有车辆
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Bus>>> {
    let buses = bus::find_all(&state.pool).await?;
    Ok(Json(buses))
}

/// GET /api/buses/:id - 获取单个车辆
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Bus>> {
    let bus = bus::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bus {id} not found")))?;
    Ok(Json(bus))
}

/// POST /api/buses - 创建车辆（克隆默认座位图模板）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BusCreate>,
) -> AppResult<Json<Bus>> {
    validate_required_text(
        &payload.registration_number,
        "registration_number",
        MAX_SHORT_TEXT_LEN,
    )?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    // Uniqueness is checked here, ahead of the provisioner
    if bus::find_by_registration(&state.pool, &payload.registration_number)
        .await?
        .is_some()
    {
        return Err(AppError::conflict(format!(
            "Bus {} already exists",
            payload.registration_number
        )));
    }

    let bus = provisioner::provision_for_create(&state.pool, payload).await?;
    Ok(Json(bus))
}

/// PUT /api/buses/:id - 更新车辆（变更车型时原子替换座位图）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BusUpdate>,
) -> AppResult<Json<Bus>> {
    if let Some(reg) = &payload.registration_number {
        validate_required_text(reg, "registration_number", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let existing = bus::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bus {id} not found")))?;

    if let Some(reg) = &payload.registration_number
        && *reg != existing.registration_number
        && bus::find_by_registration(&state.pool, reg).await?.is_some()
    {
        return Err(AppError::conflict(format!("Bus {reg} already exists")));
    }

    let bus = provisioner::provision_for_update(&state.pool, &existing, payload).await?;
    Ok(Json(bus))
}

/// DELETE /api/buses/:id - 删除车辆 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = bus::delete(&state.pool, id).await?;
    Ok(Json(result))
}

/// Seat diagram detail response (diagram + zones + seats)
#[derive(serde::Serialize)]
pub struct SeatDiagramDetail {
    #[serde(flatten)]
    pub diagram: SeatDiagram,
    pub zones: Vec<SeatDiagramZone>,
    pub seats: Vec<BusSeat>,
}

/// GET /api/buses/:id/seat-diagram - 获取车辆当前座位图（含分区与座位）
pub async fn get_seat_diagram(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SeatDiagramDetail>> {
    let bus = bus::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bus {id} not found")))?;
    let diagram = seat_diagram::find_by_id(&state.pool, bus.seat_diagram_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Seat diagram {} not found", bus.seat_diagram_id))
        })?;
    let zones = seat_diagram_zone::find_all_by_diagram(&state.pool, diagram.id).await?;
    let seats = bus_seat::find_all_by_diagram(&state.pool, diagram.id).await?;
    Ok(Json(SeatDiagramDetail {
        diagram,
        zones,
        seats,
    }))
}

/// GET /api/buses/:id/status/next - 当前状态可转换的目标状态列表
pub async fn next_statuses(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<BusStatus>>> {
    let bus = bus::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bus {id} not found")))?;
    Ok(Json(status::allowed_transitions(bus.status).to_vec()))
}

/// GET /api/buses/:id/amenities - 获取车辆设施列表
pub async fn list_amenities(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Amenity>>> {
    let amenities = bus::list_amenities(&state.pool, id).await?;
    Ok(Json(amenities))
}

/// Amenity assignment payload: the full new set
#[derive(serde::Deserialize)]
pub struct AmenityAssignment {
    pub amenity_ids: Vec<i64>,
}

/// PUT /api/buses/:id/amenities - 整组替换车辆设施 (full replace, not merge)
pub async fn replace_amenities(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AmenityAssignment>,
) -> AppResult<Json<Vec<Amenity>>> {
    bus::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bus {id} not found")))?;
    let amenities = bus::replace_amenities(&state.pool, id, &payload.amenity_ids).await?;
    Ok(Json(amenities))
}
