//! Diagram Template API Handlers
//!
//! Edits here only touch the template catalogue. Buses already
//! provisioned from a template keep their cloned diagram untouched.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{diagram_model, diagram_model_zone, seat_model};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_positive, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    BusDiagramModel, BusDiagramModelCreate, BusDiagramModelUpdate, BusDiagramModelZone,
    BusDiagramModelZoneCreate, BusDiagramModelZoneUpdate, BusSeatModel, BusSeatModelCreate,
    BusSeatModelUpdate,
};

// ========== 模板 ==========

/// GET /api/diagram-models - 获取所有座位图模板
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<BusDiagramModel>>> {
    let models = diagram_model::find_all(&state.pool).await?;
    Ok(Json(models))
}

/// GET /api/diagram-models/:id - 获取单个模板
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BusDiagramModel>> {
    let model = diagram_model::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Diagram template {id} not found")))?;
    Ok(Json(model))
}

/// POST /api/diagram-models - 创建模板
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BusDiagramModelCreate>,
) -> AppResult<Json<BusDiagramModel>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_positive(payload.max_capacity, "max_capacity")?;
    validate_positive(payload.num_floors, "num_floors")?;
    validate_positive(payload.total_seats, "total_seats")?;
    if payload.seats_per_floor.len() != payload.num_floors as usize {
        return Err(AppError::validation(
            "seats_per_floor must have one entry per floor",
        ));
    }

    let model = diagram_model::create(&state.pool, payload).await?;
    Ok(Json(model))
}

/// PUT /api/diagram-models/:id - 更新模板（不影响已克隆的座位图）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BusDiagramModelUpdate>,
) -> AppResult<Json<BusDiagramModel>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(max_capacity) = payload.max_capacity {
        validate_positive(max_capacity, "max_capacity")?;
    }

    let model = diagram_model::update(&state.pool, id, payload).await?;
    Ok(Json(model))
}

/// DELETE /api/diagram-models/:id - 删除模板（被车型引用时拒绝）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = diagram_model::delete(&state.pool, id).await?;
    Ok(Json(result))
}

// ========== 模板分区 ==========

/// GET /api/diagram-models/:id/zones - 模板分区列表
pub async fn list_zones(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<BusDiagramModelZone>>> {
    diagram_model::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Diagram template {id} not found")))?;
    let zones = diagram_model_zone::find_all_by_model(&state.pool, id).await?;
    Ok(Json(zones))
}

/// POST /api/diagram-models/:id/zones - 创建模板分区
pub async fn create_zone(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BusDiagramModelZoneCreate>,
) -> AppResult<Json<BusDiagramModelZone>> {
    validate_required_text(&payload.name, "name", MAX_SHORT_TEXT_LEN)?;
    if payload.price_multiplier <= 0.0 {
        return Err(AppError::validation("price_multiplier must be positive"));
    }
    diagram_model::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Diagram template {id} not found")))?;

    let zone = diagram_model_zone::create(&state.pool, id, payload).await?;
    Ok(Json(zone))
}

/// PUT /api/diagram-models/:id/zones/:zone_id - 更新模板分区
pub async fn update_zone(
    State(state): State<ServerState>,
    Path((id, zone_id)): Path<(i64, i64)>,
    Json(payload): Json<BusDiagramModelZoneUpdate>,
) -> AppResult<Json<BusDiagramModelZone>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(multiplier) = payload.price_multiplier
        && multiplier <= 0.0
    {
        return Err(AppError::validation("price_multiplier must be positive"));
    }
    ensure_zone_in_template(&state, id, zone_id).await?;

    let zone = diagram_model_zone::update(&state.pool, zone_id, payload).await?;
    Ok(Json(zone))
}

/// DELETE /api/diagram-models/:id/zones/:zone_id - 删除模板分区
pub async fn delete_zone(
    State(state): State<ServerState>,
    Path((id, zone_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    ensure_zone_in_template(&state, id, zone_id).await?;
    let result = diagram_model_zone::delete(&state.pool, zone_id).await?;
    Ok(Json(result))
}

/// Child rows are only addressable through their owning template.
async fn ensure_zone_in_template(state: &ServerState, id: i64, zone_id: i64) -> AppResult<()> {
    let zone = diagram_model_zone::find_by_id(&state.pool, zone_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Zone {zone_id} not found")))?;
    if zone.bus_diagram_model_id != id {
        return Err(AppError::not_found(format!(
            "Zone {zone_id} not found in diagram template {id}"
        )));
    }
    Ok(())
}

// ========== 模板座位 ==========

/// GET /api/diagram-models/:id/seats - 模板座位列表
pub async fn list_seats(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<BusSeatModel>>> {
    diagram_model::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Diagram template {id} not found")))?;
    let seats = seat_model::find_all_by_model(&state.pool, id).await?;
    Ok(Json(seats))
}

/// POST /api/diagram-models/:id/seats - 创建模板座位
pub async fn create_seat(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BusSeatModelCreate>,
) -> AppResult<Json<BusSeatModel>> {
    validate_required_text(&payload.seat_number, "seat_number", MAX_SHORT_TEXT_LEN)?;
    validate_positive(payload.floor, "floor")?;
    validate_positive(payload.position_row, "position_row")?;
    validate_positive(payload.position_col, "position_col")?;
    diagram_model::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Diagram template {id} not found")))?;

    let seat = seat_model::create(&state.pool, id, payload).await?;
    Ok(Json(seat))
}

/// PUT /api/diagram-models/:id/seats/:seat_id - 更新模板座位
pub async fn update_seat(
    State(state): State<ServerState>,
    Path((id, seat_id)): Path<(i64, i64)>,
    Json(payload): Json<BusSeatModelUpdate>,
) -> AppResult<Json<BusSeatModel>> {
    if let Some(seat_number) = &payload.seat_number {
        validate_required_text(seat_number, "seat_number", MAX_SHORT_TEXT_LEN)?;
    }
    ensure_seat_in_template(&state, id, seat_id).await?;

    let seat = seat_model::update(&state.pool, seat_id, payload).await?;
    Ok(Json(seat))
}

/// DELETE /api/diagram-models/:id/seats/:seat_id - 删除模板座位
pub async fn delete_seat(
    State(state): State<ServerState>,
    Path((id, seat_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    ensure_seat_in_template(&state, id, seat_id).await?;
    let result = seat_model::delete(&state.pool, seat_id).await?;
    Ok(Json(result))
}

async fn ensure_seat_in_template(state: &ServerState, id: i64, seat_id: i64) -> AppResult<()> {
    let seat = seat_model::find_by_id(&state.pool, seat_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Seat {seat_id} not found")))?;
    if seat.bus_diagram_model_id != id {
        return Err(AppError::not_found(format!(
            "Seat {seat_id} not found in diagram template {id}"
        )));
    }
    Ok(())
}
