//! Bus Model API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::bus_model;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_positive, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{BusModel, BusModelCreate, BusModelUpdate};

/// GET /api/bus-models - 获取所有车型
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<BusModel>>> {
    let models = bus_model::find_all(&state.pool).await?;
    Ok(Json(models))
}

/// GET /api/bus-models/:id - 获取单个车型
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BusModel>> {
    let model = bus_model::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bus model {id} not found")))?;
    Ok(Json(model))
}

/// POST /api/bus-models - 创建车型
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BusModelCreate>,
) -> AppResult<Json<BusModel>> {
    validate_required_text(&payload.manufacturer, "manufacturer", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.model_name, "model_name", MAX_NAME_LEN)?;
    validate_positive(payload.max_capacity, "max_capacity")?;
    validate_positive(payload.num_floors, "num_floors")?;
    validate_positive(payload.total_seats, "total_seats")?;

    let model = bus_model::create(&state.pool, payload).await?;
    Ok(Json(model))
}

/// PUT /api/bus-models/:id - 更新车型
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BusModelUpdate>,
) -> AppResult<Json<BusModel>> {
    if let Some(manufacturer) = &payload.manufacturer {
        validate_required_text(manufacturer, "manufacturer", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(model_name) = &payload.model_name {
        validate_required_text(model_name, "model_name", MAX_NAME_LEN)?;
    }
    if let Some(max_capacity) = payload.max_capacity {
        validate_positive(max_capacity, "max_capacity")?;
    }

    let model = bus_model::update(&state.pool, id, payload).await?;
    Ok(Json(model))
}

/// DELETE /api/bus-models/:id - 删除车型 (软删除，有在役车辆时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = bus_model::delete(&state.pool, id).await?;
    Ok(Json(result))
}
