//! Amenity API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::amenity;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Amenity, AmenityCreate, AmenityUpdate};

/// GET /api/amenities - 获取所有设施
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Amenity>>> {
    let amenities = amenity::find_all(&state.pool).await?;
    Ok(Json(amenities))
}

/// GET /api/amenities/:id - 获取单个设施
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Amenity>> {
    let amenity = amenity::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Amenity {id} not found")))?;
    Ok(Json(amenity))
}

/// POST /api/amenities - 创建设施
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AmenityCreate>,
) -> AppResult<Json<Amenity>> {
    validate_required_text(&payload.name, "name", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let amenity = amenity::create(&state.pool, payload).await?;
    Ok(Json(amenity))
}

/// PUT /api/amenities/:id - 更新设施
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AmenityUpdate>,
) -> AppResult<Json<Amenity>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let amenity = amenity::update(&state.pool, id, payload).await?;
    Ok(Json(amenity))
}

/// DELETE /api/amenities/:id - 删除设施（仍被车辆使用时拒绝）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = amenity::delete(&state.pool, id).await?;
    Ok(Json(result))
}
