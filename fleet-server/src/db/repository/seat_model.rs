//! Diagram Template Seat Repository

use super::{RepoError, RepoResult};
use shared::models::{BusSeatModel, BusSeatModelCreate, BusSeatModelUpdate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;
use sqlx::types::Json;

const COLUMNS: &str = "id, bus_diagram_model_id, floor, seat_number, position_row, position_col, amenities, metadata, is_active";

pub async fn find_all_by_model(
    pool: &SqlitePool,
    bus_diagram_model_id: i64,
) -> RepoResult<Vec<BusSeatModel>> {
    let rows = sqlx::query_as::<_, BusSeatModel>(&format!(
        "SELECT {COLUMNS} FROM bus_seat_model WHERE bus_diagram_model_id = ? ORDER BY floor, position_row, position_col"
    ))
    .bind(bus_diagram_model_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<BusSeatModel>> {
    let row = sqlx::query_as::<_, BusSeatModel>(&format!(
        "SELECT {COLUMNS} FROM bus_seat_model WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    bus_diagram_model_id: i64,
    data: BusSeatModelCreate,
) -> RepoResult<BusSeatModel> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO bus_seat_model (id, bus_diagram_model_id, floor, seat_number, position_row, position_col, amenities, metadata) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(bus_diagram_model_id)
    .bind(data.floor)
    .bind(&data.seat_number)
    .bind(data.position_row)
    .bind(data.position_col)
    .bind(Json(data.amenities.clone().unwrap_or_default()))
    .bind(Json(
        data.metadata.clone().unwrap_or_else(|| serde_json::json!({})),
    ))
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create template seat".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: BusSeatModelUpdate) -> RepoResult<BusSeatModel> {
    let rows = sqlx::query(
        "UPDATE bus_seat_model SET \
            floor = COALESCE(?1, floor), \
            seat_number = COALESCE(?2, seat_number), \
            position_row = COALESCE(?3, position_row), \
            position_col = COALESCE(?4, position_col), \
            amenities = COALESCE(?5, amenities), \
            metadata = COALESCE(?6, metadata), \
            is_active = COALESCE(?7, is_active) \
         WHERE id = ?8",
    )
    .bind(data.floor)
    .bind(&data.seat_number)
    .bind(data.position_row)
    .bind(data.position_col)
    .bind(data.amenities.as_ref().map(Json))
    .bind(data.metadata.as_ref().map(Json))
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Template seat {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Template seat {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM bus_seat_model WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
