//! Diagram Template Zone Repository

use super::{RepoError, RepoResult};
use shared::models::{BusDiagramModelZone, BusDiagramModelZoneCreate, BusDiagramModelZoneUpdate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;
use sqlx::types::Json;

pub async fn find_all_by_model(
    pool: &SqlitePool,
    bus_diagram_model_id: i64,
) -> RepoResult<Vec<BusDiagramModelZone>> {
    let rows = sqlx::query_as::<_, BusDiagramModelZone>(
        "SELECT id, bus_diagram_model_id, name, row_numbers, price_multiplier \
         FROM bus_diagram_model_zone WHERE bus_diagram_model_id = ? ORDER BY id",
    )
    .bind(bus_diagram_model_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<BusDiagramModelZone>> {
    let row = sqlx::query_as::<_, BusDiagramModelZone>(
        "SELECT id, bus_diagram_model_id, name, row_numbers, price_multiplier \
         FROM bus_diagram_model_zone WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    bus_diagram_model_id: i64,
    data: BusDiagramModelZoneCreate,
) -> RepoResult<BusDiagramModelZone> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO bus_diagram_model_zone (id, bus_diagram_model_id, name, row_numbers, price_multiplier) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(bus_diagram_model_id)
    .bind(&data.name)
    .bind(Json(&data.row_numbers))
    .bind(data.price_multiplier)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create template zone".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: BusDiagramModelZoneUpdate,
) -> RepoResult<BusDiagramModelZone> {
    let rows = sqlx::query(
        "UPDATE bus_diagram_model_zone SET \
            name = COALESCE(?1, name), \
            row_numbers = COALESCE(?2, row_numbers), \
            price_multiplier = COALESCE(?3, price_multiplier) \
         WHERE id = ?4",
    )
    .bind(&data.name)
    .bind(data.row_numbers.as_ref().map(Json))
    .bind(data.price_multiplier)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Template zone {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Template zone {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM bus_diagram_model_zone WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
