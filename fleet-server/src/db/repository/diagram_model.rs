//! Diagram Template Repository

use super::{RepoError, RepoResult};
use shared::models::{BusDiagramModel, BusDiagramModelCreate, BusDiagramModelUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use sqlx::types::Json;

const COLUMNS: &str = "id, name, max_capacity, num_floors, total_seats, seats_per_floor, is_factory_default, is_active, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<BusDiagramModel>> {
    let rows = sqlx::query_as::<_, BusDiagramModel>(&format!(
        "SELECT {COLUMNS} FROM bus_diagram_model WHERE is_active = 1 ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<BusDiagramModel>> {
    let row = sqlx::query_as::<_, BusDiagramModel>(&format!(
        "SELECT {COLUMNS} FROM bus_diagram_model WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: BusDiagramModelCreate) -> RepoResult<BusDiagramModel> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO bus_diagram_model (id, name, max_capacity, num_floors, total_seats, seats_per_floor, is_factory_default, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.max_capacity)
    .bind(data.num_floors)
    .bind(data.total_seats)
    .bind(Json(&data.seats_per_floor))
    .bind(data.is_factory_default.unwrap_or(false))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create diagram model".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: BusDiagramModelUpdate,
) -> RepoResult<BusDiagramModel> {
    let rows = sqlx::query(
        "UPDATE bus_diagram_model SET \
            name = COALESCE(?1, name), \
            max_capacity = COALESCE(?2, max_capacity), \
            num_floors = COALESCE(?3, num_floors), \
            total_seats = COALESCE(?4, total_seats), \
            seats_per_floor = COALESCE(?5, seats_per_floor), \
            is_factory_default = COALESCE(?6, is_factory_default), \
            is_active = COALESCE(?7, is_active), \
            updated_at = ?8 \
         WHERE id = ?9",
    )
    .bind(&data.name)
    .bind(data.max_capacity)
    .bind(data.num_floors)
    .bind(data.total_seats)
    .bind(data.seats_per_floor.as_ref().map(Json))
    .bind(data.is_factory_default)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Diagram model {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Diagram model {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Templates stay while any bus model references them
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM bus_model WHERE default_diagram_model_id = ? AND is_active = 1",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if count > 0 {
        return Err(RepoError::Referenced(
            "Cannot delete a diagram model referenced by bus models".into(),
        ));
    }
    // Zones and seat models cascade
    sqlx::query("DELETE FROM bus_diagram_model WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}
