//! Bus Model Repository

use super::{RepoError, RepoResult};
use shared::models::{BusModel, BusModelCreate, BusModelUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, manufacturer, model_name, year, max_capacity, num_floors, total_seats, default_diagram_model_id, is_active, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<BusModel>> {
    let rows = sqlx::query_as::<_, BusModel>(&format!(
        "SELECT {COLUMNS} FROM bus_model WHERE is_active = 1 ORDER BY manufacturer, model_name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<BusModel>> {
    let row = sqlx::query_as::<_, BusModel>(&format!(
        "SELECT {COLUMNS} FROM bus_model WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: BusModelCreate) -> RepoResult<BusModel> {
    // The default template must resolve before anything references it
    let template_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bus_diagram_model WHERE id = ?)")
            .bind(data.default_diagram_model_id)
            .fetch_one(pool)
            .await?;
    if !template_exists {
        return Err(RepoError::NotFound(format!(
            "Diagram model {} not found",
            data.default_diagram_model_id
        )));
    }

    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO bus_model (id, manufacturer, model_name, year, max_capacity, num_floors, total_seats, default_diagram_model_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.manufacturer)
    .bind(&data.model_name)
    .bind(data.year)
    .bind(data.max_capacity)
    .bind(data.num_floors)
    .bind(data.total_seats)
    .bind(data.default_diagram_model_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create bus model".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: BusModelUpdate) -> RepoResult<BusModel> {
    if let Some(template_id) = data.default_diagram_model_id {
        let template_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bus_diagram_model WHERE id = ?)")
                .bind(template_id)
                .fetch_one(pool)
                .await?;
        if !template_exists {
            return Err(RepoError::NotFound(format!(
                "Diagram model {template_id} not found"
            )));
        }
    }

    let rows = sqlx::query(
        "UPDATE bus_model SET \
            manufacturer = COALESCE(?1, manufacturer), \
            model_name = COALESCE(?2, model_name), \
            year = COALESCE(?3, year), \
            max_capacity = COALESCE(?4, max_capacity), \
            num_floors = COALESCE(?5, num_floors), \
            total_seats = COALESCE(?6, total_seats), \
            default_diagram_model_id = COALESCE(?7, default_diagram_model_id), \
            is_active = COALESCE(?8, is_active), \
            updated_at = ?9 \
         WHERE id = ?10",
    )
    .bind(&data.manufacturer)
    .bind(&data.model_name)
    .bind(data.year)
    .bind(data.max_capacity)
    .bind(data.num_floors)
    .bind(data.total_seats)
    .bind(data.default_diagram_model_id)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Bus model {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Bus model {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Check for active buses of this model
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM bus WHERE model_id = ? AND is_active = 1")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if count > 0 {
        return Err(RepoError::Referenced(
            "Cannot delete a bus model with active buses".into(),
        ));
    }
    let rows = sqlx::query("UPDATE bus_model SET is_active = 0, updated_at = ? WHERE id = ?")
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
