//! Amenity Repository

use super::{RepoError, RepoResult};
use shared::models::{Amenity, AmenityCreate, AmenityUpdate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Amenity>> {
    let rows = sqlx::query_as::<_, Amenity>(
        "SELECT id, name, description, is_active FROM amenity WHERE is_active = 1 ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Amenity>> {
    let row = sqlx::query_as::<_, Amenity>(
        "SELECT id, name, description, is_active FROM amenity WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: AmenityCreate) -> RepoResult<Amenity> {
    let id = snowflake_id();
    sqlx::query("INSERT INTO amenity (id, name, description) VALUES (?, ?, ?)")
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create amenity".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: AmenityUpdate) -> RepoResult<Amenity> {
    let rows = sqlx::query(
        "UPDATE amenity SET name = COALESCE(?1, name), description = COALESCE(?2, description), is_active = COALESCE(?3, is_active) WHERE id = ?4",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Amenity {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Amenity {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Check for buses still carrying this amenity
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bus_amenity WHERE amenity_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::Referenced(
            "Cannot delete an amenity assigned to buses".into(),
        ));
    }
    sqlx::query("DELETE FROM amenity WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}
