//! Seat Diagram Repository (bus-owned instances)
//!
//! Inserts and deletes run through `*_tx` helpers so the provisioner
//! can keep the whole clone/repoint/delete sequence in one transaction.

use super::{RepoError, RepoResult};
use shared::models::SeatDiagram;
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, name, max_capacity, num_floors, total_seats, seats_per_floor, is_factory_default, is_active, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SeatDiagram>> {
    let row = sqlx::query_as::<_, SeatDiagram>(&format!(
        "SELECT {COLUMNS} FROM seat_diagram WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a fully-built diagram row inside an open transaction.
pub async fn insert_tx(conn: &mut SqliteConnection, diagram: &SeatDiagram) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO seat_diagram (id, name, max_capacity, num_floors, total_seats, seats_per_floor, is_factory_default, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(diagram.id)
    .bind(&diagram.name)
    .bind(diagram.max_capacity)
    .bind(diagram.num_floors)
    .bind(diagram.total_seats)
    .bind(Json(&diagram.seats_per_floor))
    .bind(diagram.is_factory_default)
    .bind(diagram.is_active)
    .bind(diagram.created_at)
    .bind(diagram.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Delete a diagram row inside an open transaction.
///
/// Owned seats cascade at the storage layer; zones are deleted
/// explicitly by the caller before this runs.
pub async fn delete_tx(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM seat_diagram WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Seat diagram {id} not found")));
    }
    Ok(())
}
