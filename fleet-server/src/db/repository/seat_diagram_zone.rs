//! Seat Diagram Zone Repository

use super::{RepoError, RepoResult};
use shared::models::{SeatDiagramZone, SeatDiagramZoneUpdate};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_all_by_diagram(
    pool: &SqlitePool,
    seat_diagram_id: i64,
) -> RepoResult<Vec<SeatDiagramZone>> {
    let rows = sqlx::query_as::<_, SeatDiagramZone>(
        "SELECT id, seat_diagram_id, name, row_numbers, price_multiplier \
         FROM seat_diagram_zone WHERE seat_diagram_id = ? ORDER BY id",
    )
    .bind(seat_diagram_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SeatDiagramZone>> {
    let row = sqlx::query_as::<_, SeatDiagramZone>(
        "SELECT id, seat_diagram_id, name, row_numbers, price_multiplier \
         FROM seat_diagram_zone WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a cloned zone row inside an open transaction.
pub async fn insert_tx(conn: &mut SqliteConnection, zone: &SeatDiagramZone) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO seat_diagram_zone (id, seat_diagram_id, name, row_numbers, price_multiplier) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(zone.id)
    .bind(zone.seat_diagram_id)
    .bind(&zone.name)
    .bind(Json(&zone.row_numbers))
    .bind(zone.price_multiplier)
    .execute(conn)
    .await?;
    Ok(())
}

/// Delete all zones of a diagram inside an open transaction.
pub async fn delete_by_diagram_tx(conn: &mut SqliteConnection, seat_diagram_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM seat_diagram_zone WHERE seat_diagram_id = ?")
        .bind(seat_diagram_id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected())
}

/// Post-clone zone edit: independent of the source template.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: SeatDiagramZoneUpdate,
) -> RepoResult<SeatDiagramZone> {
    let rows = sqlx::query(
        "UPDATE seat_diagram_zone SET \
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
        return Err(RepoError::NotFound(format!("Diagram zone {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Diagram zone {id} not found")))
}
