//! Bus Seat Repository

use super::{RepoError, RepoResult};
use shared::models::{BusSeat, BusSeatUpdate};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, seat_diagram_id, floor, seat_number, position_row, position_col, amenities, metadata, is_active";

pub async fn find_all_by_diagram(
    pool: &SqlitePool,
    seat_diagram_id: i64,
) -> RepoResult<Vec<BusSeat>> {
    let rows = sqlx::query_as::<_, BusSeat>(&format!(
        "SELECT {COLUMNS} FROM bus_seat WHERE seat_diagram_id = ? ORDER BY floor, position_row, position_col"
    ))
    .bind(seat_diagram_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<BusSeat>> {
    let row = sqlx::query_as::<_, BusSeat>(&format!(
        "SELECT {COLUMNS} FROM bus_seat WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a cloned seat row inside an open transaction.
pub async fn insert_tx(conn: &mut SqliteConnection, seat: &BusSeat) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO bus_seat (id, seat_diagram_id, floor, seat_number, position_row, position_col, amenities, metadata, is_active) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(seat.id)
    .bind(seat.seat_diagram_id)
    .bind(seat.floor)
    .bind(&seat.seat_number)
    .bind(seat.position_row)
    .bind(seat.position_col)
    .bind(Json(&seat.amenities))
    .bind(Json(&seat.metadata))
    .bind(seat.is_active)
    .execute(conn)
    .await?;
    Ok(())
}

/// Post-clone seat edit: independent of the source template.
pub async fn update(pool: &SqlitePool, id: i64, data: BusSeatUpdate) -> RepoResult<BusSeat> {
    let rows = sqlx::query(
        "UPDATE bus_seat SET \
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
        return Err(RepoError::NotFound(format!("Bus seat {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Bus seat {id} not found")))
}
