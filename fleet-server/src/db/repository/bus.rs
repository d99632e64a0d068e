//! Bus Repository
//!
//! Plain field updates live here; anything touching `model_id` or
//! `seat_diagram_id` goes through the provisioner so the diagram swap
//! stays atomic. Status values are validated by the status machine
//! before any of these updates run.

use super::{RepoError, RepoResult};
use shared::models::{Amenity, Bus, BusUpdate};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, registration_number, model_id, seat_diagram_id, status, notes, is_active, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Bus>> {
    let rows = sqlx::query_as::<_, Bus>(&format!(
        "SELECT {COLUMNS} FROM bus WHERE is_active = 1 ORDER BY registration_number"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Bus>> {
    let row = sqlx::query_as::<_, Bus>(&format!("SELECT {COLUMNS} FROM bus WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_registration(
    pool: &SqlitePool,
    registration_number: &str,
) -> RepoResult<Option<Bus>> {
    let row = sqlx::query_as::<_, Bus>(&format!(
        "SELECT {COLUMNS} FROM bus WHERE registration_number = ? LIMIT 1"
    ))
    .bind(registration_number)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a fully-built bus row inside an open transaction.
///
/// The row must already point at its freshly-created seat diagram.
pub async fn insert_tx(conn: &mut SqliteConnection, bus: &Bus) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO bus (id, registration_number, model_id, seat_diagram_id, status, notes, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(bus.id)
    .bind(&bus.registration_number)
    .bind(bus.model_id)
    .bind(bus.seat_diagram_id)
    .bind(bus.status)
    .bind(&bus.notes)
    .bind(bus.is_active)
    .bind(bus.created_at)
    .bind(bus.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Repoint a bus at a new model + seat diagram inside an open
/// transaction, applying any other changed fields at the same time.
///
/// Runs before the old diagram is deleted so the bus never references
/// a missing diagram at any committed point.
pub async fn repoint_tx(
    conn: &mut SqliteConnection,
    id: i64,
    new_model_id: i64,
    new_seat_diagram_id: i64,
    data: &BusUpdate,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE bus SET \
            model_id = ?1, \
            seat_diagram_id = ?2, \
            registration_number = COALESCE(?3, registration_number), \
            status = COALESCE(?4, status), \
            notes = COALESCE(?5, notes), \
            is_active = COALESCE(?6, is_active), \
            updated_at = ?7 \
         WHERE id = ?8",
    )
    .bind(new_model_id)
    .bind(new_seat_diagram_id)
    .bind(&data.registration_number)
    .bind(data.status)
    .bind(&data.notes)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Bus {id} not found")));
    }
    Ok(())
}

/// Plain field update: no diagram work.
pub async fn update_fields(pool: &SqlitePool, id: i64, data: &BusUpdate) -> RepoResult<Bus> {
    let rows = sqlx::query(
        "UPDATE bus SET \
            registration_number = COALESCE(?1, registration_number), \
            status = COALESCE(?2, status), \
            notes = COALESCE(?3, notes), \
            is_active = COALESCE(?4, is_active), \
            updated_at = ?5 \
         WHERE id = ?6",
    )
    .bind(&data.registration_number)
    .bind(data.status)
    .bind(&data.notes)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Bus {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Bus {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE bus SET is_active = 0, updated_at = ? WHERE id = ?")
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ========== Amenity assignment (set replace) ==========

pub async fn list_amenities(pool: &SqlitePool, bus_id: i64) -> RepoResult<Vec<Amenity>> {
    let rows = sqlx::query_as::<_, Amenity>(
        "SELECT a.id, a.name, a.description, a.is_active \
         FROM amenity a JOIN bus_amenity ba ON ba.amenity_id = a.id \
         WHERE ba.bus_id = ? ORDER BY a.name",
    )
    .bind(bus_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Replace the full amenity set of a bus: delete-all-then-insert in
/// one transaction. Full replace, not merge: ids absent from the new
/// set are unassigned.
pub async fn replace_amenities(
    pool: &SqlitePool,
    bus_id: i64,
    amenity_ids: &[i64],
) -> RepoResult<Vec<Amenity>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM bus_amenity WHERE bus_id = ?")
        .bind(bus_id)
        .execute(&mut *tx)
        .await?;

    for amenity_id in amenity_ids {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM amenity WHERE id = ?)")
            .bind(amenity_id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(RepoError::NotFound(format!(
                "Amenity {amenity_id} not found"
            )));
        }
        sqlx::query("INSERT INTO bus_amenity (bus_id, amenity_id) VALUES (?, ?)")
            .bind(bus_id)
            .bind(amenity_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    list_amenities(pool, bus_id).await
}
