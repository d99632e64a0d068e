//! Seat Diagram Provisioner
//!
//! Clones a reusable diagram template (zones + seat layout) into a
//! bus-owned seat diagram when a bus is created or its model changes.
//! Clones are deep copies with fresh ids and no FK back to the
//! template, so later template edits never touch provisioned buses.
//!
//! Both paths run their writes in a single transaction: either the
//! full clone (and, on re-model, the repoint + old-diagram deletion)
//! commits, or nothing does.

use shared::models::{
    Bus, BusCreate, BusDiagramModel, BusDiagramModelZone, BusModel, BusSeat, BusSeatModel,
    BusStatus, BusUpdate, SeatDiagram, SeatDiagramZone,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::{FleetError, FleetResult, status};
use crate::db::repository::{
    RepoError, bus, bus_model, bus_seat, diagram_model, diagram_model_zone, seat_diagram,
    seat_diagram_zone, seat_model,
};

/// Create a bus together with its seat diagram cloned from the
/// model's default template.
///
/// Fails with NotFound if the model or its template does not resolve.
/// Uniqueness of the registration number is the caller's concern; a
/// violation still aborts the whole transaction here.
pub async fn provision_for_create(pool: &SqlitePool, data: BusCreate) -> FleetResult<Bus> {
    let (model, template) = resolve_model_and_template(pool, data.model_id).await?;

    // Templates are effectively immutable at use time, so these reads
    // can stay outside the transaction boundary.
    let template_zones = diagram_model_zone::find_all_by_model(pool, template.id).await?;
    let template_seats = seat_model::find_all_by_model(pool, template.id).await?;

    let now = now_millis();
    let diagram = build_diagram(&model, &template, &data.registration_number, now);
    let bus = Bus {
        id: snowflake_id(),
        registration_number: data.registration_number.clone(),
        model_id: model.id,
        seat_diagram_id: diagram.id,
        status: data.status.unwrap_or(BusStatus::Active),
        notes: data.notes.clone(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    let mut tx = pool.begin().await.map_err(RepoError::from)?;
    seat_diagram::insert_tx(&mut *tx, &diagram).await?;
    for zone in &template_zones {
        seat_diagram_zone::insert_tx(&mut *tx, &clone_zone(zone, diagram.id)).await?;
    }
    for seat in &template_seats {
        bus_seat::insert_tx(&mut *tx, &clone_seat(seat, diagram.id)).await?;
    }
    bus::insert_tx(&mut *tx, &bus).await?;
    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        bus_id = bus.id,
        seat_diagram_id = diagram.id,
        zones = template_zones.len(),
        seats = template_seats.len(),
        "Provisioned seat diagram for new bus"
    );
    Ok(bus)
}

/// Apply a bus update.
///
/// Without a model change this is a plain field update. With one, the
/// new template is cloned, the bus is repointed at the new diagram and
/// only then is the previous diagram deleted, all in one transaction,
/// so no committed state ever has the bus referencing a missing or
/// half-populated diagram.
pub async fn provision_for_update(
    pool: &SqlitePool,
    existing: &Bus,
    data: BusUpdate,
) -> FleetResult<Bus> {
    // Status transitions are validated against the persisted status
    // before anything is written; a rejected transition aborts the
    // whole update, other changed fields included.
    if let Some(proposed) = data.status {
        status::validate_transition(existing.status, proposed)?;
    }

    let new_model_id = match data.model_id {
        Some(model_id) if model_id != existing.model_id => model_id,
        _ => {
            // Pass-through plain field update, no diagram work
            let updated = bus::update_fields(pool, existing.id, &data).await?;
            return Ok(updated);
        }
    };

    let (model, template) = resolve_model_and_template(pool, new_model_id).await?;
    let template_zones = diagram_model_zone::find_all_by_model(pool, template.id).await?;
    let template_seats = seat_model::find_all_by_model(pool, template.id).await?;

    let registration = data
        .registration_number
        .as_deref()
        .unwrap_or(&existing.registration_number);
    let diagram = build_diagram(&model, &template, registration, now_millis());
    let previous_diagram_id = existing.seat_diagram_id;

    let mut tx = pool.begin().await.map_err(RepoError::from)?;
    seat_diagram::insert_tx(&mut *tx, &diagram).await?;
    for zone in &template_zones {
        seat_diagram_zone::insert_tx(&mut *tx, &clone_zone(zone, diagram.id)).await?;
    }
    for seat in &template_seats {
        bus_seat::insert_tx(&mut *tx, &clone_seat(seat, diagram.id)).await?;
    }
    // Repoint before delete: the bus must never reference a diagram
    // that no longer exists.
    bus::repoint_tx(&mut *tx, existing.id, model.id, diagram.id, &data).await?;
    seat_diagram_zone::delete_by_diagram_tx(&mut *tx, previous_diagram_id).await?;
    // Seats of the old diagram cascade at the storage layer
    seat_diagram::delete_tx(&mut *tx, previous_diagram_id).await?;
    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        bus_id = existing.id,
        old_diagram = previous_diagram_id,
        new_diagram = diagram.id,
        "Replaced seat diagram after model change"
    );

    bus::find_by_id(pool, existing.id)
        .await?
        .ok_or_else(|| FleetError::NotFound(format!("Bus {} not found", existing.id)))
}

async fn resolve_model_and_template(
    pool: &SqlitePool,
    model_id: i64,
) -> FleetResult<(BusModel, BusDiagramModel)> {
    let model = bus_model::find_by_id(pool, model_id)
        .await?
        .ok_or_else(|| FleetError::NotFound(format!("Bus model {model_id} not found")))?;
    let template = diagram_model::find_by_id(pool, model.default_diagram_model_id)
        .await?
        .ok_or_else(|| {
            FleetError::NotFound(format!(
                "Diagram model {} not found",
                model.default_diagram_model_id
            ))
        })?;
    Ok((model, template))
}

/// Build the diagram row for a clone. Layout fields always come from
/// the template: it is the single source of truth for capacity.
fn build_diagram(
    model: &BusModel,
    template: &BusDiagramModel,
    registration_number: &str,
    now: i64,
) -> SeatDiagram {
    SeatDiagram {
        id: snowflake_id(),
        name: format!(
            "{} {} - {}",
            model.manufacturer, model.model_name, registration_number
        ),
        max_capacity: template.max_capacity,
        num_floors: template.num_floors,
        total_seats: template.total_seats,
        seats_per_floor: template.seats_per_floor.clone(),
        is_factory_default: false,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn clone_zone(zone: &BusDiagramModelZone, seat_diagram_id: i64) -> SeatDiagramZone {
    SeatDiagramZone {
        id: snowflake_id(),
        seat_diagram_id,
        name: zone.name.clone(),
        row_numbers: zone.row_numbers.clone(),
        price_multiplier: zone.price_multiplier,
    }
}

fn clone_seat(seat: &BusSeatModel, seat_diagram_id: i64) -> BusSeat {
    BusSeat {
        id: snowflake_id(),
        seat_diagram_id,
        floor: seat.floor,
        seat_number: seat.seat_number.clone(),
        position_row: seat.position_row,
        position_col: seat.position_col,
        amenities: seat.amenities.clone(),
        metadata: seat.metadata.clone(),
        is_active: seat.is_active,
    }
}
