//! Seat Diagram API 模块 (bus-owned clones)

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/seat-diagrams", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/zones/{zone_id}", put(handler::update_zone))
        .route("/{id}/seats/{seat_id}", put(handler::update_seat))
}
