//! Diagram Template API 模块
//!
//! Templates plus their nested zones and seat definitions. Zone/seat
//! create routes live under the owning template; update/delete address
//! the child row directly.

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/diagram-models", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/zones",
            get(handler::list_zones).post(handler::create_zone),
        )
        .route(
            "/{id}/zones/{zone_id}",
            put(handler::update_zone).delete(handler::delete_zone),
        )
        .route(
            "/{id}/seats",
            get(handler::list_seats).post(handler::create_seat),
        )
        .route(
            "/{id}/seats/{seat_id}",
            put(handler::update_seat).delete(handler::delete_seat),
        )
}
