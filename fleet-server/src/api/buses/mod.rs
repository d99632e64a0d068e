//! Bus API 模块

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/buses", routes())
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
        .route("/{id}/seat-diagram", get(handler::get_seat_diagram))
        .route("/{id}/status/next", get(handler::next_statuses))
        .route(
            "/{id}/amenities",
            put(handler::replace_amenities).get(handler::list_amenities),
        )
}
