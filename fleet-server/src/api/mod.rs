//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`buses`] - 车辆管理接口 (含座位图置换与状态机)
//! - [`bus_models`] - 车型管理接口
//! - [`diagram_models`] - 座位图模板管理接口
//! - [`seat_diagrams`] - 座位图实例接口 (克隆后独立编辑)
//! - [`amenities`] - 设施管理接口

pub mod amenities;
pub mod bus_models;
pub mod buses;
pub mod diagram_models;
pub mod health;
pub mod seat_diagrams;

use axum::Router;
use http::HeaderValue;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(buses::router())
        .merge(bus_models::router())
        .merge(diagram_models::router())
        .merge(seat_diagrams::router())
        .merge(amenities::router())
}

/// Build a fully configured application with all middleware and state
pub fn create_router(state: ServerState) -> Router {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - the admin UI runs on a different origin
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging + request id, outermost
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(XRequestId))
        .with_state(state)
}
