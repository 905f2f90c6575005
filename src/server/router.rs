//! HTTP router assembly

use super::host::ServerHost;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router from a host
///
/// Health routes and every registered entity's routes are merged, then
/// wrapped in request tracing and, when enabled, a permissive CORS layer.
pub fn build_router(host: &ServerHost) -> Router {
    let mut app = health_routes()
        .merge(host.entity_registry.build_routes())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if host.config.server.cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "storefront"
    }))
}
