//! Router assembly for the REST exposure

use super::gate::login;
use super::handlers::{create_order, list_orders, order_summary, update_order_status};
use super::host::ServerHost;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full REST router for a host
///
/// Custom routes are merged in as-is and share the tracing and CORS layers.
pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Router {
    let mut app = health_routes().merge(order_routes(host));

    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

fn order_routes(host: Arc<ServerHost>) -> Router {
    Router::new()
        .route("/pre_orders", post(create_order).get(list_orders))
        .route("/pre_orders/summary", get(order_summary))
        .route("/pre_orders/{id}/status", patch(update_order_status))
        .route("/dashboard/login", post(login))
        .with_state(host)
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "preorder-rs"
    }))
}
