//! HTTP handlers exposing the record store
//!
//! - `POST  /pre_orders`              create (public, used by the intake form)
//! - `GET   /pre_orders`              list newest first (dashboard)
//! - `GET   /pre_orders/summary`      total and per-size counts (dashboard)
//! - `PATCH /pre_orders/{id}/status`  status transition (dashboard)

use super::gate::DashboardAccess;
use super::host::ServerHost;
use crate::board::SizeSummary;
use crate::core::{NewOrder, OrderRecord, OrderStatus, PreorderError, RequestError};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Request body for a status transition
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

fn invalid_body(rejection: JsonRejection) -> PreorderError {
    RequestError::InvalidBody {
        message: rejection.body_text(),
    }
    .into()
}

/// POST /pre_orders
///
/// The payload's status is ignored; new orders always start as `PENDING`.
pub async fn create_order(
    State(host): State<Arc<ServerHost>>,
    body: Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderRecord>), PreorderError> {
    let Json(order) = body.map_err(invalid_body)?;

    let receipt = host.store.create(order.clone()).await?;
    tracing::info!(order_id = %receipt.id, size = %order.size, "pre-order created");

    Ok((StatusCode::CREATED, Json(OrderRecord::from_new(order, receipt))))
}

/// GET /pre_orders
pub async fn list_orders(
    State(host): State<Arc<ServerHost>>,
    _access: DashboardAccess,
) -> Result<Json<Vec<OrderRecord>>, PreorderError> {
    Ok(Json(host.store.list_all().await?))
}

/// GET /pre_orders/summary
pub async fn order_summary(
    State(host): State<Arc<ServerHost>>,
    _access: DashboardAccess,
) -> Result<Json<SizeSummary>, PreorderError> {
    let orders = host.store.list_all().await?;
    Ok(Json(SizeSummary::from_records(&orders)))
}

/// PATCH /pre_orders/{id}/status
pub async fn update_order_status(
    State(host): State<Arc<ServerHost>>,
    _access: DashboardAccess,
    Path(id): Path<String>,
    body: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<StatusCode, PreorderError> {
    let id = Uuid::parse_str(&id).map_err(|_| RequestError::InvalidBody {
        message: format!("Invalid order id: '{}'", id),
    })?;
    let Json(update) = body.map_err(invalid_body)?;

    let status = update
        .status
        .parse::<OrderStatus>()
        .ok()
        .filter(OrderStatus::is_operator_target)
        .ok_or(RequestError::InvalidTransition {
            status: update.status.clone(),
        })?;

    host.store.update_status(&id, status).await?;
    tracing::info!(order_id = %id, status = %status, "pre-order status updated");

    Ok(StatusCode::NO_CONTENT)
}
