//! Static credential check in front of the operator routes
//!
//! Compares two request headers against credentials taken from the
//! environment. It keeps casual visitors off the review board and nothing more.

use super::host::ServerHost;
use crate::core::{PreorderError, RequestError};
use axum::extract::{FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::{Json, extract::rejection::JsonRejection};
use serde::Deserialize;
use std::sync::Arc;

pub const DASHBOARD_USER_HEADER: &str = "x-dashboard-user";
pub const DASHBOARD_PASSWORD_HEADER: &str = "x-dashboard-password";

/// Proof that the request carried valid dashboard credentials
///
/// Add it as a handler argument to gate a route.
#[derive(Debug, Clone, Copy)]
pub struct DashboardAccess;

impl FromRequestParts<Arc<ServerHost>> for DashboardAccess {
    type Rejection = PreorderError;

    async fn from_request_parts(
        parts: &mut Parts,
        host: &Arc<ServerHost>,
    ) -> Result<Self, Self::Rejection> {
        let credentials = host
            .credentials
            .as_ref()
            .ok_or(RequestError::CredentialsNotConfigured)?;

        let user = header_value(parts, DASHBOARD_USER_HEADER);
        let password = header_value(parts, DASHBOARD_PASSWORD_HEADER);

        if credentials.matches(user, password) {
            Ok(DashboardAccess)
        } else {
            Err(RequestError::Unauthorized {
                message: "Invalid username or password.".to_string(),
            }
            .into())
        }
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> &'a str {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Request body for the login check
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /dashboard/login
///
/// Lets a client verify credentials before storing them for later requests.
pub async fn login(
    State(host): State<Arc<ServerHost>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<StatusCode, PreorderError> {
    let Json(request) = body.map_err(|e| RequestError::InvalidBody {
        message: e.body_text(),
    })?;

    let credentials = host
        .credentials
        .as_ref()
        .ok_or(RequestError::CredentialsNotConfigured)?;

    if credentials.matches(&request.username, &request.password) {
        tracing::info!(user = %request.username, "dashboard login accepted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        tracing::warn!(user = %request.username, "dashboard login rejected");
        Err(RequestError::Unauthorized {
            message: "Invalid username or password.".to_string(),
        }
        .into())
    }
}
