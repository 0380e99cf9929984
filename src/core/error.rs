//! Typed error handling for the pre-order workflow
//!
//! # Error Categories
//!
//! - [`ValidationFailure`]: Local, per-field input problems. Never reach the store.
//! - [`StoreError`]: Any failure of a create/list/update round trip
//! - [`ConfigError`]: Configuration parsing and validation
//! - [`RequestError`]: HTTP-level problems in the REST exposure
//!
//! [`PreorderError`] wraps the two that cross the REST exposure and maps each
//! onto an HTTP status code and a machine-readable error code.
//! Validation failures stay with the intake form; configuration errors are
//! reported at startup and never reach a handler.
//!
//! # Example
//!
//! ```rust,ignore
//! match store.update_status(&id, OrderStatus::Confirmed).await {
//!     Ok(()) => {}
//!     Err(StoreError::NotFound { id }) => println!("order {} is gone", id),
//!     Err(e) => eprintln!("store failure: {}", e),
//! }
//! ```

use crate::core::validation::FormField;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Error returned by the REST handlers
#[derive(Debug)]
pub enum PreorderError {
    /// Record store failures
    Store(StoreError),

    /// HTTP/Request errors
    Request(RequestError),
}

impl fmt::Display for PreorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreorderError::Store(e) => write!(f, "{}", e),
            PreorderError::Request(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PreorderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreorderError::Store(e) => Some(e),
            PreorderError::Request(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl PreorderError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PreorderError::Store(e) => e.status_code(),
            PreorderError::Request(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PreorderError::Store(e) => e.error_code(),
            PreorderError::Request(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            PreorderError::Store(StoreError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for PreorderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Failures
// =============================================================================

/// Why a single form field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    /// Required text is empty after trimming
    MissingField,

    /// Text is present but badly shaped
    InvalidFormat,

    /// No option was selected
    MissingSelection,

    /// Number falls outside its allowed range
    OutOfRange,
}

impl ValidationFailure {
    /// Message shown next to the offending field
    pub fn message(&self, field: FormField) -> String {
        match (self, field) {
            (ValidationFailure::MissingField, FormField::Name) => "Name is required".into(),
            (ValidationFailure::MissingField, FormField::Email) => "Email is required".into(),
            (ValidationFailure::MissingField, FormField::Phone) => "Phone is required".into(),
            (ValidationFailure::MissingField, FormField::Address) => "Address is required".into(),
            (ValidationFailure::InvalidFormat, FormField::Email) => "Invalid email address".into(),
            (ValidationFailure::MissingSelection, FormField::Size) => {
                "Please select a size".into()
            }
            (ValidationFailure::OutOfRange, FormField::Quantity) => {
                "Quantity must be between 1 and 10".into()
            }
            (failure, field) => format!("{} is invalid ({})", field, failure),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationFailure::MissingField => "missing field",
            ValidationFailure::InvalidFormat => "invalid format",
            ValidationFailure::MissingSelection => "missing selection",
            ValidationFailure::OutOfRange => "out of range",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Failure of a single record store round trip
///
/// Every variant is recoverable: callers return to a stable state and leave
/// retrying to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (network, lock poisoning, closed connection)
    #[error("Record store unreachable: {message}")]
    Unreachable { message: String },

    /// The store answered but refused the request
    #[error("Record store rejected {operation}: {message}")]
    Rejected { operation: String, message: String },

    /// No record carries the given id
    #[error("Order with id '{id}' not found")]
    NotFound { id: Uuid },

    /// The request did not complete within the configured bound
    #[error("Record store {operation} timed out after {after_ms}ms")]
    Timeout { operation: String, after_ms: u64 },
}

impl StoreError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        StoreError::Unreachable {
            message: message.into(),
        }
    }

    pub fn rejected(operation: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Rejected {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Unreachable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Rejected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Unreachable { .. } => "STORE_UNREACHABLE",
            StoreError::Rejected { .. } => "STORE_REJECTED",
            StoreError::NotFound { .. } => "ORDER_NOT_FOUND",
            StoreError::Timeout { .. } => "STORE_TIMEOUT",
        }
    }
}

impl From<StoreError> for PreorderError {
    fn from(err: StoreError) -> Self {
        PreorderError::Store(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is present but unusable
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Invalid request body
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Status that operators are not allowed to write
    #[error("Status '{status}' cannot be set by an operator")]
    InvalidTransition { status: String },

    /// Wrong or missing dashboard credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Dashboard credentials absent from the environment
    #[error(
        "Dashboard credentials are not configured. Set DASHBOARD_USER and DASHBOARD_PASSWORD in your environment."
    )]
    CredentialsNotConfigured,
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::CredentialsNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::InvalidTransition { .. } => "INVALID_TRANSITION",
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::CredentialsNotConfigured => "CREDENTIALS_NOT_CONFIGURED",
        }
    }
}

impl From<RequestError> for PreorderError {
    fn from(err: RequestError) -> Self {
        PreorderError::Request(err)
    }
}
