//! REST exposure of the record store
//!
//! Mounts the order routes, the dashboard login check and health routes on
//! an axum router built by [`ServerBuilder`].

pub mod builder;
pub mod gate;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use gate::{DASHBOARD_PASSWORD_HEADER, DASHBOARD_USER_HEADER, DashboardAccess};
pub use host::ServerHost;
