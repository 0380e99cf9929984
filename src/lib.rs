//! # preorder-rs
//!
//! Core of a pre-order storefront: a customer fills the intake form, the
//! validated order is written to a record store, and an operator works
//! through the orders on a review board.
//!
//! ## Features
//!
//! - **Intake Form**: field-level validation, single in-flight submission, navigation signals
//! - **Review Board**: newest-first listing, per-size summary, per-row status updates
//! - **Record Store Boundary**: one async trait with in-memory, timeout-bounded and HTTP backends
//! - **REST Exposure**: axum routes for create/list/update with a static credential gate
//! - **Configuration-Based**: YAML file plus environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use preorder::prelude::*;
//!
//! let store: Arc<dyn OrderStore> = Arc::new(InMemoryOrderStore::new());
//! let signals = SignalBus::default();
//! let form = IntakeForm::new(store.clone(), signals.clone());
//!
//! form.set_name("Ada");
//! form.set_email("ada@example.com");
//! form.set_phone("555-0100");
//! form.set_address("1 Loop Rd");
//! form.select_size(Size::M);
//! form.set_quantity_input("2");
//! form.submit().await?;
//!
//! let board = ReviewBoard::open(store).await;
//! assert_eq!(board.summary().total(), 1);
//! ```

pub mod board;
pub mod config;
pub mod core;
pub mod intake;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        FieldErrors, FormField, NavigationSignal, NewOrder, OrderRecord, OrderStatus, OrderStore,
        PreorderError, Quantity, SignalBus, SignalEnvelope, Size, StoreError, StoreReceipt,
        ValidationFailure,
    };

    // === Workflows ===
    pub use crate::board::{BoardRow, BoardView, LoadError, ReviewBoard, SizeSummary, UpdateError};
    pub use crate::intake::{IntakeForm, OrderDraft, SubmitError};

    // === Storage ===
    #[cfg(feature = "remote")]
    pub use crate::storage::HttpOrderStore;
    pub use crate::storage::{InMemoryOrderStore, TimeoutOrderStore};

    // === Config ===
    pub use crate::config::{DashboardCredentials, StorefrontConfig};

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
