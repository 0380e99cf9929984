//! The operator-facing review board
//!
//! Loads every order, derives summary counts and lets an operator move single
//! orders through their status lifecycle. Each row's update has its own
//! lifecycle: while one is pending, only that row is locked.

use super::summary::SizeSummary;
use crate::core::{OrderRecord, OrderStatus, OrderStore, StoreError};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Why a list load did not replace the current records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// A load is already outstanding; no second request was issued
    #[error("A load is already in progress")]
    InFlight,

    /// The store failed; the previous records are kept
    #[error("Error fetching pre-orders: {0}")]
    Store(StoreError),
}

/// Why a status transition was not applied
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    /// The same row already has an update outstanding
    #[error("Order '{id}' is already being updated")]
    InFlight { id: Uuid },

    /// `PENDING` is never written by an operator
    #[error("Status '{status}' cannot be set from the review board")]
    InvalidTarget { status: OrderStatus },

    /// The store failed; the row keeps its previous status
    #[error("Error updating status: {0}")]
    Store(StoreError),
}

/// One rendered order row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardRow {
    #[serde(flatten)]
    pub order: OrderRecord,
    /// Whether this row's status controls are disabled
    pub updating: bool,
}

/// What the board currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardView {
    Loading,
    Empty,
    Populated(Vec<BoardRow>),
}

#[derive(Debug, Default)]
struct BoardState {
    orders: Vec<OrderRecord>,
    loading: bool,
    updating: HashSet<Uuid>,
}

/// Order review board bound to a record store
pub struct ReviewBoard {
    store: Arc<dyn OrderStore>,
    state: Mutex<BoardState>,
}

impl ReviewBoard {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            store,
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Create a board and perform its initial load
    ///
    /// A failed initial load is logged and leaves the board empty.
    pub async fn open(store: Arc<dyn OrderStore>) -> Self {
        let board = Self::new(store);
        // Already logged inside refresh()
        let _ = board.refresh().await;
        board
    }

    fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fetch every order and replace the local list with the result
    ///
    /// Not a merge: records missing from the fresh result disappear. While a
    /// load is outstanding further calls return [`LoadError::InFlight`]
    /// without issuing a request. Returns the number of records loaded.
    pub async fn refresh(&self) -> Result<usize, LoadError> {
        let _loading = {
            let mut state = self.state();
            if state.loading {
                return Err(LoadError::InFlight);
            }
            state.loading = true;
            LoadingGuard { board: self }
        };

        match self.store.list_all().await {
            Ok(orders) => {
                let count = orders.len();
                self.state().orders = orders;
                tracing::debug!(count, "pre-orders loaded");
                Ok(count)
            }
            Err(error) => {
                tracing::error!(error = %error, "Error fetching pre-orders");
                Err(LoadError::Store(error))
            }
        }
    }

    /// Move one order to `status`
    ///
    /// The local record is patched only after the store acknowledges; on
    /// failure the row keeps its displayed status. The row is locked until the
    /// request resolves, successfully or not. Other rows stay operable.
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<(), UpdateError> {
        if !status.is_operator_target() {
            return Err(UpdateError::InvalidTarget { status });
        }

        let _row = {
            let mut state = self.state();
            if !state.updating.insert(id) {
                return Err(UpdateError::InFlight { id });
            }
            RowGuard { board: self, id }
        };

        match self.store.update_status(&id, status).await {
            Ok(()) => {
                let mut state = self.state();
                // A refresh may have dropped the row meanwhile; nothing to patch then
                if let Some(order) = state.orders.iter_mut().find(|order| order.id == id) {
                    order.status = status;
                }
                tracing::info!(order_id = %id, status = %status, "pre-order status updated");
                Ok(())
            }
            Err(error) => {
                tracing::error!(order_id = %id, error = %error, "Error updating status");
                Err(UpdateError::Store(error))
            }
        }
    }

    // === Snapshots ===

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// Whether the controls of row `id` are disabled
    pub fn is_updating(&self, id: Uuid) -> bool {
        self.state().updating.contains(&id)
    }

    /// Current records, newest first
    pub fn orders(&self) -> Vec<OrderRecord> {
        self.state().orders.clone()
    }

    pub fn order(&self, id: Uuid) -> Option<OrderRecord> {
        self.state().orders.iter().find(|order| order.id == id).cloned()
    }

    pub fn summary(&self) -> SizeSummary {
        SizeSummary::from_records(&self.state().orders)
    }

    pub fn view(&self) -> BoardView {
        let state = self.state();
        if state.loading {
            BoardView::Loading
        } else if state.orders.is_empty() {
            BoardView::Empty
        } else {
            BoardView::Populated(
                state
                    .orders
                    .iter()
                    .map(|order| BoardRow {
                        order: order.clone(),
                        updating: state.updating.contains(&order.id),
                    })
                    .collect(),
            )
        }
    }
}

/// Clears the loading flag when a load resolves or is dropped
struct LoadingGuard<'a> {
    board: &'a ReviewBoard,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.board.state().loading = false;
    }
}

/// Unlocks a row when its update resolves or is dropped
struct RowGuard<'a> {
    board: &'a ReviewBoard,
    id: Uuid,
}

impl Drop for RowGuard<'_> {
    fn drop(&mut self) {
        self.board.state().updating.remove(&self.id);
    }
}
