//! In-memory implementation of OrderStore for testing and development

use crate::core::order::sort_newest_first;
use crate::core::{NewOrder, OrderRecord, OrderStatus, OrderStore, StoreError, StoreReceipt};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    orders: HashMap<Uuid, OrderRecord>,
    last_created_at: Option<DateTime<Utc>>,
}

/// In-memory order store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Creation timestamps are strictly increasing, so listing order always
/// matches insertion order.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryOrderStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already materialized record, keeping its id and timestamp
    pub fn seed(&self, record: OrderRecord) -> Result<(), StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| StoreError::unreachable(format!("Failed to acquire write lock: {}", e)))?;

        if inner.last_created_at.is_none_or(|last| record.created_at > last) {
            inner.last_created_at = Some(record.created_at);
        }
        inner.orders.insert(record.id, record);
        Ok(())
    }

    /// Fetch a single record by id
    pub fn get(&self, id: &Uuid) -> Result<Option<OrderRecord>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| StoreError::unreachable(format!("Failed to acquire read lock: {}", e)))?;

        Ok(inner.orders.get(id).cloned())
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: NewOrder) -> Result<StoreReceipt, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| StoreError::unreachable(format!("Failed to acquire write lock: {}", e)))?;

        let mut receipt = StoreReceipt::new();
        if let Some(last) = inner.last_created_at
            && receipt.created_at <= last
        {
            receipt.created_at = last + Duration::microseconds(1);
        }
        inner.last_created_at = Some(receipt.created_at);

        let record = OrderRecord::from_new(order, receipt);
        inner.orders.insert(record.id, record);

        Ok(receipt)
    }

    async fn list_all(&self) -> Result<Vec<OrderRecord>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| StoreError::unreachable(format!("Failed to acquire read lock: {}", e)))?;

        let mut records: Vec<OrderRecord> = inner.orders.values().cloned().collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn update_status(&self, id: &Uuid, status: OrderStatus) -> Result<(), StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| StoreError::unreachable(format!("Failed to acquire write lock: {}", e)))?;

        let record = inner
            .orders
            .get_mut(id)
            .ok_or(StoreError::NotFound { id: *id })?;
        record.status = status;

        Ok(())
    }
}
