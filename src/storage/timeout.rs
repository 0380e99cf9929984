//! Bounded request wrapper for any OrderStore
//!
//! A hung request would otherwise leave its form or row "in progress" forever.
//! Wrapping the store bounds every round trip; when the bound elapses the
//! inner future is dropped, which cancels the request, and the caller sees
//! [`StoreError::Timeout`] like any other store failure.

use crate::core::{NewOrder, OrderRecord, OrderStatus, OrderStore, StoreError, StoreReceipt};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// OrderStore decorator enforcing a per-request timeout
#[derive(Clone)]
pub struct TimeoutOrderStore {
    inner: Arc<dyn OrderStore>,
    timeout: Duration,
}

impl TimeoutOrderStore {
    pub fn new(inner: Arc<dyn OrderStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        request: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                let after_ms = self.timeout.as_millis() as u64;
                tracing::warn!(operation, after_ms, "record store request timed out");
                Err(StoreError::Timeout {
                    operation: operation.to_string(),
                    after_ms,
                })
            }
        }
    }
}

#[async_trait]
impl OrderStore for TimeoutOrderStore {
    async fn create(&self, order: NewOrder) -> Result<StoreReceipt, StoreError> {
        self.bounded("create", self.inner.create(order)).await
    }

    async fn list_all(&self) -> Result<Vec<OrderRecord>, StoreError> {
        self.bounded("list_all", self.inner.list_all()).await
    }

    async fn update_status(&self, id: &Uuid, status: OrderStatus) -> Result<(), StoreError> {
        self.bounded("update_status", self.inner.update_status(id, status))
            .await
    }
}
