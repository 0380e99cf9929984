//! Record store boundary used by the intake form and the review board

use crate::core::error::StoreError;
use crate::core::order::{NewOrder, OrderRecord, OrderStatus, StoreReceipt};
use async_trait::async_trait;
use uuid::Uuid;

/// The external persistence service holding order records
///
/// Each method is an independent request/response round trip with no session
/// or transaction semantics. Records are never deleted through this trait and
/// only their status changes after creation.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order, returning the identity the store assigned to it
    async fn create(&self, order: NewOrder) -> Result<StoreReceipt, StoreError>;

    /// Every order, newest `created_at` first
    async fn list_all(&self) -> Result<Vec<OrderRecord>, StoreError>;

    /// Overwrite the status of a single order
    async fn update_status(&self, id: &Uuid, status: OrderStatus) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: OrderStore + ?Sized> OrderStore for std::sync::Arc<S> {
    async fn create(&self, order: NewOrder) -> Result<StoreReceipt, StoreError> {
        (**self).create(order).await
    }

    async fn list_all(&self) -> Result<Vec<OrderRecord>, StoreError> {
        (**self).list_all().await
    }

    async fn update_status(&self, id: &Uuid, status: OrderStatus) -> Result<(), StoreError> {
        (**self).update_status(id, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct RejectingStore;

    #[async_trait]
    impl OrderStore for RejectingStore {
        async fn create(&self, _order: NewOrder) -> Result<StoreReceipt, StoreError> {
            Err(StoreError::rejected("create", "read-only"))
        }

        async fn list_all(&self) -> Result<Vec<OrderRecord>, StoreError> {
            Ok(vec![])
        }

        async fn update_status(&self, id: &Uuid, _status: OrderStatus) -> Result<(), StoreError> {
            Err(StoreError::NotFound { id: *id })
        }
    }

    #[tokio::test]
    async fn test_arc_dyn_store_delegates() {
        let store: Arc<dyn OrderStore> = Arc::new(RejectingStore);
        assert!(store.list_all().await.unwrap().is_empty());

        let id = Uuid::new_v4();
        let err = store
            .update_status(&id, OrderStatus::Confirmed)
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound { id });
    }
}
