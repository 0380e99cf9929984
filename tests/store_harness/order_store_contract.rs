//! Macro-generated test suite for `OrderStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use preorder::storage::InMemoryOrderStore;
//!
//! order_store_tests!(InMemoryOrderStore::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_create_returns_fresh_identity` — ids are unique, records start PENDING
//! - `test_list_empty` — empty store lists nothing
//! - `test_list_newest_first` — creation order reversed
//! - `test_update_status_persists` — the next list reflects the transition
//! - `test_update_between_operator_targets` — CANCELLED back to CONTACTED is allowed
//! - `test_update_nonexistent` — unknown id yields `StoreError::NotFound`
//! - `test_payload_status_ignored` — a non-pending payload status is not persisted
//! - `test_concurrent_creates` — parallel creates from spawned tasks

/// Generate an `OrderStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh `OrderStore + 'static` instance; it is
/// re-evaluated for each test.
#[macro_export]
macro_rules! order_store_tests {
    ($factory:expr) => {
        mod order_store_contract_tests {
            use super::*;
            use preorder::core::{OrderStatus, OrderStore, Size, StoreError};
            use std::collections::HashSet;
            use std::sync::Arc;
            use uuid::Uuid;

            #[tokio::test]
            async fn test_create_returns_fresh_identity() {
                let store = $factory;
                let a = store.create(new_order("Alice", Size::S, 1)).await.unwrap();
                let b = store.create(new_order("Bob", Size::L, 3)).await.unwrap();
                assert_ne!(a.id, b.id);

                let all = store.list_all().await.unwrap();
                assert_eq!(all.len(), 2);
                assert!(all.iter().all(|o| o.status == OrderStatus::Pending));

                let bob = all.iter().find(|o| o.id == b.id).unwrap();
                assert_eq!(bob.name, "Bob");
                assert_eq!(bob.size, Size::L);
                assert_eq!(bob.quantity.get(), 3);
                assert_eq!(bob.created_at, b.created_at);
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list_all().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_newest_first() {
                let store = $factory;
                let receipts =
                    seed_sizes(&store, &[Size::Xs, Size::S, Size::M, Size::L, Size::Xl]).await;

                let all = store.list_all().await.unwrap();
                assert_newest_first(&all);
                let listed: Vec<Uuid> = all.iter().map(|o| o.id).collect();
                let expected: Vec<Uuid> = receipts.iter().rev().map(|r| r.id).collect();
                assert_eq!(listed, expected);
            }

            #[tokio::test]
            async fn test_update_status_persists() {
                let store = $factory;
                let receipts = seed_sizes(&store, &[Size::M, Size::M]).await;

                store
                    .update_status(&receipts[0].id, OrderStatus::Confirmed)
                    .await
                    .unwrap();

                let all = store.list_all().await.unwrap();
                let first = all.iter().find(|o| o.id == receipts[0].id).unwrap();
                let second = all.iter().find(|o| o.id == receipts[1].id).unwrap();
                assert_eq!(first.status, OrderStatus::Confirmed);
                assert_eq!(second.status, OrderStatus::Pending);
            }

            #[tokio::test]
            async fn test_update_between_operator_targets() {
                let store = $factory;
                let receipts = seed_sizes(&store, &[Size::S]).await;
                let id = receipts[0].id;

                for status in [
                    OrderStatus::Cancelled,
                    OrderStatus::Contacted,
                    OrderStatus::Confirmed,
                ] {
                    store.update_status(&id, status).await.unwrap();
                    let all = store.list_all().await.unwrap();
                    assert_eq!(all[0].status, status);
                }
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let missing = Uuid::new_v4();
                let err = store
                    .update_status(&missing, OrderStatus::Contacted)
                    .await
                    .unwrap_err();
                assert_eq!(err, StoreError::NotFound { id: missing });
            }

            #[tokio::test]
            async fn test_payload_status_ignored() {
                let store = $factory;
                let mut order = new_order("Eve", Size::Xl, 10);
                order.status = OrderStatus::Confirmed;

                let receipt = store.create(order).await.unwrap();
                let all = store.list_all().await.unwrap();
                let eve = all.iter().find(|o| o.id == receipt.id).unwrap();
                assert_eq!(eve.status, OrderStatus::Pending);
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn test_concurrent_creates() {
                let store = Arc::new($factory);
                let handles: Vec<_> = (0..8)
                    .map(|i| {
                        let store = store.clone();
                        tokio::spawn(async move {
                            store
                                .create(new_order(&format!("Buyer {}", i), Size::M, 1))
                                .await
                        })
                    })
                    .collect();

                let mut ids = HashSet::new();
                for handle in handles {
                    ids.insert(handle.await.unwrap().unwrap().id);
                }
                assert_eq!(ids.len(), 8);

                let all = store.list_all().await.unwrap();
                assert_eq!(all.len(), 8);
                assert_newest_first(&all);
            }
        }
    };
}
