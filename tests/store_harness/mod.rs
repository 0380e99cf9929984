//! Shared test harness for record store and workflow testing
//!
//! Provides order builders, a [`ScriptedStore`] whose failures and latency are
//! driven by the test, and the `order_store_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod order_store_contract;

use async_trait::async_trait;
use preorder::core::{
    NewOrder, OrderRecord, OrderStatus, OrderStore, Quantity, Size, StoreError, StoreReceipt,
};
use preorder::intake::IntakeForm;
use preorder::storage::InMemoryOrderStore;
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn new_order(name: &str, size: Size, quantity: u8) -> NewOrder {
    NewOrder::new(
        name,
        format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "555-0100",
        "1 Loop Rd",
        size,
        Quantity::new(quantity).expect("quantity in range"),
    )
}

/// Fill every field of `form` with valid values
pub fn fill_valid(form: &IntakeForm) {
    form.set_name("Ada Lovelace");
    form.set_email("ada@example.com");
    form.set_phone("555-0100");
    form.set_address("12 Analytical Row");
    form.select_size(Size::M);
    form.set_quantity_input("2");
}

/// Create one order per size in `sizes`, returning the receipts in creation order
pub async fn seed_sizes(store: &dyn OrderStore, sizes: &[Size]) -> Vec<StoreReceipt> {
    let mut receipts = Vec::with_capacity(sizes.len());
    for (i, size) in sizes.iter().enumerate() {
        let receipt = store
            .create(new_order(&format!("Buyer {}", i), *size, 1))
            .await
            .unwrap();
        receipts.push(receipt);
    }
    receipts
}

pub fn assert_newest_first(records: &[OrderRecord]) {
    for pair in records.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "{} listed before older {}",
            pair[1].id,
            pair[0].id
        );
    }
}

// ---------------------------------------------------------------------------
// ScriptedStore — in-memory store with test-controlled failures and latency
// ---------------------------------------------------------------------------

/// Record store whose behaviour each test scripts
///
/// - `fail_next_creates(n)`: the next `n` creates fail without writing
/// - `lose_next_acks(n)`: the next `n` creates write, then report failure
/// - `fail_lists(true)`: every list fails until switched off
/// - `fail_updates_for(id)`: updates of that id fail
/// - `hold()`: every call waits for a `release_one()` before running
pub struct ScriptedStore {
    pub inner: InMemoryOrderStore,
    fail_creates: AtomicUsize,
    lost_acks: AtomicUsize,
    fail_lists: AtomicBool,
    failing_updates: Mutex<HashSet<Uuid>>,
    held: AtomicBool,
    gate: Semaphore,
    create_requests: Mutex<Vec<NewOrder>>,
    list_calls: AtomicUsize,
    update_requests: Mutex<Vec<(Uuid, OrderStatus)>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::wrapping(InMemoryOrderStore::new())
    }

    pub fn wrapping(inner: InMemoryOrderStore) -> Self {
        Self {
            inner,
            fail_creates: AtomicUsize::new(0),
            lost_acks: AtomicUsize::new(0),
            fail_lists: AtomicBool::new(false),
            failing_updates: Mutex::new(HashSet::new()),
            held: AtomicBool::new(false),
            gate: Semaphore::new(0),
            create_requests: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            update_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_next_creates(&self, n: usize) {
        self.fail_creates.store(n, Ordering::SeqCst);
    }

    pub fn lose_next_acks(&self, n: usize) {
        self.lost_acks.store(n, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates_for(&self, id: Uuid) {
        self.failing_updates.lock().unwrap().insert(id);
    }

    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    /// Let exactly one held call through
    pub fn release_one(&self) {
        self.gate.add_permits(1);
    }

    /// Stop holding and let every waiting call through
    pub fn release_all(&self) {
        self.held.store(false, Ordering::SeqCst);
        self.gate.add_permits(1_024);
    }

    pub fn create_requests(&self) -> Vec<NewOrder> {
        self.create_requests.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn update_requests(&self) -> Vec<(Uuid, OrderStatus)> {
        self.update_requests.lock().unwrap().clone()
    }

    async fn pass_gate(&self) -> Result<(), StoreError> {
        if self.held.load(Ordering::SeqCst) {
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|_| StoreError::unreachable("gate closed"))?;
            permit.forget();
        }
        Ok(())
    }

    fn take_one(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl Default for ScriptedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for ScriptedStore {
    async fn create(&self, order: NewOrder) -> Result<StoreReceipt, StoreError> {
        self.create_requests.lock().unwrap().push(order.clone());
        self.pass_gate().await?;

        if Self::take_one(&self.fail_creates) {
            return Err(StoreError::unreachable("connection refused"));
        }

        let receipt = self.inner.create(order).await?;

        if Self::take_one(&self.lost_acks) {
            return Err(StoreError::unreachable("connection reset before response"));
        }
        Ok(receipt)
    }

    async fn list_all(&self) -> Result<Vec<OrderRecord>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await?;

        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(StoreError::unreachable("connection refused"));
        }
        self.inner.list_all().await
    }

    async fn update_status(&self, id: &Uuid, status: OrderStatus) -> Result<(), StoreError> {
        self.update_requests.lock().unwrap().push((*id, status));
        self.pass_gate().await?;

        if self.failing_updates.lock().unwrap().contains(id) {
            return Err(StoreError::rejected("update_status", "permission denied"));
        }
        self.inner.update_status(id, status).await
    }
}

/// Yield until `condition` holds, giving spawned tasks a chance to run
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
