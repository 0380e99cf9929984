//! Core module containing the order model, validation, errors and the store boundary

pub mod error;
pub mod events;
pub mod order;
pub mod service;
pub mod validation;

pub use error::{ConfigError, PreorderError, RequestError, StoreError, ValidationFailure};
pub use events::{NavigationSignal, SignalBus, SignalEnvelope};
pub use order::{NewOrder, OrderRecord, OrderStatus, Quantity, Size, StoreReceipt};
pub use service::OrderStore;
pub use validation::{FieldErrors, FormField};
