//! Record store implementations

#[cfg(feature = "remote")]
pub mod http;
pub mod in_memory;
pub mod timeout;

#[cfg(feature = "remote")]
pub use http::HttpOrderStore;
pub use in_memory::InMemoryOrderStore;
pub use timeout::TimeoutOrderStore;
