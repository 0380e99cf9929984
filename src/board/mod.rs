//! Operator-facing order review flow

pub mod review;
pub mod summary;

pub use review::{BoardRow, BoardView, LoadError, ReviewBoard, UpdateError};
pub use summary::SizeSummary;
