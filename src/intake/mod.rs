//! Public-facing order intake flow

pub mod draft;
pub mod form;

pub use draft::OrderDraft;
pub use form::{IntakeForm, SUBMIT_FAILED_MESSAGE, SubmitError};
