//! The order intake form
//!
//! Holds the buyer's field state, validates it on submit, issues at most one
//! creation request at a time and signals navigation on success.
//!
//! State lives behind a mutex that is never held across an await, so field
//! edits stay possible while a submission is in flight, exactly like the
//! inputs of a form whose only disabled control is the submit button.

use super::draft::OrderDraft;
use crate::core::validation::{FieldErrors, FormField};
use crate::core::{NavigationSignal, OrderStore, Quantity, SignalBus, Size, StoreError, StoreReceipt};
use std::sync::{Arc, Mutex, MutexGuard};

/// Submission-level message shown when the store refuses or cannot be reached
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit pre-order. Please try again.";

/// Why a submit attempt did not produce an order
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Local validation failed; no request was issued
    #[error("Validation errors: {0}")]
    Invalid(FieldErrors),

    /// The creation request failed; every field is kept as entered
    #[error("Failed to submit pre-order: {0}")]
    Store(StoreError),

    /// A previous submission has not resolved yet
    #[error("A submission is already in progress")]
    InFlight,
}

#[derive(Debug, Default)]
struct FormState {
    draft: OrderDraft,
    errors: FieldErrors,
    submit_error: Option<String>,
    submitting: bool,
    open: bool,
}

impl FormState {
    fn reset(&mut self) {
        self.draft = OrderDraft::default();
        self.errors = FieldErrors::new();
        self.submit_error = None;
    }
}

/// Order intake form bound to a record store
///
/// # Example
///
/// ```rust,ignore
/// let form = IntakeForm::new(Arc::new(InMemoryOrderStore::new()), SignalBus::default());
/// form.open();
/// form.set_name("Ada");
/// form.set_email("ada@example.com");
/// form.set_phone("555-0100");
/// form.set_address("1 Loop Rd");
/// form.select_size(Size::M);
/// let receipt = form.submit().await?;
/// ```
pub struct IntakeForm {
    store: Arc<dyn OrderStore>,
    signals: SignalBus,
    state: Mutex<FormState>,
}

impl IntakeForm {
    pub fn new(store: Arc<dyn OrderStore>, signals: SignalBus) -> Self {
        Self {
            store,
            signals,
            state: Mutex::new(FormState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        // Field state stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // === Presentation ===

    /// Show the form
    pub fn open(&self) {
        self.state().open = true;
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }

    // === Field edits ===

    fn edit(&self, field: FormField, apply: impl FnOnce(&mut OrderDraft)) {
        let mut state = self.state();
        apply(&mut state.draft);
        state.errors.clear(field);
    }

    pub fn set_name(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(FormField::Name, |draft| draft.name = value);
    }

    pub fn set_email(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(FormField::Email, |draft| draft.email = value);
    }

    pub fn set_phone(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(FormField::Phone, |draft| draft.phone = value);
    }

    pub fn set_address(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(FormField::Address, |draft| draft.address = value);
    }

    pub fn select_size(&self, size: Size) {
        self.edit(FormField::Size, |draft| draft.size = Some(size));
    }

    /// Accept raw text from the quantity input, clamping it into range as typed
    pub fn set_quantity_input(&self, raw: &str) -> Quantity {
        let quantity = Quantity::from_input(raw);
        self.edit(FormField::Quantity, |draft| draft.quantity = quantity);
        quantity
    }

    /// Set the quantity from a number, clamping it into range
    pub fn set_quantity(&self, value: i64) -> Quantity {
        let quantity = Quantity::clamped(value);
        self.edit(FormField::Quantity, |draft| draft.quantity = quantity);
        quantity
    }

    // === Snapshots ===

    pub fn draft(&self) -> OrderDraft {
        self.state().draft.clone()
    }

    /// Field errors from the last submit attempt, minus fields edited since
    pub fn errors(&self) -> FieldErrors {
        self.state().errors.clone()
    }

    pub fn submit_error(&self) -> Option<String> {
        self.state().submit_error.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    pub fn is_complete(&self) -> bool {
        self.state().draft.is_complete()
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        let state = self.state();
        state.draft.is_complete() && !state.submitting
    }

    // === Operations ===

    /// Validate and, when everything passes, issue one creation request
    ///
    /// On success the form is cleared and closed and
    /// [`NavigationSignal::SubmissionSucceeded`] is published once. On store
    /// failure nothing the buyer typed is lost and the submission-level error
    /// is set; retrying is left to the buyer.
    ///
    /// A retry after a false-negative failure (the write landed but the
    /// acknowledgement was lost) creates a second record. No deduplication key
    /// is sent.
    pub async fn submit(&self) -> Result<StoreReceipt, SubmitError> {
        let (order, in_flight) = {
            let mut state = self.state();
            if state.submitting {
                return Err(SubmitError::InFlight);
            }

            state.submit_error = None;
            state.errors = state.draft.validate();
            if !state.errors.is_empty() {
                tracing::debug!(fields = %state.errors, "pre-order rejected by validation");
                return Err(SubmitError::Invalid(state.errors.clone()));
            }

            let Some(order) = state.draft.to_new_order() else {
                // validate() already reports a missing size
                return Err(SubmitError::Invalid(state.errors.clone()));
            };
            state.submitting = true;
            (order, SubmittingGuard::new(self))
        };

        let result = self.store.create(order).await;

        // Clear the flag under the same lock that commits the outcome
        match result {
            Ok(receipt) => {
                {
                    let mut state = self.state();
                    in_flight.disarm();
                    state.submitting = false;
                    state.reset();
                    state.open = false;
                }
                tracing::info!(order_id = %receipt.id, "pre-order submitted");
                self.signals.publish(NavigationSignal::SubmissionSucceeded {
                    order_id: receipt.id,
                });
                Ok(receipt)
            }
            Err(error) => {
                tracing::error!(error = %error, "Error submitting pre-order");
                {
                    let mut state = self.state();
                    in_flight.disarm();
                    state.submitting = false;
                    state.submit_error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                }
                Err(SubmitError::Store(error))
            }
        }
    }

    /// Dismiss the form, discarding every field and error without confirmation
    pub fn close(&self) {
        {
            let mut state = self.state();
            state.reset();
            state.open = false;
        }
        self.signals.publish(NavigationSignal::CloseRequested);
    }
}

/// Clears the in-flight flag if the submission future is dropped mid-request
struct SubmittingGuard<'a> {
    form: &'a IntakeForm,
    armed: bool,
}

impl<'a> SubmittingGuard<'a> {
    fn new(form: &'a IntakeForm) -> Self {
        Self { form, armed: true }
    }

    /// Hand the flag back to the caller, who clears it under its own lock
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.form.state().submitting = false;
        }
    }
}
