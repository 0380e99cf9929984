//! Validation of buyer input before an order reaches the record store
//!
//! Validation here is advisory: it keeps obviously incomplete orders from being
//! submitted, it is not a trust boundary. Every applicable failure is collected
//! into a [`FieldErrors`] map keyed by [`FormField`] so all problems surface at once.

pub mod validators;

use crate::core::error::ValidationFailure;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keys of the intake form's per-field error map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Address,
    Size,
    Quantity,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Address => "address",
            FormField::Size => "size",
            FormField::Quantity => "quantity",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collected validation failures, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<FormField, ValidationFailure>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Record the outcome of a validator, ignoring successes
    pub fn check(&mut self, field: FormField, outcome: Result<(), ValidationFailure>) {
        if let Err(failure) = outcome {
            self.0.insert(field, failure);
        }
    }

    pub fn insert(&mut self, field: FormField, failure: ValidationFailure) {
        self.0.insert(field, failure);
    }

    /// Drop the error for a single field, keeping the others in order
    pub fn clear(&mut self, field: FormField) -> Option<ValidationFailure> {
        self.0.shift_remove(&field)
    }

    pub fn get(&self, field: FormField) -> Option<ValidationFailure> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, ValidationFailure)> + '_ {
        self.0.iter().map(|(field, failure)| (*field, *failure))
    }

    /// User-facing message for each failing field
    pub fn messages(&self) -> Vec<(FormField, String)> {
        self.iter()
            .map(|(field, failure)| (field, failure.message(field)))
            .collect()
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .messages()
            .into_iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", msgs.join(", "))
    }
}

impl FromIterator<(FormField, ValidationFailure)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (FormField, ValidationFailure)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
