//! Reusable field validators
//!
//! These are evaluated synchronously by the intake form on every submit attempt

use crate::core::error::ValidationFailure;
use crate::core::order::{Quantity, Size};
use regex::Regex;
use std::sync::LazyLock;

/// `text@text.text` with no whitespace and a single `@`; nothing more of RFC 5322
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Validator: text must be non-empty after trimming
pub fn required_text(value: &str) -> Result<(), ValidationFailure> {
    if value.trim().is_empty() {
        Err(ValidationFailure::MissingField)
    } else {
        Ok(())
    }
}

/// Validator: email must be present and shaped like `local@domain.tld`
///
/// Only the emptiness check trims; the shape is matched as typed, so
/// surrounding whitespace is an invalid format.
pub fn email(value: &str) -> Result<(), ValidationFailure> {
    required_text(value)?;
    if EMAIL_SHAPE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidFormat)
    }
}

/// Validator: exactly one size must be chosen
pub fn size_selected(size: Option<Size>) -> Result<(), ValidationFailure> {
    size.map(|_| ()).ok_or(ValidationFailure::MissingSelection)
}

/// Validator: quantity must lie within [1, 10]
///
/// Input is clamped while typed, so this only trips on values that bypassed
/// [`Quantity::from_input`].
pub fn quantity_in_range(value: i64) -> Result<(), ValidationFailure> {
    if (Quantity::MIN as i64..=Quantity::MAX as i64).contains(&value) {
        Ok(())
    } else {
        Err(ValidationFailure::OutOfRange)
    }
}
