//! Field state of the intake form and its validation

use crate::core::validation::{FieldErrors, FormField, validators};
use crate::core::{NewOrder, Quantity, Size};

/// Everything the buyer has typed or selected so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub size: Option<Size>,
    pub quantity: Quantity,
}

impl OrderDraft {
    /// Run every validator and collect all failures, keyed by field
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check(FormField::Name, validators::required_text(&self.name));
        errors.check(FormField::Email, validators::email(&self.email));
        errors.check(FormField::Phone, validators::required_text(&self.phone));
        errors.check(FormField::Address, validators::required_text(&self.address));
        errors.check(FormField::Size, validators::size_selected(self.size));
        errors.check(
            FormField::Quantity,
            validators::quantity_in_range(self.quantity.get() as i64),
        );
        errors
    }

    /// Whether the submit control should be enabled
    ///
    /// Looser than [`validate`](Self::validate): the email shape is only
    /// checked on submit.
    pub fn is_complete(&self) -> bool {
        self.size.is_some()
            && [&self.name, &self.email, &self.phone, &self.address]
                .iter()
                .all(|value| !value.trim().is_empty())
    }

    /// Build the trimmed creation payload, if a size has been chosen
    pub fn to_new_order(&self) -> Option<NewOrder> {
        let size = self.size?;
        Some(NewOrder::new(
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.address.as_str(),
            size,
            self.quantity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OrderStatus, ValidationFailure};

    fn valid() -> OrderDraft {
        OrderDraft {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0000".into(),
            address: "12 St James's Square, London".into(),
            size: Some(Size::M),
            quantity: Quantity::default(),
        }
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        assert!(valid().validate().is_empty());
        assert!(valid().is_complete());
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = OrderDraft::default().validate();
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            vec![
                (FormField::Name, ValidationFailure::MissingField),
                (FormField::Email, ValidationFailure::MissingField),
                (FormField::Phone, ValidationFailure::MissingField),
                (FormField::Address, ValidationFailure::MissingField),
                (FormField::Size, ValidationFailure::MissingSelection),
            ]
        );
    }

    #[test]
    fn test_empty_name_and_bad_email_only() {
        let draft = OrderDraft {
            name: "   ".into(),
            email: "abc".into(),
            ..valid()
        };
        let errors = draft.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(FormField::Name), Some(ValidationFailure::MissingField));
        assert_eq!(errors.get(FormField::Email), Some(ValidationFailure::InvalidFormat));
    }

    #[test]
    fn test_every_required_field_combination() {
        // Each bit blanks one of name/email/phone/address
        for mask in 0u8..16 {
            let mut draft = valid();
            let blanked = [
                (FormField::Name, &mut draft.name),
                (FormField::Email, &mut draft.email),
                (FormField::Phone, &mut draft.phone),
                (FormField::Address, &mut draft.address),
            ]
            .into_iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << *bit) != 0)
            .map(|(_, (field, value))| {
                value.clear();
                field
            })
            .collect::<Vec<_>>();

            let errors = draft.validate();
            assert_eq!(errors.fields().collect::<Vec<_>>(), blanked, "mask {}", mask);
            assert!(
                errors
                    .iter()
                    .all(|(_, failure)| failure == ValidationFailure::MissingField)
            );
            assert_eq!(draft.is_complete(), blanked.is_empty());
        }
    }

    #[test]
    fn test_is_complete_ignores_email_shape() {
        let draft = OrderDraft {
            email: "not-an-email".into(),
            ..valid()
        };
        assert!(draft.is_complete());
        assert!(draft.validate().contains(FormField::Email));
    }

    #[test]
    fn test_to_new_order_trims_and_is_pending() {
        let draft = OrderDraft {
            name: "  Ada  ".into(),
            email: " ada@example.com\t".into(),
            quantity: Quantity::clamped(3),
            ..valid()
        };
        let order = draft.to_new_order().unwrap();
        assert_eq!(order.name, "Ada");
        assert_eq!(order.email, "ada@example.com");
        assert_eq!(order.quantity.get(), 3);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_to_new_order_requires_size() {
        let draft = OrderDraft {
            size: None,
            ..valid()
        };
        assert!(draft.to_new_order().is_none());
    }
}
