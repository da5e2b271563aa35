//! Form validators. Pure functions of a draft; they never touch it.

use crate::error::{FieldKey, FormErrors};
use crate::models::{CompleteCustomerDraft, GroupDraft};

/// Simple group form: the name is required.
pub fn validate_group_form(draft: &GroupDraft) -> FormErrors {
    let mut errors = FormErrors::new();
    if draft.groupe_name.trim().is_empty() {
        errors.insert(FieldKey::GroupeName, "Group name is required");
    }
    errors
}

/// Complete-customer form: group name plus every staged unit name, keyed by index.
pub fn validate_complete_customer(draft: &CompleteCustomerDraft) -> FormErrors {
    let mut errors = FormErrors::new();
    if draft.group.groupe_name.trim().is_empty() {
        errors.insert(FieldKey::GroupName, "Group name is required");
    }
    for (index, unit) in draft.units.iter().enumerate() {
        if unit.unit_name.trim().is_empty() {
            errors.insert(
                FieldKey::UnitName(index),
                format!("Unit {} name is required", index + 1),
            );
        }
    }
    errors
}
