mod draft;
mod group;
mod person;
mod unit;

pub use draft::{
    CompleteCustomerDraft, GroupDraft, GroupField, ResponsibleDraft, ResponsibleField, UnitDraft,
    UnitField,
};
pub use group::{Group, GroupPayload, LogoSources};
pub use person::{Person, DEFAULT_ROLE};
pub use unit::{filter_units, Unit, UnitAction, UnitPayload};

pub type GroupId = i64;
pub type UnitId = i64;
pub type PersonId = i64;

use serde::{Deserialize, Deserializer};

/// The API sends `null` for text columns that were never filled in.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Map a form value to the API's null-equivalent when it is blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
