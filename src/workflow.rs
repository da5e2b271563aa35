//! Complete-customer submit workflow
//!
//! Validate, write the group, then write every staged unit concurrently.
//! The group write always finishes before any unit write is issued. Unit
//! writes are all issued even if one fails, and nothing is rolled back: a
//! failed batch can leave the group and some units written.

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};

use crate::api::CustomerApi;
use crate::error::{Error, Result, UnitOutcome};
use crate::models::{
    CompleteCustomerDraft, Group, GroupDraft, GroupId, UnitAction, UnitPayload,
};
use crate::store::validate::{validate_complete_customer, validate_group_form};

/// What a successful submit wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub groupe_id: GroupId,
    /// False when an existing group was updated.
    pub group_created: bool,
    /// One entry per staged unit, in draft order.
    pub outcomes: Vec<UnitOutcome>,
}

impl SubmitReport {
    pub fn notice(&self) -> &'static str {
        if self.group_created {
            "Customer created successfully!"
        } else {
            "Customer updated successfully!"
        }
    }
}

/// Write a group with its units. `editing` is the id of the group being
/// edited, `None` to create a new one.
pub async fn submit_complete_customer(
    api: &dyn CustomerApi,
    draft: &CompleteCustomerDraft,
    editing: Option<GroupId>,
) -> Result<SubmitReport> {
    let errors = validate_complete_customer(draft);
    if !errors.is_empty() {
        debug!("complete customer draft rejected: {}", errors.summary());
        return Err(Error::ValidationFailed(errors));
    }

    let payload = draft.group.to_payload();
    let (groupe_id, group_created) = match editing {
        Some(groupe_id) => {
            info!("updating group {}", groupe_id);
            api.update_group(groupe_id, &payload).await?;
            (groupe_id, false)
        }
        None => {
            info!("creating group {:?}", payload.groupe_name);
            let group = api.create_group(&payload).await?;
            (group.groupe_id, true)
        }
    };

    let outcomes = write_units(api, draft, groupe_id).await?;

    Ok(SubmitReport {
        groupe_id,
        group_created,
        outcomes,
    })
}

/// Issue every unit write, wait for all of them, and report the first
/// failure in completion order.
async fn write_units(
    api: &dyn CustomerApi,
    draft: &CompleteCustomerDraft,
    groupe_id: GroupId,
) -> Result<Vec<UnitOutcome>> {
    if draft.units.is_empty() {
        return Ok(Vec::new());
    }
    info!("writing {} unit(s) for group {}", draft.units.len(), groupe_id);

    let mut pending: FuturesUnordered<_> = draft
        .units
        .iter()
        .enumerate()
        .map(|(index, unit)| {
            let action = UnitAction::for_draft(unit);
            let payload = UnitPayload::from_draft(groupe_id, unit);
            async move {
                let result = match action {
                    UnitAction::Create => api.create_unit(&payload).await,
                    UnitAction::Update(unit_id) => api.update_unit(unit_id, &payload).await,
                };
                (index, action, payload.unit_name, result)
            }
        })
        .collect();

    let mut outcomes = Vec::with_capacity(draft.units.len());
    let mut first_failure: Option<(UnitAction, String, String)> = None;

    while let Some((index, action, unit_name, result)) = pending.next().await {
        let result = match result {
            Ok(unit) => Ok(unit.unit_id),
            Err(e) => {
                let detail = e.detail();
                warn!("failed to {} unit {}: {}", action, unit_name, detail);
                if first_failure.is_none() {
                    first_failure = Some((action, unit_name.clone(), detail.clone()));
                }
                Err(detail)
            }
        };
        outcomes.push(UnitOutcome {
            index,
            unit_name,
            action,
            result,
        });
    }
    outcomes.sort_by_key(|o| o.index);

    match first_failure {
        Some((action, unit_name, message)) => Err(Error::UnitWriteFailed {
            action,
            unit_name,
            message,
            outcomes,
        }),
        None => Ok(outcomes),
    }
}

/// Simple group form: create or update name and description only.
pub async fn save_group(
    api: &dyn CustomerApi,
    draft: &GroupDraft,
    editing: Option<&Group>,
) -> Result<Group> {
    let errors = validate_group_form(draft);
    if !errors.is_empty() {
        return Err(Error::ValidationFailed(errors));
    }

    let payload = draft.to_payload();
    let saved = match editing {
        Some(group) => {
            info!("updating group {}", group.groupe_id);
            api.update_group(group.groupe_id, &payload).await
        }
        None => {
            info!("creating group {:?}", payload.groupe_name);
            api.create_group(&payload).await
        }
    };
    saved.map_err(|e| e.or_describe("Failed to save group"))
}
