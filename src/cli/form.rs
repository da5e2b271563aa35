//! Interactive complete-customer and group forms.
//!
//! Every edit goes through a store intent; the form only reads the draft
//! back out of the store to render it.

use anyhow::Result;

use crate::error::{Error, FieldKey};
use crate::models::{CompleteCustomerDraft, GroupField, UnitField};
use crate::store::Store;
use crate::workflow::SubmitReport;

use super::display::{print_form_errors, print_outcomes, responsible_summary};
use super::ui::{self, prompt_field, select, FormResult};

pub enum FormOutcome<T> {
    Submitted(T),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormAction {
    GroupName,
    Description,
    AddUnit,
    EditUnit(usize),
    RemoveUnit(usize),
    Submit,
    Cancel,
}

impl FormAction {
    fn label(self, draft: &CompleteCustomerDraft, submit_label: &str) -> String {
        match self {
            FormAction::GroupName => format!("Group name: {}", draft.group.groupe_name),
            FormAction::Description => format!("Description: {}", draft.group.description),
            FormAction::AddUnit => "Add unit".to_string(),
            FormAction::EditUnit(i) => format!("Edit unit {}: {}", i + 1, draft.units[i].unit_name),
            FormAction::RemoveUnit(i) => format!("Remove unit {}", i + 1),
            FormAction::Submit => submit_label.to_string(),
            FormAction::Cancel => "Cancel".to_string(),
        }
    }

    fn available(draft: &CompleteCustomerDraft) -> Vec<FormAction> {
        let mut actions = vec![FormAction::GroupName, FormAction::Description];
        actions.extend((0..draft.units.len()).map(FormAction::EditUnit));
        actions.push(FormAction::AddUnit);
        actions.extend((0..draft.units.len()).map(FormAction::RemoveUnit));
        actions.push(FormAction::Submit);
        actions.push(FormAction::Cancel);
        actions
    }
}

/// Edit the open complete-customer draft until it is submitted or cancelled.
pub async fn run_customer_form(store: &Store, domain: &str) -> Result<FormOutcome<SubmitReport>> {
    store.load_persons(domain).await;

    loop {
        let state = store.state();
        let Some(draft) = state.customer_draft().cloned() else {
            return Ok(FormOutcome::Cancelled);
        };
        let submit_label = state.modal.submit_label().unwrap_or("Submit");

        print_draft(&draft);
        print_form_errors(&state.form_errors);
        if let Some(ref err) = state.error {
            ui::error(err);
            store.clear_error();
        }

        let actions = FormAction::available(&draft);
        let labels: Vec<String> = actions.iter().map(|a| a.label(&draft, submit_label)).collect();
        let Some(choice) = select("customer", &labels)? else {
            store.close_modals();
            return Ok(FormOutcome::Cancelled);
        };

        match actions[choice] {
            FormAction::GroupName => {
                if let FormResult::Value(v) = prompt_field("group name", &draft.group.groupe_name)? {
                    store.set_customer_group_field(GroupField::Name, v);
                }
            }
            FormAction::Description => {
                if let FormResult::Value(v) = prompt_field("description", &draft.group.description)? {
                    store.set_customer_group_field(GroupField::Description, v);
                }
            }
            FormAction::AddUnit => {
                store.add_unit();
                let index = draft.units.len();
                edit_unit(store, index, domain)?;
            }
            FormAction::EditUnit(index) => edit_unit(store, index, domain)?,
            FormAction::RemoveUnit(index) => {
                let before = draft.units.len();
                store.remove_unit(index);
                let after = store.with_state(|s| s.customer_draft().map(|d| d.units.len()));
                if after == Some(before) {
                    ui::warning("An existing customer keeps at least one unit.");
                }
            }
            FormAction::Submit => match store.submit_complete_customer().await {
                Ok(report) => return Ok(FormOutcome::Submitted(report)),
                Err(Error::ValidationFailed(_)) => {}
                Err(Error::UnitWriteFailed { outcomes, .. }) => {
                    print_outcomes(&outcomes);
                }
                Err(_) => {}
            },
            FormAction::Cancel => {
                store.close_modals();
                return Ok(FormOutcome::Cancelled);
            }
        }
    }
}

fn edit_unit(store: &Store, index: usize, domain: &str) -> Result<()> {
    let Some(unit) = store.with_state(|s| s.customer_draft().and_then(|d| d.units.get(index).cloned()))
    else {
        return Ok(());
    };

    let fields = [
        ("unit name", UnitField::Name, unit.unit_name.as_str()),
        ("city", UnitField::City, unit.city.as_str()),
        ("country", UnitField::Country, unit.country.as_str()),
        ("zone", UnitField::ZoneName, unit.zone_name.as_str()),
    ];
    for (label, field, current) in fields {
        match prompt_field(label, current)? {
            FormResult::Value(v) => store.set_unit_field(index, field, v),
            FormResult::Cancelled => return Ok(()),
        }
    }

    let persons = store.with_state(|s| s.persons.clone());
    if persons.is_empty() {
        println!("No persons found with @{} email", domain);
        return Ok(());
    }

    let mut labels = vec!["No responsible person".to_string()];
    labels.extend(persons.iter().map(|p| p.picker_label()));
    if let Some(choice) = select("responsible", &labels)? {
        let person_id = choice.checked_sub(1).map(|i| persons[i].person_id);
        store.assign_responsible(index, person_id);
    }
    Ok(())
}

fn print_draft(draft: &CompleteCustomerDraft) {
    println!();
    let name = if draft.group.groupe_name.is_empty() {
        "(unnamed group)"
    } else {
        draft.group.groupe_name.as_str()
    };
    println!("{}", name);
    if !draft.group.description.is_empty() {
        println!("  {}", draft.group.description);
    }
    if draft.units.is_empty() {
        println!("  No units added yet.");
    }
    for (i, unit) in draft.units.iter().enumerate() {
        let marker = if unit.is_new() { "+" } else { " " };
        let location: Vec<&str> = [unit.city.as_str(), unit.country.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        let mut line = format!(" {}{}. {}", marker, i + 1, unit.unit_name);
        if !location.is_empty() {
            line.push_str(&format!("  {}", location.join(", ")));
        }
        if let Some(responsible) = responsible_summary(&unit.responsible) {
            line.push_str(&format!("  [{}]", responsible));
        }
        println!("{}", line);
    }
    println!();
}

/// Prompt the simple group form fields and submit them.
pub async fn run_group_form(store: &Store) -> Result<FormOutcome<()>> {
    loop {
        let state = store.state();
        let Some(draft) = state.group_draft().cloned() else {
            return Ok(FormOutcome::Cancelled);
        };
        if let Some(message) = state.form_errors.get(FieldKey::GroupeName) {
            eprintln!("  ! {}", message);
        }

        let name = match prompt_field("group name", &draft.groupe_name)? {
            FormResult::Value(v) => v,
            FormResult::Cancelled => {
                store.close_modals();
                return Ok(FormOutcome::Cancelled);
            }
        };
        store.set_group_form_field(GroupField::Name, name);

        let description = match prompt_field("description", &draft.description)? {
            FormResult::Value(v) => v,
            FormResult::Cancelled => {
                store.close_modals();
                return Ok(FormOutcome::Cancelled);
            }
        };
        store.set_group_form_field(GroupField::Description, description);

        match store.submit_group_form().await {
            Ok(_) => return Ok(FormOutcome::Submitted(())),
            Err(Error::ValidationFailed(_)) => continue,
            Err(e) => {
                store.close_modals();
                return Err(e.into());
            }
        }
    }
}
