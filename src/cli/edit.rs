use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::models::{GroupField, GroupId};
use crate::store::Store;

use super::add::print_report;
use super::form::{run_customer_form, run_group_form, FormOutcome};
use super::list::find_group;
use super::ui::is_interactive;

/// Execute the edit command: the complete customer, units included.
pub async fn run_edit(store: &Store, config: &Config, groupe_id: GroupId) -> Result<()> {
    if !is_interactive() {
        return Err(anyhow!("Editing a customer requires a terminal."));
    }

    store.open_edit_complete_customer(groupe_id).await?;
    match run_customer_form(store, &config.person_domain).await? {
        FormOutcome::Submitted(report) => print_report(store, &report),
        FormOutcome::Cancelled => println!("Cancelled."),
    }
    Ok(())
}

/// Execute the rename command: group name and description only.
pub async fn run_rename(
    store: &Store,
    groupe_id: GroupId,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let group = find_group(store, groupe_id).await?;
    store.open_edit_group(&group);

    if name.is_none() && description.is_none() {
        if !is_interactive() {
            store.close_modals();
            return Err(anyhow!("Nothing to change: pass --name or --description"));
        }
        if let FormOutcome::Cancelled = run_group_form(store).await? {
            println!("Cancelled.");
            return Ok(());
        }
    } else {
        if let Some(name) = name {
            store.set_group_form_field(GroupField::Name, name);
        }
        if let Some(description) = description {
            store.set_group_form_field(GroupField::Description, description);
        }
        if let Err(e) = store.submit_group_form().await {
            store.close_modals();
            return Err(e.into());
        }
    }

    if let Some(notice) = store.with_state(|s| s.notice.clone()) {
        println!("{}", notice);
        store.dismiss_notice();
    }
    Ok(())
}
