use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::error::Error;
use crate::models::{GroupField, UnitField};
use crate::store::Store;
use crate::workflow::SubmitReport;

use super::display::{print_form_errors, print_outcomes};
use super::form::{run_customer_form, FormOutcome};
use super::ui::is_interactive;

/// Execute the add command
pub async fn run_add(
    store: &Store,
    config: &Config,
    name: Option<String>,
    description: Option<String>,
    units: Vec<String>,
) -> Result<()> {
    store.open_create_complete_customer();

    // No options provided: fill the form interactively
    let Some(name) = name else {
        if !is_interactive() {
            store.close_modals();
            return Err(anyhow!("A group name is required: custcmd add --name <NAME>"));
        }
        return match run_customer_form(store, &config.person_domain).await? {
            FormOutcome::Submitted(report) => {
                print_report(store, &report);
                Ok(())
            }
            FormOutcome::Cancelled => {
                println!("Cancelled.");
                Ok(())
            }
        };
    };

    store.set_customer_group_field(GroupField::Name, name);
    if let Some(description) = description {
        store.set_customer_group_field(GroupField::Description, description);
    }
    for (index, unit_name) in units.into_iter().enumerate() {
        store.add_unit();
        store.set_unit_field(index, UnitField::Name, unit_name);
    }

    match store.submit_complete_customer().await {
        Ok(report) => {
            print_report(store, &report);
            Ok(())
        }
        Err(e) => {
            store.with_state(|s| print_form_errors(&s.form_errors));
            if let Error::UnitWriteFailed { ref outcomes, .. } = e {
                print_outcomes(outcomes);
            }
            store.close_modals();
            Err(e.into())
        }
    }
}

pub(crate) fn print_report(store: &Store, report: &SubmitReport) {
    if let Some(notice) = store.with_state(|s| s.notice.clone()) {
        println!("{}", notice);
        store.dismiss_notice();
    }
    println!("  group {}", report.groupe_id);
    print_outcomes(&report.outcomes);
}
