use anyhow::Result;

use crate::models::{GroupId, UnitId};
use crate::store::{Modal, Store};

use super::display::{print_complete_group, print_unit};

/// Execute the show command: the group with its units and responsibles.
pub async fn run_show(store: &Store, groupe_id: GroupId, unit_filter: Option<&str>) -> Result<()> {
    store.open_edit_complete_customer(groupe_id).await?;

    store.with_state(|state| {
        if let Modal::CompleteCustomer { editing: Some(group), .. } = &state.modal {
            print_complete_group(group, unit_filter.unwrap_or(""));
        }
    });
    store.close_modals();
    Ok(())
}

/// Execute the unit command
pub async fn run_unit(store: &Store, unit_id: UnitId) -> Result<()> {
    let unit = store.open_unit_detail(unit_id).await?;
    print_unit(&unit);
    store.close_modals();
    Ok(())
}
