use anyhow::{anyhow, Result};

use crate::models::{Group, GroupId};
use crate::store::Store;

use super::display::print_group_list;

/// Execute the list command
pub async fn run_list(store: &Store, search: Option<&str>) -> Result<()> {
    store.load_groups().await?;
    store.set_search_term(search.unwrap_or(""));

    store.with_state(|state| print_group_list(&state.visible_groups()));
    Ok(())
}

/// Reload the group list and pick one group out of it.
pub(crate) async fn find_group(store: &Store, groupe_id: GroupId) -> Result<Group> {
    store.load_groups().await?;
    store
        .with_state(|state| state.group(groupe_id).cloned())
        .ok_or_else(|| anyhow!("No customer found with ID: {}", groupe_id))
}
