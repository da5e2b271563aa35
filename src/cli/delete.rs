use anyhow::Result;

use crate::models::GroupId;
use crate::store::Store;

use super::list::find_group;
use super::ui::confirm;

/// Execute the delete command
pub async fn run_delete(store: &Store, groupe_id: GroupId, force: bool) -> Result<()> {
    let group = find_group(store, groupe_id).await?;
    store.open_delete_group(&group);

    println!("{}", group.groupe_name);
    let count = group.units.len();
    if count > 0 {
        println!("  {} unit(s) will be deleted with it", count);
    }
    println!();

    if !force {
        let confirmed = confirm(&format!("Delete {}?", group.groupe_name)).unwrap_or(false);
        if !confirmed {
            store.close_modals();
            return Ok(());
        }
    }

    store.confirm_delete().await?;
    if let Some(notice) = store.with_state(|s| s.notice.clone()) {
        println!("{}", notice);
        store.dismiss_notice();
    }
    Ok(())
}
