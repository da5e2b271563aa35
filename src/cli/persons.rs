use anyhow::Result;

use crate::store::Store;

use super::display::print_persons;

/// Execute the persons command
pub async fn run_persons(store: &Store, domain: &str) -> Result<()> {
    store.load_persons(domain).await;
    store.with_state(|state| print_persons(&state.persons, domain));
    Ok(())
}
