//! Data fetch layer
//!
//! One operation per resource/action pair of the customer REST API.
//! Nothing is cached locally; every call is a network round trip.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Group, GroupId, GroupPayload, Person, Unit, UnitId, UnitPayload};

mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use client::HttpCustomerApi;

#[async_trait]
pub trait CustomerApi: Send + Sync {
    /// `GET /api/groups`, each group with its nested units.
    async fn list_groups(&self) -> Result<Vec<Group>>;

    /// `GET /api/units/{unit_id}` with the nested responsible person.
    async fn get_unit(&self, unit_id: UnitId) -> Result<Unit>;

    /// `GET /api/groups/{groupe_id}/complete`
    async fn get_complete_group(&self, groupe_id: GroupId) -> Result<Group>;

    /// `GET /api/persons/by-domain?domain=...`
    async fn list_persons_by_domain(&self, domain: &str) -> Result<Vec<Person>>;

    async fn create_group(&self, payload: &GroupPayload) -> Result<Group>;

    async fn update_group(&self, groupe_id: GroupId, payload: &GroupPayload) -> Result<Group>;

    /// Deletes the group; the server cascades to its units.
    async fn delete_group(&self, groupe_id: GroupId) -> Result<()>;

    async fn create_unit(&self, payload: &UnitPayload) -> Result<Unit>;

    async fn update_unit(&self, unit_id: UnitId, payload: &UnitPayload) -> Result<Unit>;
}
