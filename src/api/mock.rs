//! In-memory [`CustomerApi`] for tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use super::CustomerApi;
use crate::error::{Error, Result};
use crate::models::{Group, GroupId, GroupPayload, Person, Unit, UnitId, UnitPayload};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListGroups,
    GetUnit(UnitId),
    GetCompleteGroup(GroupId),
    ListPersons(String),
    CreateGroup(GroupPayload),
    UpdateGroup(GroupId, GroupPayload),
    DeleteGroup(GroupId),
    CreateUnit(UnitPayload),
    UpdateUnit(UnitId, UnitPayload),
    /// A unit write answered; recorded after the other writes got a chance to start.
    UnitWriteDone(String),
}

impl Call {
    pub fn is_unit_write(&self) -> bool {
        matches!(self, Call::CreateUnit(_) | Call::UpdateUnit(..))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListGroups,
    GetUnit,
    GetCompleteGroup,
    ListPersons,
    CreateGroup,
    UpdateGroup,
    DeleteGroup,
}

#[derive(Default)]
struct State {
    groups: BTreeMap<GroupId, Group>,
    persons: Vec<Person>,
    next_id: i64,
    calls: Vec<Call>,
    failing_ops: HashSet<Op>,
    failing_units: HashSet<String>,
}

pub struct MockApi {
    state: Mutex<State>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 100,
                ..State::default()
            }),
        }
    }

    pub fn with_group(self, name: &str, unit_names: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let groupe_id = state.allocate_id();
            let units = unit_names
                .iter()
                .map(|n| {
                    let unit_id = state.allocate_id();
                    bare_unit(unit_id, groupe_id, n)
                })
                .collect();
            state.groups.insert(
                groupe_id,
                Group {
                    groupe_id,
                    groupe_name: name.to_string(),
                    description: None,
                    units,
                },
            );
        }
        self
    }

    pub fn with_person(self, person: Person) -> Self {
        self.state.lock().unwrap().persons.push(person);
        self
    }

    pub fn fail(&self, op: Op) {
        self.state.lock().unwrap().failing_ops.insert(op);
    }

    pub fn fail_unit(&self, unit_name: &str) {
        self.state.lock().unwrap().failing_units.insert(unit_name.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn group_named(&self, name: &str) -> Option<Group> {
        let state = self.state.lock().unwrap();
        state.groups.values().find(|g| g.groupe_name == name).cloned()
    }

    pub fn group(&self, groupe_id: GroupId) -> Option<Group> {
        self.state.lock().unwrap().groups.get(&groupe_id).cloned()
    }

    fn record(&self, call: Call, op: Option<Op>) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match op {
            Some(op) if state.failing_ops.contains(&op) => {
                Err(Error::request_failed_generic(500, format!("{:?} failed", op)))
            }
            _ => Ok(()),
        }
    }

    async fn write_unit(&self, unit_id: Option<UnitId>, payload: &UnitPayload) -> Result<Unit> {
        {
            let mut state = self.state.lock().unwrap();
            state.calls.push(match unit_id {
                Some(id) => Call::UpdateUnit(id, payload.clone()),
                None => Call::CreateUnit(payload.clone()),
            });
        }

        tokio::task::yield_now().await;

        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::UnitWriteDone(payload.unit_name.clone()));
        if state.failing_units.contains(&payload.unit_name) {
            return Err(Error::request_failed(400, format!("{} rejected", payload.unit_name)));
        }

        let unit_id = unit_id.unwrap_or_else(|| state.allocate_id());
        let unit = Unit {
            unit_id,
            groupe_id: Some(payload.groupe_id),
            unit_name: payload.unit_name.clone(),
            city: payload.city.clone(),
            country: payload.country.clone(),
            zone_name: payload.zone_name.clone(),
            responsible_person_id: payload.responsible_person_id,
            responsible: None,
        };
        let group = state
            .groups
            .get_mut(&payload.groupe_id)
            .ok_or_else(|| Error::request_failed(404, "Group not found"))?;
        group.units.retain(|u| u.unit_id != unit_id);
        group.units.push(unit.clone());
        Ok(unit)
    }
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn bare_unit(unit_id: UnitId, groupe_id: GroupId, name: &str) -> Unit {
    Unit {
        unit_id,
        groupe_id: Some(groupe_id),
        unit_name: name.to_string(),
        city: None,
        country: None,
        zone_name: None,
        responsible_person_id: None,
        responsible: None,
    }
}

#[async_trait]
impl CustomerApi for MockApi {
    async fn list_groups(&self) -> Result<Vec<Group>> {
        self.record(Call::ListGroups, Some(Op::ListGroups))?;
        Ok(self.state.lock().unwrap().groups.values().cloned().collect())
    }

    async fn get_unit(&self, unit_id: UnitId) -> Result<Unit> {
        self.record(Call::GetUnit(unit_id), Some(Op::GetUnit))?;
        let state = self.state.lock().unwrap();
        state
            .groups
            .values()
            .flat_map(|g| g.units.iter())
            .find(|u| u.unit_id == unit_id)
            .cloned()
            .ok_or_else(|| Error::request_failed(404, "Unit not found"))
    }

    async fn get_complete_group(&self, groupe_id: GroupId) -> Result<Group> {
        self.record(Call::GetCompleteGroup(groupe_id), Some(Op::GetCompleteGroup))?;
        self.group(groupe_id)
            .ok_or_else(|| Error::request_failed(404, "Group not found"))
    }

    async fn list_persons_by_domain(&self, domain: &str) -> Result<Vec<Person>> {
        self.record(Call::ListPersons(domain.to_string()), Some(Op::ListPersons))?;
        let suffix = format!("@{}", domain);
        let state = self.state.lock().unwrap();
        Ok(state
            .persons
            .iter()
            .filter(|p| p.email.as_deref().map(|e| e.ends_with(&suffix)).unwrap_or(false))
            .cloned()
            .collect())
    }

    async fn create_group(&self, payload: &GroupPayload) -> Result<Group> {
        self.record(Call::CreateGroup(payload.clone()), Some(Op::CreateGroup))?;
        let mut state = self.state.lock().unwrap();
        let groupe_id = state.allocate_id();
        let group = Group {
            groupe_id,
            groupe_name: payload.groupe_name.clone(),
            description: Some(payload.description.clone()),
            units: Vec::new(),
        };
        state.groups.insert(groupe_id, group.clone());
        Ok(group)
    }

    async fn update_group(&self, groupe_id: GroupId, payload: &GroupPayload) -> Result<Group> {
        self.record(Call::UpdateGroup(groupe_id, payload.clone()), Some(Op::UpdateGroup))?;
        let mut state = self.state.lock().unwrap();
        let group = state
            .groups
            .get_mut(&groupe_id)
            .ok_or_else(|| Error::request_failed(404, "Group not found"))?;
        group.groupe_name = payload.groupe_name.clone();
        group.description = Some(payload.description.clone());
        Ok(group.clone())
    }

    async fn delete_group(&self, groupe_id: GroupId) -> Result<()> {
        self.record(Call::DeleteGroup(groupe_id), Some(Op::DeleteGroup))?;
        self.state
            .lock()
            .unwrap()
            .groups
            .remove(&groupe_id)
            .map(|_| ())
            .ok_or_else(|| Error::request_failed(404, "Group not found"))
    }

    async fn create_unit(&self, payload: &UnitPayload) -> Result<Unit> {
        self.write_unit(None, payload).await
    }

    async fn update_unit(&self, unit_id: UnitId, payload: &UnitPayload) -> Result<Unit> {
        self.write_unit(Some(unit_id), payload).await
    }
}
