//! Application state store
//!
//! Single source of truth for what is currently shown. Callers go through
//! intents; each intent transitions the state with an [`Action`] and every
//! transition is published to subscribers.

use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::CustomerApi;
use crate::error::{Error, Result};
use crate::models::{
    Group, GroupField, GroupId, PersonId, ResponsibleField, Unit, UnitField, UnitId,
};
use crate::workflow::{self, SubmitReport};

mod state;
pub mod validate;

pub use state::{Action, AppState, Modal};

pub struct Store {
    api: Arc<dyn CustomerApi>,
    state: watch::Sender<AppState>,
}

impl Store {
    pub fn new(api: Arc<dyn CustomerApi>) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self { api, state }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub fn dispatch(&self, action: Action) {
        debug!("dispatch {}", action_name(&action));
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = current.reduce(action);
        });
    }

    // ------------------------------------------------------------------
    // Group list
    // ------------------------------------------------------------------

    pub async fn load_groups(&self) -> Result<()> {
        self.dispatch(Action::LoadStarted);
        match self.api.list_groups().await {
            Ok(groups) => {
                info!("loaded {} group(s)", groups.len());
                self.dispatch(Action::GroupsLoaded(groups));
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        self.dispatch(Action::SetSearchTerm(term.into()));
    }

    pub fn dismiss_notice(&self) {
        self.dispatch(Action::DismissNotice);
    }

    pub fn clear_error(&self) {
        self.dispatch(Action::ClearError);
    }

    // ------------------------------------------------------------------
    // Modals
    // ------------------------------------------------------------------

    pub fn open_create_group(&self) {
        self.dispatch(Action::Open(Modal::group_form(None)));
    }

    pub fn open_edit_group(&self, group: &Group) {
        self.dispatch(Action::Open(Modal::group_form(Some(group))));
    }

    pub fn open_create_complete_customer(&self) {
        self.dispatch(Action::Open(Modal::complete_customer(None)));
    }

    /// Fetch the group with its units and responsibles, then open it for editing.
    pub async fn open_edit_complete_customer(&self, groupe_id: GroupId) -> Result<()> {
        self.dispatch(Action::Busy(true));
        match self.api.get_complete_group(groupe_id).await {
            Ok(group) => {
                self.dispatch(Action::Open(Modal::complete_customer(Some(group))));
                self.dispatch(Action::Busy(false));
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub async fn open_unit_detail(&self, unit_id: UnitId) -> Result<Unit> {
        match self.api.get_unit(unit_id).await {
            Ok(unit) => {
                self.dispatch(Action::Open(Modal::UnitDetail(unit.clone())));
                Ok(unit)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn open_delete_group(&self, group: &Group) {
        self.dispatch(Action::Open(Modal::DeleteConfirm(group.clone())));
    }

    pub fn close_modals(&self) {
        self.dispatch(Action::CloseModals);
    }

    // ------------------------------------------------------------------
    // Draft editing
    // ------------------------------------------------------------------

    pub fn set_group_form_field(&self, field: GroupField, value: impl Into<String>) {
        self.dispatch(Action::SetGroupFormField(field, value.into()));
    }

    pub fn set_customer_group_field(&self, field: GroupField, value: impl Into<String>) {
        self.dispatch(Action::SetCustomerGroupField(field, value.into()));
    }

    pub fn set_unit_field(&self, index: usize, field: UnitField, value: impl Into<String>) {
        self.dispatch(Action::SetUnitField(index, field, value.into()));
    }

    pub fn set_responsible_field(&self, index: usize, field: ResponsibleField, value: impl Into<String>) {
        self.dispatch(Action::SetResponsibleField(index, field, value.into()));
    }

    /// Copy the chosen directory person into the unit, or clear it with `None`.
    /// Unknown ids clear the assignment.
    pub fn assign_responsible(&self, index: usize, person_id: Option<PersonId>) {
        let person = person_id.and_then(|id| {
            self.with_state(|s| s.persons.iter().find(|p| p.person_id == id).cloned())
        });
        self.dispatch(Action::AssignResponsible(index, person));
    }

    pub fn add_unit(&self) {
        self.dispatch(Action::AddUnit);
    }

    pub fn remove_unit(&self, index: usize) {
        self.dispatch(Action::RemoveUnit(index));
    }

    /// Directory persons for the responsible picker. A failure leaves the
    /// picker empty rather than putting the view in an error state.
    pub async fn load_persons(&self, domain: &str) {
        self.dispatch(Action::PersonsLoading);
        let persons = match self.api.list_persons_by_domain(domain).await {
            Ok(persons) => persons,
            Err(e) => {
                warn!("could not load persons for @{}: {}", domain, e);
                Vec::new()
            }
        };
        self.dispatch(Action::PersonsLoaded(persons));
    }

    // ------------------------------------------------------------------
    // Submits
    // ------------------------------------------------------------------

    pub async fn submit_group_form(&self) -> Result<Group> {
        let Some((editing, draft)) = self.with_state(|s| match &s.modal {
            Modal::GroupForm { editing, draft } => Some((editing.clone(), draft.clone())),
            _ => None,
        }) else {
            return Err(self.fail(Error::NoActiveForm("group form")));
        };

        match workflow::save_group(self.api.as_ref(), &draft, editing.as_ref()).await {
            Ok(group) => {
                let notice = if editing.is_some() {
                    "Customer updated successfully!"
                } else {
                    "Customer created successfully!"
                };
                self.finish(notice).await;
                Ok(group)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    pub async fn submit_complete_customer(&self) -> Result<SubmitReport> {
        let Some((editing, draft)) = self.with_state(|s| match &s.modal {
            Modal::CompleteCustomer { editing, draft } => {
                Some((editing.as_ref().map(|g| g.groupe_id), draft.clone()))
            }
            _ => None,
        }) else {
            return Err(self.fail(Error::NoActiveForm("customer form")));
        };

        self.dispatch(Action::Busy(true));
        match workflow::submit_complete_customer(self.api.as_ref(), &draft, editing).await {
            Ok(report) => {
                self.finish(report.notice()).await;
                Ok(report)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    pub async fn confirm_delete(&self) -> Result<()> {
        let Some(group) = self.with_state(|s| match &s.modal {
            Modal::DeleteConfirm(group) => Some(group.clone()),
            _ => None,
        }) else {
            return Err(self.fail(Error::NoActiveForm("delete confirmation")));
        };

        info!("deleting group {}", group.groupe_id);
        match self.api.delete_group(group.groupe_id).await {
            Ok(()) => {
                self.finish("Group and associated units deleted successfully!").await;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Success path of every write: notice, reload, close.
    async fn finish(&self, notice: &str) {
        self.dispatch(Action::Notice(notice.to_string()));
        if let Err(e) = self.load_groups().await {
            warn!("reload after write failed: {}", e);
        }
        self.close_modals();
        self.dispatch(Action::Busy(false));
    }

    /// Validation errors go inline on the form; anything else is the current error.
    fn reject(&self, e: Error) -> Error {
        match &e {
            Error::ValidationFailed(errors) => {
                self.dispatch(Action::SetFormErrors(errors.clone()));
                self.dispatch(Action::Busy(false));
                e
            }
            _ => self.fail(e),
        }
    }

    fn fail(&self, e: Error) -> Error {
        warn!("{}", e);
        self.dispatch(Action::Failed(e.to_string()));
        e
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::LoadStarted => "LoadStarted",
        Action::GroupsLoaded(_) => "GroupsLoaded",
        Action::Failed(_) => "Failed",
        Action::Busy(_) => "Busy",
        Action::Notice(_) => "Notice",
        Action::DismissNotice => "DismissNotice",
        Action::ClearError => "ClearError",
        Action::SetSearchTerm(_) => "SetSearchTerm",
        Action::Open(_) => "Open",
        Action::CloseModals => "CloseModals",
        Action::SetGroupFormField(..) => "SetGroupFormField",
        Action::SetCustomerGroupField(..) => "SetCustomerGroupField",
        Action::SetUnitField(..) => "SetUnitField",
        Action::SetResponsibleField(..) => "SetResponsibleField",
        Action::AssignResponsible(..) => "AssignResponsible",
        Action::AddUnit => "AddUnit",
        Action::RemoveUnit(_) => "RemoveUnit",
        Action::SetFormErrors(_) => "SetFormErrors",
        Action::PersonsLoading => "PersonsLoading",
        Action::PersonsLoaded(_) => "PersonsLoaded",
    }
}
