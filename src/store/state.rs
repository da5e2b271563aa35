//! Application state and the reducer that transitions it.

use crate::error::{FieldKey, FormErrors};
use crate::models::{
    CompleteCustomerDraft, Group, GroupDraft, GroupField, Person, ResponsibleField, Unit,
    UnitDraft, UnitField,
};

/// At most one modal is open at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    None,
    /// Name and description only. `editing` is the group being renamed.
    GroupForm {
        editing: Option<Group>,
        draft: GroupDraft,
    },
    /// Group plus units. `editing` is the fetched complete group.
    CompleteCustomer {
        editing: Option<Group>,
        draft: CompleteCustomerDraft,
    },
    UnitDetail(Unit),
    DeleteConfirm(Group),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }

    pub fn group_form(group: Option<&Group>) -> Self {
        Modal::GroupForm {
            editing: group.cloned(),
            draft: group.map(GroupDraft::from_group).unwrap_or_default(),
        }
    }

    pub fn complete_customer(group: Option<Group>) -> Self {
        let draft = group
            .as_ref()
            .map(CompleteCustomerDraft::from_group)
            .unwrap_or_default();
        Modal::CompleteCustomer {
            editing: group,
            draft,
        }
    }

    /// Label of the complete-customer submit button.
    pub fn submit_label(&self) -> Option<&'static str> {
        match self {
            Modal::CompleteCustomer { editing: Some(_), .. } => Some("Update Customer"),
            Modal::CompleteCustomer { draft, .. } if draft.units.is_empty() => {
                Some("Create Group Only")
            }
            Modal::CompleteCustomer { .. } => Some("Create Complete Customer"),
            Modal::GroupForm { editing: Some(_), .. } => Some("Update Group"),
            Modal::GroupForm { .. } => Some("Create Group"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub groups: Vec<Group>,
    pub search_term: String,
    pub modal: Modal,
    pub form_errors: FormErrors,
    pub persons: Vec<Person>,
    pub persons_loading: bool,
    pub loading: bool,
    pub error: Option<String>,
    /// One-shot success message from the last write.
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Action {
    LoadStarted,
    GroupsLoaded(Vec<Group>),
    Failed(String),
    Busy(bool),
    Notice(String),
    DismissNotice,
    ClearError,
    SetSearchTerm(String),
    Open(Modal),
    CloseModals,
    SetGroupFormField(GroupField, String),
    SetCustomerGroupField(GroupField, String),
    SetUnitField(usize, UnitField, String),
    SetResponsibleField(usize, ResponsibleField, String),
    AssignResponsible(usize, Option<Person>),
    AddUnit,
    RemoveUnit(usize),
    SetFormErrors(FormErrors),
    PersonsLoading,
    PersonsLoaded(Vec<Person>),
}

impl AppState {
    /// Groups whose name contains the search term, case-insensitively.
    /// Derived on every call so it cannot go stale.
    pub fn visible_groups(&self) -> Vec<&Group> {
        self.groups
            .iter()
            .filter(|g| g.matches(&self.search_term))
            .collect()
    }

    pub fn group(&self, groupe_id: i64) -> Option<&Group> {
        self.groups.iter().find(|g| g.groupe_id == groupe_id)
    }

    pub fn customer_draft(&self) -> Option<&CompleteCustomerDraft> {
        match &self.modal {
            Modal::CompleteCustomer { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn group_draft(&self) -> Option<&GroupDraft> {
        match &self.modal {
            Modal::GroupForm { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::LoadStarted => {
                self.loading = true;
                self.error = None;
            }
            Action::GroupsLoaded(groups) => {
                self.groups = groups;
                self.loading = false;
                self.error = None;
            }
            Action::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            Action::Busy(busy) => self.loading = busy,
            Action::Notice(message) => self.notice = Some(message),
            Action::DismissNotice => self.notice = None,
            Action::ClearError => self.error = None,
            Action::SetSearchTerm(term) => self.search_term = term,
            Action::Open(modal) => {
                self.modal = modal;
                self.form_errors = FormErrors::new();
            }
            Action::CloseModals => {
                self.modal = Modal::None;
                self.form_errors = FormErrors::new();
            }
            Action::SetGroupFormField(field, value) => {
                if let Modal::GroupForm { draft, .. } = &mut self.modal {
                    draft.set(field, value);
                    if field == GroupField::Name {
                        self.form_errors.clear(FieldKey::GroupeName);
                    }
                }
            }
            Action::SetCustomerGroupField(field, value) => {
                if let Modal::CompleteCustomer { draft, .. } = &mut self.modal {
                    draft.group.set(field, value);
                }
            }
            Action::SetUnitField(index, field, value) => {
                if let Some(unit) = self.unit_draft_mut(index) {
                    unit.set(field, value);
                }
            }
            Action::SetResponsibleField(index, field, value) => {
                if let Some(unit) = self.unit_draft_mut(index) {
                    unit.responsible.set(field, value);
                }
            }
            Action::AssignResponsible(index, person) => {
                if let Some(unit) = self.unit_draft_mut(index) {
                    unit.assign_responsible(person.as_ref());
                }
            }
            Action::AddUnit => {
                if let Modal::CompleteCustomer { draft, .. } = &mut self.modal {
                    draft.units.push(UnitDraft::blank());
                }
            }
            Action::RemoveUnit(index) => {
                if let Modal::CompleteCustomer { editing, draft } = &mut self.modal {
                    // An existing customer always keeps at least one unit.
                    let removable = draft.units.len() > 1 || editing.is_none();
                    if removable && index < draft.units.len() {
                        draft.units.remove(index);
                    }
                }
            }
            Action::SetFormErrors(errors) => self.form_errors = errors,
            Action::PersonsLoading => self.persons_loading = true,
            Action::PersonsLoaded(persons) => {
                self.persons = persons;
                self.persons_loading = false;
            }
        }
        self
    }

    fn unit_draft_mut(&mut self, index: usize) -> Option<&mut UnitDraft> {
        match &mut self.modal {
            Modal::CompleteCustomer { draft, .. } => draft.unit_mut(index),
            _ => None,
        }
    }
}
