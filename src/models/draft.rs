//! Client-side staging for the group and complete-customer forms.
//!
//! Drafts are plain strings the way a form holds them; blank optional
//! values are only turned into `null` when a payload is built.

use super::{Group, GroupPayload, Person, PersonId, Unit, UnitId, DEFAULT_ROLE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDraft {
    pub groupe_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Name,
    Description,
}

impl GroupDraft {
    pub fn from_group(group: &Group) -> Self {
        Self {
            groupe_name: group.groupe_name.clone(),
            description: group.description().to_string(),
        }
    }

    pub fn set(&mut self, field: GroupField, value: impl Into<String>) {
        let value = value.into();
        match field {
            GroupField::Name => self.groupe_name = value,
            GroupField::Description => self.description = value,
        }
    }

    pub fn to_payload(&self) -> GroupPayload {
        GroupPayload::new(self.groupe_name.clone(), self.description.clone())
    }
}

/// Denormalized copy of the person responsible for a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsibleDraft {
    pub person_id: Option<PersonId>,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub zone_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsibleField {
    FirstName,
    LastName,
    JobTitle,
    Email,
    PhoneNumber,
    Role,
    ZoneName,
}

impl Default for ResponsibleDraft {
    fn default() -> Self {
        Self {
            person_id: None,
            first_name: String::new(),
            last_name: String::new(),
            job_title: String::new(),
            email: String::new(),
            phone_number: String::new(),
            role: DEFAULT_ROLE.to_string(),
            zone_name: String::new(),
        }
    }
}

impl ResponsibleDraft {
    pub fn from_person(person: &Person) -> Self {
        let role = if person.role.is_empty() {
            DEFAULT_ROLE.to_string()
        } else {
            person.role.clone()
        };
        Self {
            person_id: Some(person.person_id),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            job_title: person.job_title.clone().unwrap_or_default(),
            email: person.email.clone().unwrap_or_default(),
            phone_number: person.phone_number.clone().unwrap_or_default(),
            role,
            zone_name: person.zone_name.clone().unwrap_or_default(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.person_id.is_some()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn set(&mut self, field: ResponsibleField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ResponsibleField::FirstName => self.first_name = value,
            ResponsibleField::LastName => self.last_name = value,
            ResponsibleField::JobTitle => self.job_title = value,
            ResponsibleField::Email => self.email = value,
            ResponsibleField::PhoneNumber => self.phone_number = value,
            ResponsibleField::Role => self.role = value,
            ResponsibleField::ZoneName => self.zone_name = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDraft {
    /// Present for units that already exist server-side.
    pub unit_id: Option<UnitId>,
    pub unit_name: String,
    pub city: String,
    pub country: String,
    pub zone_name: String,
    pub responsible: ResponsibleDraft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitField {
    Name,
    City,
    Country,
    ZoneName,
}

impl UnitDraft {
    pub fn blank() -> Self {
        Self {
            unit_id: None,
            unit_name: String::new(),
            city: String::new(),
            country: String::new(),
            zone_name: String::new(),
            responsible: ResponsibleDraft::default(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            unit_name: name.into(),
            ..Self::blank()
        }
    }

    pub fn from_unit(unit: &Unit) -> Self {
        Self {
            unit_id: Some(unit.unit_id),
            unit_name: unit.unit_name.clone(),
            city: unit.city.clone().unwrap_or_default(),
            country: unit.country.clone().unwrap_or_default(),
            zone_name: unit.zone_name.clone().unwrap_or_default(),
            responsible: unit
                .responsible
                .as_ref()
                .map(ResponsibleDraft::from_person)
                .unwrap_or_default(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.unit_id.is_none()
    }

    pub fn set(&mut self, field: UnitField, value: impl Into<String>) {
        let value = value.into();
        match field {
            UnitField::Name => self.unit_name = value,
            UnitField::City => self.city = value,
            UnitField::Country => self.country = value,
            UnitField::ZoneName => self.zone_name = value,
        }
    }

    /// Copy a person into the responsible snapshot, or clear it.
    pub fn assign_responsible(&mut self, person: Option<&Person>) {
        self.responsible = person.map(ResponsibleDraft::from_person).unwrap_or_default();
    }
}

/// One group plus its units, edited and submitted together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompleteCustomerDraft {
    pub group: GroupDraft,
    pub units: Vec<UnitDraft>,
}

impl CompleteCustomerDraft {
    pub fn from_group(group: &Group) -> Self {
        Self {
            group: GroupDraft::from_group(group),
            units: group.units.iter().map(UnitDraft::from_unit).collect(),
        }
    }

    pub fn unit_mut(&mut self, index: usize) -> Option<&mut UnitDraft> {
        self.units.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> Person {
        serde_json::from_str(
            r#"{"Person_id": 11, "first_name": "Ada", "last_name": "Byron",
                "email": "ada@avocarbon.com", "job_title": null, "role": "Manager"}"#,
        )
        .unwrap()
    }

    fn complete_group() -> Group {
        serde_json::from_str(
            r#"{
                "groupe_id": 3,
                "groupe_name": "Acme",
                "Description": null,
                "units": [
                    {"unit_id": 1, "groupe_id": 3, "unit_name": "Lyon", "city": "Lyon",
                     "responsible": {"Person_id": 11, "first_name": "Ada", "last_name": "Byron",
                                     "phone_number": null, "role": null}},
                    {"unit_id": 2, "groupe_id": 3, "unit_name": "Paris", "responsible": null}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_from_group_copies_responsible_snapshot() {
        let draft = CompleteCustomerDraft::from_group(&complete_group());
        assert_eq!(draft.group.groupe_name, "Acme");
        assert_eq!(draft.group.description, "");
        assert_eq!(draft.units.len(), 2);

        let first = &draft.units[0];
        assert_eq!(first.unit_id, Some(1));
        assert_eq!(first.city, "Lyon");
        assert_eq!(first.country, "");
        assert_eq!(first.responsible.person_id, Some(11));
        assert_eq!(first.responsible.first_name, "Ada");
        assert_eq!(first.responsible.phone_number, "");
        assert_eq!(first.responsible.role, "Contact");
    }

    #[test]
    fn test_from_group_blank_responsible_when_absent() {
        let draft = CompleteCustomerDraft::from_group(&complete_group());
        let second = &draft.units[1];
        assert_eq!(second.responsible, ResponsibleDraft::default());
        assert_eq!(second.responsible.role, "Contact");
        assert!(!second.responsible.is_assigned());
    }

    #[test]
    fn test_assign_and_clear_responsible() {
        let mut unit = UnitDraft::blank();
        unit.assign_responsible(Some(&person()));
        assert_eq!(unit.responsible.person_id, Some(11));
        assert_eq!(unit.responsible.email, "ada@avocarbon.com");
        assert_eq!(unit.responsible.job_title, "");
        assert_eq!(unit.responsible.role, "Manager");

        unit.assign_responsible(None);
        assert_eq!(unit.responsible, ResponsibleDraft::default());
    }

    #[test]
    fn test_typed_field_setters() {
        let mut draft = CompleteCustomerDraft::default();
        draft.group.set(GroupField::Name, "Globex");
        draft.group.set(GroupField::Description, "Widgets");
        draft.units.push(UnitDraft::blank());
        let unit = draft.unit_mut(0).unwrap();
        unit.set(UnitField::Name, "Berlin");
        unit.set(UnitField::ZoneName, "EU");
        unit.responsible.set(ResponsibleField::Role, "Buyer");

        assert_eq!(draft.group.to_payload(), GroupPayload::new("Globex", "Widgets"));
        assert_eq!(draft.units[0].unit_name, "Berlin");
        assert_eq!(draft.units[0].zone_name, "EU");
        assert_eq!(draft.units[0].responsible.role, "Buyer");
        assert!(draft.unit_mut(5).is_none());
    }
}
