use serde::{Deserialize, Serialize};

use super::{null_as_empty, non_blank, GroupId, Person, PersonId, UnitDraft, UnitId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub unit_id: UnitId,
    #[serde(default)]
    pub groupe_id: Option<GroupId>,
    #[serde(deserialize_with = "null_as_empty")]
    pub unit_name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default, alias = "com_person_id")]
    pub responsible_person_id: Option<PersonId>,
    #[serde(default)]
    pub responsible: Option<Person>,
}

impl Unit {
    /// "City, Country" with whichever parts are present.
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Case-insensitive substring filter over unit names.
pub fn filter_units<'a>(units: &'a [Unit], term: &str) -> Vec<&'a Unit> {
    if term.trim().is_empty() {
        return units.iter().collect();
    }
    let term = term.to_lowercase();
    units
        .iter()
        .filter(|u| u.unit_name.to_lowercase().contains(&term))
        .collect()
}

/// Body of `POST /api/units` and `PUT /api/units/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPayload {
    pub groupe_id: GroupId,
    pub unit_name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub zone_name: Option<String>,
    #[serde(rename = "com_person_id")]
    pub responsible_person_id: Option<PersonId>,
}

impl UnitPayload {
    pub fn from_draft(groupe_id: GroupId, draft: &UnitDraft) -> Self {
        Self {
            groupe_id,
            unit_name: draft.unit_name.clone(),
            city: non_blank(&draft.city),
            country: non_blank(&draft.country),
            zone_name: non_blank(&draft.zone_name),
            responsible_person_id: draft.responsible.person_id,
        }
    }
}

/// Whether a staged unit is written with POST or PUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitAction {
    Create,
    Update(UnitId),
}

impl UnitAction {
    pub fn for_draft(draft: &UnitDraft) -> Self {
        match draft.unit_id {
            Some(id) => Self::Update(id),
            None => Self::Create,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update(_) => "update",
        }
    }
}

impl std::fmt::Display for UnitAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: UnitId, name: &str) -> Unit {
        Unit {
            unit_id: id,
            groupe_id: Some(1),
            unit_name: name.to_string(),
            city: None,
            country: None,
            zone_name: None,
            responsible_person_id: None,
            responsible: None,
        }
    }

    #[test]
    fn test_filter_units() {
        let units = vec![unit(1, "Lyon Plant"), unit(2, "Paris HQ"), unit(3, "lyon depot")];
        let found = filter_units(&units, "LYON");
        assert_eq!(found.len(), 2);
        assert_eq!(filter_units(&units, "").len(), 3);
        assert!(filter_units(&units, "berlin").is_empty());
    }

    #[test]
    fn test_filter_units_matches_raw_term() {
        let units = vec![unit(1, "Lyon Plant"), unit(2, "Plant Nord")];
        let found = filter_units(&units, " plant");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].unit_id, 1);
        assert_eq!(filter_units(&units, "  ").len(), 2);
    }

    #[test]
    fn test_payload_blank_fields_become_null() {
        let mut draft = UnitDraft::blank();
        draft.unit_name = "Lyon".to_string();
        draft.city = "  ".to_string();
        draft.country = "France".to_string();
        let body = serde_json::to_value(UnitPayload::from_draft(9, &draft)).unwrap();
        assert_eq!(body["groupe_id"], 9);
        assert!(body["city"].is_null());
        assert_eq!(body["country"], "France");
        assert!(body["zone_name"].is_null());
        assert!(body["com_person_id"].is_null());
    }

    #[test]
    fn test_unit_action_follows_unit_id() {
        let mut draft = UnitDraft::blank();
        assert_eq!(UnitAction::for_draft(&draft), UnitAction::Create);
        draft.unit_id = Some(12);
        assert_eq!(UnitAction::for_draft(&draft), UnitAction::Update(12));
    }

    #[test]
    fn test_location() {
        let mut u = unit(1, "Lyon");
        assert_eq!(u.location(), None);
        u.city = Some("Lyon".to_string());
        u.country = Some("France".to_string());
        assert_eq!(u.location().as_deref(), Some("Lyon, France"));
    }
}
