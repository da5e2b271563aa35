use serde::{Deserialize, Serialize};

use super::{null_as_empty, GroupId, Unit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub groupe_id: GroupId,
    #[serde(deserialize_with = "null_as_empty")]
    pub groupe_name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Group {
    /// Case-insensitive substring match on the group name.
    pub fn matches(&self, term: &str) -> bool {
        term.trim().is_empty() || self.groupe_name.to_lowercase().contains(&term.to_lowercase())
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn logo_sources(&self) -> LogoSources {
        LogoSources::for_company(&self.groupe_name, self.description())
    }
}

/// Body of `POST /api/groups` and `PUT /api/groups/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPayload {
    pub groupe_name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl GroupPayload {
    pub fn new(groupe_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            groupe_name: groupe_name.into(),
            description: description.into(),
        }
    }
}

/// Where to look for a company's logo, best source first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoSources {
    pub domain: String,
    pub clearbit_url: String,
    pub favicon_url: String,
    pub fallback_category: &'static str,
}

impl LogoSources {
    pub fn for_company(name: &str, description: &str) -> Self {
        let domain: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        let domain = format!("{}.com", domain);
        let fallback_category = if description.to_lowercase().contains("automobile") {
            "automobile"
        } else {
            "industry"
        };

        Self {
            clearbit_url: format!("https://logo.clearbit.com/{}", domain),
            favicon_url: format!("https://www.google.com/s2/favicons?domain={}", domain),
            domain,
            fallback_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str) -> Group {
        Group {
            groupe_id: 1,
            groupe_name: name.to_string(),
            description: None,
            units: Vec::new(),
        }
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let g = group("Acme Industries");
        assert!(g.matches("acme"));
        assert!(g.matches("INDUS"));
        assert!(g.matches(""));
        assert!(!g.matches("globex"));
    }

    #[test]
    fn test_matches_keeps_surrounding_spaces() {
        assert!(group("ACME Europe").matches(" europe"));
        assert!(!group("Europe Corp").matches(" europe"));
    }

    #[test]
    fn test_deserialize_api_group() {
        let json = r#"{
            "groupe_id": 7,
            "groupe_name": "Acme",
            "Description": null,
            "units": [{"unit_id": 3, "groupe_id": 7, "unit_name": "Lyon"}]
        }"#;
        let g: Group = serde_json::from_str(json).unwrap();
        assert_eq!(g.groupe_id, 7);
        assert_eq!(g.description(), "");
        assert_eq!(g.units.len(), 1);
        assert_eq!(g.units[0].unit_name, "Lyon");
    }

    #[test]
    fn test_group_without_units_field() {
        let g: Group = serde_json::from_str(r#"{"groupe_id": 2, "groupe_name": "Solo"}"#).unwrap();
        assert!(g.units.is_empty());
    }

    #[test]
    fn test_payload_uses_api_field_names() {
        let body = serde_json::to_value(GroupPayload::new("Acme", "x")).unwrap();
        assert_eq!(body["groupe_name"], "Acme");
        assert_eq!(body["Description"], "x");
    }

    #[test]
    fn test_logo_sources() {
        let logo = LogoSources::for_company("Big Motors", "Automobile parts supplier");
        assert_eq!(logo.domain, "bigmotors.com");
        assert_eq!(logo.clearbit_url, "https://logo.clearbit.com/bigmotors.com");
        assert_eq!(logo.fallback_category, "automobile");

        let logo = LogoSources::for_company("Acme", "");
        assert_eq!(logo.fallback_category, "industry");
    }
}
