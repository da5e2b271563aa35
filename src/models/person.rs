use serde::{Deserialize, Serialize};

use super::{null_as_empty, PersonId};

pub const DEFAULT_ROLE: &str = "Contact";

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// A directory contact. Read-only from this side of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "Person_id")]
    pub person_id: PersonId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default = "default_role", deserialize_with = "role_or_default")]
    pub role: String,
    #[serde(default)]
    pub zone_name: Option<String>,
}

fn role_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let role = Option::<String>::deserialize(deserializer)?;
    Ok(role.filter(|r| !r.is_empty()).unwrap_or_else(default_role))
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Label used in the responsible-person picker.
    pub fn picker_label(&self) -> String {
        match self.job_title.as_deref() {
            Some(title) if !title.is_empty() => format!("{} - {}", self.full_name(), title),
            _ => self.full_name(),
        }
    }
}
