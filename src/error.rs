//! Error types for custcmd.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::models::{UnitAction, UnitId};

#[derive(Debug, Error)]
pub enum Error {
    /// `generic` is set when the server gave no reason and `message` is
    /// the client's description of the operation.
    #[error("{message}")]
    RequestFailed {
        status: u16,
        message: String,
        generic: bool,
    },

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", .0.summary())]
    ValidationFailed(FormErrors),

    #[error("Failed to {action} unit {unit_name}: {message}")]
    UnitWriteFailed {
        action: UnitAction,
        unit_name: String,
        message: String,
        outcomes: Vec<UnitOutcome>,
    },

    #[error("No {0} is open")]
    NoActiveForm(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
            generic: false,
        }
    }

    pub fn request_failed_generic(status: u16, fallback: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: fallback.into(),
            generic: true,
        }
    }

    /// Swap a generic request failure message for one worded by the caller.
    /// Server-provided messages are kept.
    pub fn or_describe(self, description: &str) -> Self {
        match self {
            Self::RequestFailed {
                status,
                generic: true,
                ..
            } => Self::request_failed_generic(status, description),
            other => other,
        }
    }

    /// HTTP status for errors the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message without any wrapping, as shown next to a failed unit.
    pub fn detail(&self) -> String {
        match self {
            Self::RequestFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result of one unit write in a complete-customer submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutcome {
    pub index: usize,
    pub unit_name: String,
    pub action: UnitAction,
    pub result: std::result::Result<UnitId, String>,
}

impl UnitOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Form field a validation message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    /// Name field of the simple group form.
    GroupeName,
    /// Group name inside the complete-customer form.
    GroupName,
    /// Name of the staged unit at this index.
    UnitName(usize),
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::GroupeName => write!(f, "groupe_name"),
            FieldKey::GroupName => write!(f, "group_name"),
            FieldKey::UnitName(i) => write!(f, "unit_{}_name", i),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FieldKey, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FieldKey, message: impl Into<String>) {
        self.0.insert(key, message.into());
    }

    pub fn clear(&mut self, key: FieldKey) {
        self.0.remove(&key);
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn summary(&self) -> String {
        self.0.values().cloned().collect::<Vec<_>>().join("; ")
    }
}
