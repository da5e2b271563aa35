//! Endpoint configuration
//!
//! Defaults, then `config.toml` in the user config directory, then
//! environment variables, then command-line flags.

use log::debug;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://customer-back.azurewebsites.net/ajouter";
pub const DEFAULT_PERSON_DOMAIN: &str = "avocarbon.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Environment variable names
const ENV_API_URL: &str = "CUSTCMD_API_URL";
const ENV_PERSON_DOMAIN: &str = "CUSTCMD_PERSON_DOMAIN";
const ENV_TIMEOUT_SECS: &str = "CUSTCMD_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL the `/api/...` paths are appended to.
    pub api_url: String,
    /// Email domain used to list candidate responsible persons.
    pub person_domain: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
    person_domain: Option<String>,
    timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            person_domain: DEFAULT_PERSON_DOMAIN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load from the default config file and the process environment.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        let config = Self::load_from(path.as_deref())?;
        Ok(config.with_env(|key| env::var(key).ok()))
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let Some(path) = path else {
            return Ok(config);
        };
        if !path.exists() {
            debug!("no config file at {}", path.display());
            return Ok(config);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let file: FileConfig = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        debug!("loaded config from {}", path.display());

        if let Some(url) = file.api_url {
            config.api_url = url;
        }
        if let Some(domain) = file.person_domain {
            config.person_domain = domain;
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout_secs = secs;
        }

        config.normalize();
        Ok(config)
    }

    /// Apply environment overrides. Environment variables take precedence
    /// over the config file.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(domain) = lookup(ENV_PERSON_DOMAIN).filter(|v| !v.trim().is_empty()) {
            self.person_domain = domain;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|v| v.trim().parse().ok()) {
            self.timeout_secs = secs;
        }
        self.normalize();
        self
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, api_url: Option<String>, person_domain: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(domain) = person_domain {
            self.person_domain = domain;
        }
        self.normalize();
        self
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_url)
            .map_err(|e| Error::Config(format!("api_url {:?}: {}", self.api_url, e)))?;
        if self.person_domain.trim().is_empty() {
            return Err(Error::Config("person_domain is empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("custcmd").join("config.toml"))
    }

    fn normalize(&mut self) {
        let trimmed = self.api_url.trim().trim_end_matches('/').to_string();
        self.api_url = trimmed;
        self.person_domain = self.person_domain.trim().trim_start_matches('@').to_string();
    }
}
