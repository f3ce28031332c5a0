use crate::config::PlannerConfig;
use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file, e.g.
///
/// ```toml
/// [storage]
/// data_dir = "${HOME}/.planner"
///
/// [catalog]
/// default_credits = 4
///
/// [session]
/// timetable = 0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: Option<StorageConfig>,
    pub catalog: Option<CatalogConfig>,
    pub session: Option<SessionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub default_credits: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub timetable: Option<u32>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overwrites the fields of `config` that this file sets.
    pub fn apply_to(&self, config: &mut PlannerConfig) {
        if let Some(data_dir) = self.storage.as_ref().and_then(|s| s.data_dir.clone()) {
            config.data_dir = data_dir;
        }
        if let Some(credits) = self.catalog.as_ref().and_then(|c| c.default_credits) {
            config.default_credits = credits;
        }
        if let Some(index) = self.session.as_ref().and_then(|s| s.timetable) {
            config.initial_timetable = index;
        }
    }
}
