//! Per-instance `DuckDB` settings for the SQL sandbox.
//!
//! Every request opens its own in-memory database with these settings. None of
//! them bounds query runtime.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_allow_external_access() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SandboxConfig {
    /// Worker threads per ephemeral instance. Engine default when unset.
    #[serde(default)]
    pub threads: Option<u32>,

    /// `DuckDB` `max_memory` setting (e.g., `"256MB"`). Engine default when unset.
    #[serde(default)]
    pub memory_limit: Option<String>,

    /// Whether statements may read or write files and URLs outside the instance.
    #[serde(default = "default_allow_external_access")]
    pub allow_external_access: bool,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            threads: None,
            memory_limit: None,
            allow_external_access: default_allow_external_access(),
        }
    }
}

impl SandboxConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == Some(0) {
            return Err(ConfigError::invalid(
                "sandbox.threads",
                "must be at least 1 when set",
            ));
        }
        if self
            .memory_limit
            .as_deref()
            .is_some_and(|limit| limit.trim().is_empty())
        {
            return Err(ConfigError::invalid(
                "sandbox.memory_limit",
                "must not be empty when set",
            ));
        }
        Ok(())
    }
}
