//! Import configuration loading from YAML files
//!
//! Network settings and the retry policy applied around loads can be
//! kept in a YAML file instead of being passed on every invocation.
//! Credentials are deliberately not part of this file.

use crate::{ErrorField, ImportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Content type requested for every description document
pub const DEFAULT_ACCEPT: &str = "application/json";

/// Root structure for import configuration files
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Accepted content type for remote documents
    pub accept: String,
    /// Request timeout in seconds; the HTTP client default when unset
    pub timeout_secs: Option<u64>,
    /// User agent sent with remote requests
    pub user_agent: Option<String>,
    /// Retry policy wrapped around a whole load
    pub retry: RetrySettings,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            accept: DEFAULT_ACCEPT.to_string(),
            timeout_secs: None,
            user_agent: None,
            retry: RetrySettings::default(),
        }
    }
}

/// Retry settings
///
/// Defaults to no retry at all.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Maximum number of retry attempts after the first failure
    pub max_retries: u32,
    /// Initial delay between attempts in milliseconds
    pub initial_delay_ms: u64,
    /// Maximum delay between attempts in milliseconds
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
        }
    }
}

impl ImportConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ImportError::retrieval(
                ErrorField::File,
                format!("Failed to read config file {:?}: {}", path, e),
            )
        })?;

        Self::from_yaml(&content).map_err(|e| {
            ImportError::retrieval(
                ErrorField::File,
                format!("Failed to parse config YAML from {:?}: {}", path, e.message()),
            )
        })
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ImportError::retrieval(ErrorField::File, e.to_string()))
    }
}
