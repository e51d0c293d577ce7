//! On-disk configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// The configuration file as written by the user.
///
/// Every field is optional here; defaults and validation are applied when the
/// file is resolved into a [`Config`](super::Config).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    /// The JIRA instance URL (e.g. "https://jira.example.com").
    pub base_url: String,
    /// REST API version, "2" if unset.
    pub api_version: Option<String>,
    /// Path the instance is served under, e.g. "/jira".
    pub endpoint_prefix: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Personal access token, sent as a bearer token.
    pub token: Option<String>,
    /// Project used by `create` and `list` when none is given.
    pub default_project: Option<String>,
    /// Per-request timeout in seconds, 5 if unset.
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse TOML configuration content.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(ConfigError::ParseError)
    }
}
