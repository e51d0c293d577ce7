//! Configuration management for Jiwa.
//!
//! Configuration comes from a TOML file and a snapshot of credential
//! environment variables. [`Config::resolve`] merges the two, applies
//! defaults and validates the result before any client is built.

mod env;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

pub use env::{EnvOverrides, ENV_PASSWORD, ENV_TOKEN, ENV_USERNAME};
pub use settings::FileConfig;

/// Default REST API version.
pub const DEFAULT_API_VERSION: &str = "2";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// The configuration file could not be read.
    #[error("cannot read configuration file {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has wrongly typed values.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[source] toml::de::Error),

    /// A value is present but unusable.
    #[error("{0}")]
    ValidationError(String),

    /// Neither username + password nor a token is configured.
    #[error(
        "either \"username\" + \"password\" or \"token\" need to be set, \
         they can also be supplied through JIWA_USERNAME, JIWA_PASSWORD and JIWA_TOKEN"
    )]
    MissingCredentials,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fully resolved and validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instance URL without trailing slash.
    pub base_url: String,
    /// Path prefix the instance is served under, empty or starting with '/'.
    pub endpoint_prefix: String,
    pub api_version: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub default_project: Option<String>,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            endpoint_prefix: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            username: None,
            password: None,
            token: None,
            default_project: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Merge the file configuration with the environment snapshot.
    ///
    /// Environment values replace file values whenever the variable is set.
    ///
    /// # Errors
    ///
    /// - `ConfigError::ValidationError` for a missing or non-http(s) base URL
    ///   or a zero timeout
    /// - `ConfigError::MissingCredentials` if no credential scheme is usable
    pub fn resolve(file: FileConfig, env: &EnvOverrides) -> Result<Self> {
        let base_url = file.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "\"base_url\" needs to be set".to_string(),
            ));
        }
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "\"base_url\" must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let endpoint_prefix = normalize_prefix(file.endpoint_prefix.as_deref().unwrap_or_default());

        let api_version = file
            .api_version
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "\"timeout_secs\" must be greater than zero".to_string(),
            ));
        }

        let username = env.username.clone().or(file.username);
        let password = env.password.clone().or(file.password);
        let token = env.token.clone().or(file.token);

        let set = |v: &Option<String>| v.as_deref().map_or(false, |s| !s.is_empty());
        if !(set(&username) && set(&password)) && !set(&token) {
            return Err(ConfigError::MissingCredentials);
        }

        let config = Self {
            base_url,
            endpoint_prefix,
            api_version,
            username,
            password,
            token,
            default_project: file.default_project.filter(|p| !p.is_empty()),
            timeout: Duration::from_secs(timeout_secs),
        };
        debug!(base_url = %config.base_url, prefix = %config.endpoint_prefix, "Configuration resolved");
        Ok(config)
    }

    /// The URL the REST API and browse pages live under.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint_prefix)
    }
}

/// Ensure a non-empty prefix starts with '/' and has no trailing '/'.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Platform location of the configuration file.
///
/// - Linux: `~/.config/jiwa/config.toml`
/// - macOS: `~/Library/Application Support/jiwa/config.toml`
/// - Windows: `C:\Users\<User>\AppData\Roaming\jiwa\config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("jiwa").join("config.toml"))
}

/// Load the configuration file at `path` (or the default location) and
/// resolve it against the environment snapshot.
pub fn load(path: Option<&Path>, env: &EnvOverrides) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    debug!(path = %path.display(), "Loading configuration");

    Config::resolve(FileConfig::load(&path)?, env)
}
