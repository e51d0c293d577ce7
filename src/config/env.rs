//! Environment variable overrides for credentials.

/// Environment variable overriding the configured username.
pub const ENV_USERNAME: &str = "JIWA_USERNAME";
/// Environment variable overriding the configured password.
pub const ENV_PASSWORD: &str = "JIWA_PASSWORD";
/// Environment variable overriding the configured token.
pub const ENV_TOKEN: &str = "JIWA_TOKEN";

/// A snapshot of the credential environment variables.
///
/// Taken once at startup and handed to [`Config::resolve`](super::Config::resolve),
/// so resolution itself never reads the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl EnvOverrides {
    /// Snapshot the current process environment.
    ///
    /// Variables that are not valid unicode are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Build a snapshot from arbitrary key/value pairs.
    ///
    /// A variable that is set overrides the file even when its value is empty.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut overrides = Self::default();
        for (key, value) in vars {
            match key.as_ref() {
                ENV_USERNAME => overrides.username = Some(value.into()),
                ENV_PASSWORD => overrides.password = Some(value.into()),
                ENV_TOKEN => overrides.token = Some(value.into()),
                _ => {}
            }
        }
        overrides
    }
}
