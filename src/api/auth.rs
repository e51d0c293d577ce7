//! Authentication handling for the JIRA API.
//!
//! JIRA accepts either HTTP Basic (username + password or API token used as
//! password) or a personal access token sent as a bearer token. Exactly one
//! scheme is attached to every request.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::debug;

use super::error::{ApiError, Result};

/// Authentication credentials for JIRA.
#[derive(Clone)]
pub enum Auth {
    /// HTTP Basic authentication.
    Basic {
        /// The username the header was built for.
        username: String,
        /// The complete "Basic ..." header value.
        header: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The complete "Bearer ..." header value.
        header: String,
    },
}

impl Auth {
    /// Build HTTP Basic credentials.
    ///
    /// The password is encoded immediately and not stored.
    pub fn basic(username: &str, password: &str) -> Self {
        Auth::Basic {
            username: username.to_string(),
            header: build_basic_header(username, password),
        }
    }

    /// Build bearer token credentials.
    pub fn bearer(token: &str) -> Self {
        Auth::Bearer {
            header: format!("Bearer {}", token),
        }
    }

    /// Pick the authentication scheme from the configured credential fields.
    ///
    /// Basic wins whenever both username and password are present, even if a
    /// token is configured as well. A token alone selects bearer auth.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if neither scheme can be built.
    pub fn from_credentials(
        username: Option<&str>,
        password: Option<&str>,
        token: Option<&str>,
    ) -> Result<Self> {
        match (non_empty(username), non_empty(password), non_empty(token)) {
            (Some(user), Some(pass), token) => {
                if token.is_some() {
                    debug!("Both basic credentials and a token are configured, using basic auth");
                }
                Ok(Self::basic(user, pass))
            }
            (_, _, Some(token)) => Ok(Self::bearer(token)),
            _ => Err(ApiError::Configuration(
                "either username + password or token need to be set".to_string(),
            )),
        }
    }

    /// Get the authorization header value for HTTP requests.
    pub fn header_value(&self) -> &str {
        match self {
            Auth::Basic { header, .. } | Auth::Bearer { header } => header,
        }
    }

    /// Short name of the scheme, safe to log.
    pub fn scheme(&self) -> &'static str {
        match self {
            Auth::Basic { .. } => "basic",
            Auth::Bearer { .. } => "bearer",
        }
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Auth::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
        }
    }
}

/// Empty values count as unset.
fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.is_empty())
}

/// Encodes "username:password" in Base64 and prepends "Basic ".
fn build_basic_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}
