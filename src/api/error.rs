//! API error types for the JIRA client.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Errors that can occur when interacting with the JIRA API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client was built without a usable credential set.
    ///
    /// Raised before any request leaves the process.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller supplied input the API cannot accept (empty JQL, empty labels).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// DNS, TCP, TLS or timeout failure on a read-only request.
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A mutating request failed in flight, most commonly by timing out.
    ///
    /// The server may or may not have applied the change.
    #[error(
        "{method} {endpoint} did not complete, the change may or may not have been applied: {source}"
    )]
    AmbiguousOutcome {
        method: Method,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status code above 299.
    ///
    /// The body is kept verbatim since JIRA puts its diagnostics there.
    #[error("JIRA returned HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// No transition out of the issue's current state matches the requested name.
    #[error(
        "could not find '{requested}' as a valid transition for {key}, valid transitions are: {}",
        .available.join(", ")
    )]
    NoSuchTransition {
        key: String,
        requested: String,
        available: Vec<String>,
    },

    /// The response body could not be decoded or the request body encoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Classify a transport failure.
    ///
    /// Anything but a GET that fails after it may have reached the server is
    /// reported as an ambiguous outcome instead of a plain failure.
    pub fn from_transport(method: &Method, endpoint: &str, err: reqwest::Error) -> Self {
        let may_have_landed = err.is_timeout() || err.is_request() || err.is_body();
        if *method != Method::GET && may_have_landed && !err.is_connect() {
            ApiError::AmbiguousOutcome {
                method: method.clone(),
                endpoint: endpoint.to_string(),
                source: err,
            }
        } else {
            ApiError::Transport(err)
        }
    }

    /// The HTTP status code, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error was raised without talking to the server.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ApiError::Configuration(_) | ApiError::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_body_verbatim() {
        let body = r#"{"errorMessages":["Issue does not exist"],"errors":{}}"#;
        let err = ApiError::Api {
            status: StatusCode::NOT_FOUND,
            body: body.to_string(),
        };
        assert_eq!(
            err.to_string(),
            format!("JIRA returned HTTP 404 Not Found: {}", body)
        );
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_no_such_transition_lists_alternatives() {
        let err = ApiError::NoSuchTransition {
            key: "JIWA-1".to_string(),
            requested: "cancelled".to_string(),
            available: vec!["In Progress".to_string(), "Done".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("cancelled"));
        assert!(msg.contains("JIWA-1"));
        assert!(msg.contains("In Progress, Done"));
    }

    #[test]
    fn test_local_errors() {
        assert!(ApiError::Configuration("no credentials".to_string()).is_local());
        assert!(ApiError::InvalidInput("empty".to_string()).is_local());
        assert!(!ApiError::InvalidResponse("bad json".to_string()).is_local());
        assert!(ApiError::InvalidInput("empty".to_string()).status().is_none());
    }
}
