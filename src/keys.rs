//! Issue keys and browse URLs.
//!
//! Issue keys look like `PROJ-123`: an uppercase project code, a hyphen and
//! a number. Commands print browse URLs so their output can be piped into
//! the next command, which strips them back into keys.

use crate::config::Config;

/// Check whether `s` is a well-formed issue key.
///
/// The project code starts with an uppercase letter and may continue with
/// uppercase letters, digits or underscores.
pub fn is_issue_key(s: &str) -> bool {
    let Some((project, number)) = s.split_once('-') else {
        return false;
    };

    let mut chars = project.chars();
    let starts_upper = chars.next().map_or(false, |c| c.is_ascii_uppercase());
    starts_upper
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}

/// Converts between issue keys and browse URLs for one JIRA instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLinks {
    /// Instance URL without endpoint prefix.
    base_url: String,
    /// Instance URL with endpoint prefix.
    prefixed_url: String,
}

impl IssueLinks {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            prefixed_url: config.api_base(),
        }
    }

    /// The browse URL of an issue, e.g. `https://jira.example.com/jira/browse/PROJ-1`.
    pub fn url_for(&self, key: &str) -> String {
        format!("{}/browse/{}", self.prefixed_url, key)
    }

    /// Recover an issue key from a bare key or a browse URL.
    ///
    /// URLs are accepted with or without the endpoint prefix. Returns `None`
    /// when the input is neither.
    pub fn key_from(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if is_issue_key(raw) {
            return Some(raw.to_string());
        }

        [&self.prefixed_url, &self.base_url]
            .into_iter()
            .filter_map(|base| raw.strip_prefix(base.as_str()))
            .filter_map(|rest| rest.strip_prefix("/browse/"))
            .map(|key| key.trim_end_matches('/'))
            .find(|key| is_issue_key(key))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(prefix: &str) -> IssueLinks {
        IssueLinks::new(&Config {
            base_url: "https://jira.example.com".to_string(),
            endpoint_prefix: prefix.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_valid_issue_keys() {
        for key in ["JIWA-1", "JIWA-001", "AB2-99", "MY_PROJ-7", "X-0"] {
            assert!(is_issue_key(key), "{} should be valid", key);
        }
    }

    #[test]
    fn test_invalid_issue_keys() {
        for key in ["", "-1", "JIWA-", "jiwa-1", "JIWA", "01Something", "JIWA-1a", "2X-1", "JIWA-1-2", "JIWA-1 "] {
            assert!(!is_issue_key(key), "{:?} should be invalid", key);
        }
    }

    #[test]
    fn test_url_for() {
        assert_eq!(
            links("").url_for("JIWA-001"),
            "https://jira.example.com/browse/JIWA-001"
        );
        assert_eq!(
            links("/jira").url_for("JIWA-001"),
            "https://jira.example.com/jira/browse/JIWA-001"
        );
    }

    #[test]
    fn test_key_from_url() {
        assert_eq!(
            links("").key_from("https://jira.example.com/browse/JIWA-001"),
            Some("JIWA-001".to_string())
        );
        assert_eq!(
            links("/jira").key_from("https://jira.example.com/jira/browse/JIWA-001\n"),
            Some("JIWA-001".to_string())
        );
    }

    #[test]
    fn test_key_from_url_without_configured_prefix() {
        assert_eq!(
            links("/jira").key_from("https://jira.example.com/browse/JIWA-001"),
            Some("JIWA-001".to_string())
        );
    }

    #[test]
    fn test_key_from_bare_key() {
        assert_eq!(links("/jira").key_from("  JIWA-001 "), Some("JIWA-001".to_string()));
    }

    #[test]
    fn test_key_from_garbage() {
        let links = links("/jira");
        assert_eq!(links.key_from("invalidURL"), None);
        assert_eq!(links.key_from(""), None);
        assert_eq!(links.key_from("https://other.example.com/browse/JIWA-1"), None);
        assert_eq!(links.key_from("https://jira.example.com/browse/not-a-key"), None);
    }
}
