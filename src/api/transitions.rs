//! Resolving a status name into a workflow transition.
//!
//! JIRA only accepts transition ids, and the transitions on offer depend on
//! the issue's current status. The resolver fetches them, matches the
//! requested name case-insensitively and applies the single match.
//!
//! The list can go stale between the two calls if someone else moves the
//! issue. That race is accepted; a rejected apply is reported, never retried.

use tracing::{debug, info, instrument};

use super::client::JiraClient;
use super::error::{ApiError, Result};
use super::types::Transition;

/// Find the transition whose name equals `status`, ignoring case.
///
/// Only exact matches count. If a workflow offers several transitions with
/// the same name the last one listed by the server wins.
pub fn find_transition<'a>(transitions: &'a [Transition], status: &str) -> Option<&'a Transition> {
    let wanted = status.trim().to_lowercase();
    transitions
        .iter()
        .rev()
        .find(|t| t.name.to_lowercase() == wanted)
}

impl JiraClient {
    /// Move an issue to the status reachable through the transition named `status`.
    ///
    /// Returns the transition that was applied.
    ///
    /// # Errors
    ///
    /// - `ApiError::NoSuchTransition` listing every transition name that was
    ///   available if none matches
    /// - `ApiError::Api` if the server rejects the apply call
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn transition_issue(&self, key: &str, status: &str) -> Result<Transition> {
        if status.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "a target status is required".to_string(),
            ));
        }

        let transitions = self.list_issue_transitions(key).await?;

        let Some(transition) = find_transition(&transitions, status).cloned() else {
            debug!("No transition named '{}' out of the current status", status);
            return Err(ApiError::NoSuchTransition {
                key: key.to_string(),
                requested: status.to_string(),
                available: transitions.into_iter().map(|t| t.name).collect(),
            });
        };

        self.apply_transition(key, &transition.id).await?;

        info!(transition_id = %transition.id, "Moved issue to '{}'", transition.name);
        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::api::client::tests::setup;
    use crate::api::types::CreateIssueInput;

    fn transition(id: &str, name: &str) -> Transition {
        Transition {
            id: id.to_string(),
            name: name.to_string(),
            to: None,
        }
    }

    fn workflow() -> serde_json::Value {
        json!({
            "transitions": [
                {"id": "11", "name": "In Progress"},
                {"id": "21", "name": "Done"}
            ]
        })
    }

    #[test]
    fn test_find_transition_ignores_case() {
        let transitions = vec![transition("11", "In Progress"), transition("21", "Done")];

        assert_eq!(find_transition(&transitions, "done").unwrap().id, "21");
        assert_eq!(find_transition(&transitions, "IN PROGRESS").unwrap().id, "11");
        assert_eq!(find_transition(&transitions, " Done ").unwrap().id, "21");
    }

    #[test]
    fn test_find_transition_exact_only() {
        let transitions = vec![transition("11", "In Progress"), transition("21", "Done")];

        assert!(find_transition(&transitions, "progress").is_none());
        assert!(find_transition(&transitions, "In").is_none());
        assert!(find_transition(&transitions, "Don").is_none());
        assert!(find_transition(&[], "Done").is_none());
    }

    #[test]
    fn test_find_transition_duplicate_names_last_wins() {
        let transitions = vec![
            transition("11", "Done"),
            transition("15", "Reopen"),
            transition("21", "done"),
        ];

        assert_eq!(find_transition(&transitions, "Done").unwrap().id, "21");
    }

    #[tokio::test]
    async fn test_transition_applies_matching_id() {
        let (mock_server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-1/transitions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(workflow()))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/JIWA-1/transitions"))
            .and(body_json(json!({"transition": {"id": "21"}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let applied = client.transition_issue("JIWA-1", "done").await.unwrap();
        assert_eq!(applied.id, "21");
        assert_eq!(applied.name, "Done");
    }

    #[tokio::test]
    async fn test_unknown_status_lists_available_transitions() {
        let (mock_server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-1/transitions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(workflow()))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = client
            .transition_issue("JIWA-1", "cancelled")
            .await
            .unwrap_err();

        match &err {
            ApiError::NoSuchTransition { available, .. } => {
                assert_eq!(available, &vec!["In Progress".to_string(), "Done".to_string()]);
            }
            other => panic!("Expected NoSuchTransition, got {:?}", other),
        }
        let msg = err.to_string();
        assert!(msg.contains("In Progress"));
        assert!(msg.contains("Done"));
    }

    #[tokio::test]
    async fn test_rejected_apply_is_api_error_and_not_retried() {
        let (mock_server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-1/transitions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(workflow()))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/JIWA-1/transitions"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"errorMessages":["It seems that you have tried to perform a workflow operation that is not valid"]}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = client.transition_issue("JIWA-1", "Done").await.unwrap_err();
        match err {
            ApiError::Api { status, body } => {
                assert_eq!(status.as_u16(), 400);
                assert!(body.contains("workflow operation that is not valid"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_listing_failure_is_surfaced() {
        let (mock_server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-404/transitions"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Issue Does Not Exist"))
            .mount(&mock_server)
            .await;

        let err = client
            .transition_issue("JIWA-404", "Done")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Api { .. }));
        assert!(err.to_string().contains("Issue Does Not Exist"));
    }

    #[tokio::test]
    async fn test_create_then_move() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"key": "JIWA-42"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-42/transitions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(workflow()))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/JIWA-42/transitions"))
            .and(body_json(json!({"transition": {"id": "21"}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let created = client
            .create_issue(CreateIssueInput {
                project: "JIWA".to_string(),
                summary: "Fix bug".to_string(),
                issue_type: "Task".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.key, "JIWA-42");

        client.transition_issue(&created.key, "Done").await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let order: Vec<_> = requests
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect();
        assert_eq!(
            order,
            vec![
                "POST /rest/api/2/issue",
                "GET /rest/api/2/issue/JIWA-42/transitions",
                "POST /rest/api/2/issue/JIWA-42/transitions",
            ]
        );
    }
}
