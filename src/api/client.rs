//! JIRA API client implementation.
//!
//! This module provides the main client for interacting with the JIRA REST API.
//! Every typed operation goes through a single request primitive that builds
//! the URL, attaches authentication, applies the per-call timeout and turns any
//! status above 299 into an error carrying the raw response body.
//!
//! Nothing is retried: a failed or timed-out call is surfaced immediately.

use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::types::{
    CommentRequest, CreateIssueInput, CreatedIssue, FieldUpdates, Issue, IssueUpdateRequest,
    NameRef, Project, SearchResult, Transition, TransitionId, TransitionRequest,
    TransitionsResponse,
};
use crate::config::Config;
use crate::keys::is_issue_key;

/// User-Agent header value sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The JIRA API client.
///
/// Holds immutable connection details plus a reusable HTTP transport. Calls
/// are independent of each other; no issue state is cached between them.
#[derive(Debug)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// Base URL including any endpoint prefix, without trailing slash.
    base_url: String,
    /// The REST API version segment (e.g. "2").
    api_version: String,
    /// Authentication credentials.
    auth: Auth,
}

impl JiraClient {
    /// Create a new JIRA client from a resolved configuration.
    ///
    /// No request is made; the connection is not validated up front.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if neither username + password nor a
    /// token is configured, and `ApiError::Transport` if the HTTP client
    /// cannot be built.
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: &Config) -> Result<Self> {
        let auth = Auth::from_credentials(
            config.username.as_deref(),
            config.password.as_deref(),
            config.token.as_deref(),
        )?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::Transport)?;

        info!(scheme = auth.scheme(), "JIRA client created");

        Ok(Self {
            client,
            base_url: config.api_base(),
            api_version: config.api_version.clone(),
            auth,
        })
    }

    /// Get the base URL (including the endpoint prefix).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute URL for an endpoint relative to the REST root.
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/rest/api/{}/{}",
            self.base_url, self.api_version, endpoint
        )
    }

    /// Perform one authenticated HTTP exchange and return the raw body.
    ///
    /// Any status up to and including 299 is a success. Above that the status
    /// and body are returned verbatim in `ApiError::Api`.
    #[instrument(skip(self, params, body), fields(method = %method, endpoint = %endpoint))]
    async fn call_api<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<String> {
        let url = self.endpoint_url(endpoint);
        debug!(url = %url, "Sending request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");

        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to encode request body: {}", e))
            })?;
            request = request.body(bytes);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&method, endpoint, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&method, endpoint, e))?;

        debug!(status = status.as_u16(), "Received response");

        if status.as_u16() > 299 {
            debug!("Error response body: {}", text);
            return Err(ApiError::Api { status, body: text });
        }

        Ok(text)
    }

    /// GET an endpoint and decode its JSON body.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        let body = self
            .call_api::<()>(Method::GET, endpoint, params, None)
            .await?;
        decode(&body)
    }

    /// Create an issue in the given project.
    ///
    /// The returned value carries the key the server assigned.
    #[instrument(skip(self, input), fields(project = %input.project))]
    pub async fn create_issue(&self, input: CreateIssueInput) -> Result<CreatedIssue> {
        if input.project.is_empty() {
            return Err(ApiError::InvalidInput("a project is required".to_string()));
        }
        if input.summary.trim().is_empty() {
            return Err(ApiError::InvalidInput("the summary cannot be empty".to_string()));
        }

        let request = input.into_request();
        let body = self
            .call_api(Method::POST, "issue", &[], Some(&request))
            .await?;
        let created: CreatedIssue = decode(&body)?;

        info!(issue_key = %created.key, "Issue created");
        Ok(created)
    }

    /// Get a single issue by key.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_issue(&self, key: &str) -> Result<Issue> {
        check_key(key)?;
        let issue: Issue = self.get(&format!("issue/{}", key), &[]).await?;
        debug!("Fetched issue: {}", issue.key);
        Ok(issue)
    }

    /// Update the given fields of an issue; unset fields are left alone.
    #[instrument(skip(self, updates), fields(issue_key = %key))]
    pub async fn update_issue(&self, key: &str, updates: &FieldUpdates) -> Result<()> {
        check_key(key)?;
        if updates.is_empty() {
            return Err(ApiError::InvalidInput(
                "no fields to update were given".to_string(),
            ));
        }

        let request = IssueUpdateRequest { fields: updates };
        self.call_api(Method::PUT, &format!("issue/{}", key), &[], Some(&request))
            .await?;
        Ok(())
    }

    /// Assign an issue to a user, identified by username.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn assign_issue(&self, key: &str, assignee: &str) -> Result<()> {
        if assignee.is_empty() {
            return Err(ApiError::InvalidInput("the assignee cannot be empty".to_string()));
        }

        let updates = FieldUpdates {
            assignee: Some(NameRef::new(assignee)),
            ..Default::default()
        };
        self.update_issue(key, &updates).await
    }

    /// Set the labels of an issue.
    ///
    /// The given set replaces whatever labels the issue had; it is not merged.
    /// Callers wanting to add labels must read the current ones first.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn label_issue(&self, key: &str, labels: &[String]) -> Result<()> {
        if labels.is_empty() {
            return Err(ApiError::InvalidInput(
                "need to supply at least one label".to_string(),
            ));
        }

        let updates = FieldUpdates {
            labels: Some(labels.to_vec()),
            ..Default::default()
        };
        self.update_issue(key, &updates).await
    }

    /// Add a comment to an issue.
    #[instrument(skip(self, comment), fields(issue_key = %key))]
    pub async fn comment_on_issue(&self, key: &str, comment: &str) -> Result<()> {
        check_key(key)?;
        if comment.trim().is_empty() {
            return Err(ApiError::InvalidInput("the comment cannot be empty".to_string()));
        }

        let request = CommentRequest { body: comment };
        self.call_api(
            Method::POST,
            &format!("issue/{}/comment", key),
            &[],
            Some(&request),
        )
        .await?;
        Ok(())
    }

    /// Search for issues using JQL.
    ///
    /// Returns exactly the page the server sends back; no automatic paging.
    #[instrument(skip(self), fields(jql = %jql))]
    pub async fn search(&self, jql: &str) -> Result<SearchResult> {
        if jql.is_empty() {
            return Err(ApiError::InvalidInput(
                "cannot search with empty search query".to_string(),
            ));
        }

        let result: SearchResult = self.get("search", &[("jql", jql)]).await?;
        debug!(
            "Found {} issues (total: {})",
            result.issues.len(),
            result.total
        );
        Ok(result)
    }

    /// Get a project, including the issue types it supports.
    #[instrument(skip(self), fields(project = %key))]
    pub async fn get_project(&self, key: &str) -> Result<Project> {
        if key.is_empty() {
            return Err(ApiError::InvalidInput("a project key is required".to_string()));
        }

        self.get(&format!("project/{}", urlencoding::encode(key)), &[])
            .await
    }

    /// List the transitions reachable from the issue's current status.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn list_issue_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        check_key(key)?;
        let response: TransitionsResponse = self
            .get(&format!("issue/{}/transitions", key), &[])
            .await?;
        debug!("Issue has {} transitions", response.transitions.len());
        Ok(response.transitions)
    }

    /// Apply a transition by its id.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn apply_transition(&self, key: &str, transition_id: &str) -> Result<()> {
        check_key(key)?;

        let request = TransitionRequest {
            transition: TransitionId {
                id: transition_id.to_string(),
            },
        };
        self.call_api(
            Method::POST,
            &format!("issue/{}/transitions", key),
            &[],
            Some(&request),
        )
        .await?;
        Ok(())
    }
}

/// Reject anything that is not a `PROJECT-NUMBER` key before it reaches a URL.
fn check_key(key: &str) -> Result<()> {
    if is_issue_key(key) {
        Ok(())
    } else {
        Err(ApiError::InvalidInput(format!(
            "'{}' is not a valid issue key, expected something like PROJ-123",
            key
        )))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    pub(crate) fn test_config(base_url: &str) -> Config {
        Config {
            base_url: base_url.to_string(),
            username: Some("test_user".to_string()),
            password: Some("test_token".to_string()),
            ..Default::default()
        }
    }

    pub(crate) async fn setup() -> (MockServer, JiraClient) {
        let mock_server = MockServer::start().await;
        let client = JiraClient::new(&test_config(&mock_server.uri())).unwrap();
        (mock_server, client)
    }

    fn credential_config(
        username: Option<&str>,
        password: Option<&str>,
        token: Option<&str>,
    ) -> Config {
        Config {
            base_url: "https://jira.example.com".to_string(),
            username: username.map(str::to_string),
            password: password.map(str::to_string),
            token: token.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_requires_credentials() {
        let cases = [
            (Some("u"), Some("p"), None, true),
            (None, None, Some("t"), true),
            (Some("u"), Some("p"), Some("t"), true),
            (None, None, None, false),
        ];

        for (user, pass, token, ok) in cases {
            let result = JiraClient::new(&credential_config(user, pass, token));
            assert_eq!(result.is_ok(), ok, "user={:?} pass={:?} token={:?}", user, pass, token);
            if !ok {
                assert!(matches!(result.unwrap_err(), ApiError::Configuration(_)));
            }
        }
    }

    #[test]
    fn test_endpoint_url_includes_prefix_and_version() {
        let config = Config {
            endpoint_prefix: "/jira".to_string(),
            api_version: "3".to_string(),
            ..credential_config(Some("u"), Some("p"), None)
        };
        let client = JiraClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint_url("issue/JIWA-1"),
            "https://jira.example.com/jira/rest/api/3/issue/JIWA-1"
        );
    }

    #[tokio::test]
    async fn test_basic_auth_wins_when_token_also_set() {
        let mock_server = MockServer::start().await;
        let config = Config {
            token: Some("pat".to_string()),
            ..test_config(&mock_server.uri())
        };
        let client = JiraClient::new(&config).unwrap();

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-1"))
            .and(basic_auth("test_user", "test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "JIWA-1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let issue = client.get_issue("JIWA-1").await.unwrap();
        assert_eq!(issue.key, "JIWA-1");
    }

    #[tokio::test]
    async fn test_bearer_auth_with_token_only() {
        let mock_server = MockServer::start().await;
        let config = Config {
            username: None,
            password: None,
            token: Some("pat-123".to_string()),
            ..test_config(&mock_server.uri())
        };
        let client = JiraClient::new(&config).unwrap();

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-1"))
            .and(header("Authorization", "Bearer pat-123"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "JIWA-1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        client.get_issue("JIWA-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_status_299_is_success() {
        let (mock_server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-1"))
            .respond_with(ResponseTemplate::new(299).set_body_json(json!({"key": "JIWA-1"})))
            .mount(&mock_server)
            .await;

        assert!(client.get_issue("JIWA-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_status_300_is_api_error_with_body() {
        let (mock_server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-1"))
            .respond_with(ResponseTemplate::new(300).set_body_string("pick one"))
            .mount(&mock_server)
            .await;

        match client.get_issue("JIWA-1").await.unwrap_err() {
            ApiError::Api { status, body } => {
                assert_eq!(status.as_u16(), 300);
                assert_eq!(body, "pick one");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_body_reaches_caller_verbatim() {
        let (mock_server, client) = setup().await;
        let body = r#"{"errorMessages":["Issue Does Not Exist"],"errors":{}}"#;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-404"))
            .respond_with(ResponseTemplate::new(404).set_body_string(body))
            .mount(&mock_server)
            .await;

        let err = client.get_issue("JIWA-404").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.to_string().contains(body));
    }

    #[tokio::test]
    async fn test_create_issue() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue"))
            .and(body_json(json!({
                "fields": {
                    "project": {"key": "JIWA"},
                    "summary": "Fix bug",
                    "description": "",
                    "issuetype": {"name": "Task"}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "10042",
                "key": "JIWA-42",
                "self": format!("{}/rest/api/2/issue/10042", mock_server.uri())
            })))
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
    }

    #[tokio::test]
    async fn test_invalid_response_body() {
        let (mock_server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/project/JIWA"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&mock_server)
            .await;

        assert!(matches!(
            client.get_project("JIWA").await,
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_get_project_lists_issue_types() {
        let (mock_server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/project/JIWA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "100",
                "key": "JIWA",
                "name": "Jiwa",
                "issueTypes": [
                    {"id": "1", "name": "Bug"},
                    {"id": "3", "name": "Task"},
                    {"id": "5", "name": "Sub-task", "subtask": true}
                ]
            })))
            .mount(&mock_server)
            .await;

        let project = client.get_project("JIWA").await.unwrap();
        let names: Vec<_> = project.issue_types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Bug", "Task", "Sub-task"]);
        assert!(project.issue_types[2].subtask);
    }

    #[tokio::test]
    async fn test_search_encodes_jql() {
        let (mock_server, client) = setup().await;
        let jql = r#"project=JIWA AND status="to do""#;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param("jql", jql))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0,
                "maxResults": 50,
                "total": 1,
                "issues": [{"key": "JIWA-1", "fields": {"summary": "First"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client.search(jql).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.issues[0].summary(), "First");

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query().unwrap().contains("status%3D%22to+do%22")
            || requests[0].url.query().unwrap().contains("status%3D%22to%20do%22"));
    }

    #[tokio::test]
    async fn test_search_empty_jql_makes_no_request() {
        let (mock_server, client) = setup().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        assert!(matches!(
            client.search("").await,
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_label_issue_replaces_labels() {
        let (mock_server, client) = setup().await;

        Mock::given(method("PUT"))
            .and(path("/rest/api/2/issue/JIWA-1"))
            .and(body_json(json!({"fields": {"labels": ["backend", "cli"]}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let labels = vec!["backend".to_string(), "cli".to_string()];
        client.label_issue("JIWA-1", &labels).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let sent = body["fields"]["labels"].as_array().unwrap();
        assert!(sent.iter().all(|l| labels.contains(&l.as_str().unwrap().to_string())));
    }

    #[tokio::test]
    async fn test_label_issue_empty_set_makes_no_request() {
        let (mock_server, client) = setup().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        assert!(matches!(
            client.label_issue("JIWA-1", &[]).await,
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_assign_issue() {
        let (mock_server, client) = setup().await;

        Mock::given(method("PUT"))
            .and(path("/rest/api/2/issue/JIWA-1"))
            .and(body_json(json!({"fields": {"assignee": {"name": "bob"}}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        client.assign_issue("JIWA-1", "bob").await.unwrap();
    }

    #[tokio::test]
    async fn test_comment_on_issue() {
        let (mock_server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/JIWA-1/comment"))
            .and(body_json(json!({"body": "on it"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "1", "body": "on it"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        client.comment_on_issue("JIWA-1", "on it").await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_key_makes_no_request() {
        let (mock_server, client) = setup().await;

        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        for key in ["", "jiwa-1", "JIWA", "../admin", "JIWA-1/comment"] {
            assert!(matches!(
                client.get_issue(key).await,
                Err(ApiError::InvalidInput(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_get_then_update_round_trip() {
        let (mock_server, client) = setup().await;
        let description = "Line one\n\n  indented ünïcode\n";

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/JIWA-5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "key": "JIWA-5",
                "fields": {
                    "summary": "  Summary with spaces ",
                    "description": description,
                    "labels": ["b", "a"]
                }
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/rest/api/2/issue/JIWA-5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let issue = client.get_issue("JIWA-5").await.unwrap();
        client
            .update_issue(&issue.key, &FieldUpdates::from_issue(&issue))
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let put: &Request = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
        let refetched: Issue = serde_json::from_value(json!({
            "key": "JIWA-5",
            "fields": sent["fields"].clone()
        }))
        .unwrap();

        assert_eq!(refetched.fields.summary, issue.fields.summary);
        assert_eq!(refetched.fields.description, issue.fields.description);
        assert_eq!(refetched.fields.labels, issue.fields.labels);
    }

    #[tokio::test]
    async fn test_update_with_no_fields_makes_no_request() {
        let (mock_server, client) = setup().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        assert!(matches!(
            client.update_issue("JIWA-1", &FieldUpdates::default()).await,
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_timeout_on_read_is_transport_error() {
        let mock_server = MockServer::start().await;
        let config = Config {
            timeout: Duration::from_millis(100),
            ..test_config(&mock_server.uri())
        };
        let client = JiraClient::new(&config).unwrap();

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"key": "JIWA-1"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        match client.get_issue("JIWA-1").await.unwrap_err() {
            ApiError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_on_mutation_is_ambiguous() {
        let mock_server = MockServer::start().await;
        let config = Config {
            timeout: Duration::from_millis(100),
            ..test_config(&mock_server.uri())
        };
        let client = JiraClient::new(&config).unwrap();

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let err = client.apply_transition("JIWA-1", "21").await.unwrap_err();
        assert!(matches!(err, ApiError::AmbiguousOutcome { .. }));
        assert!(err.to_string().contains("may or may not"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Nothing listens on a port freed by a plain listener.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = JiraClient::new(&test_config(&format!("http://127.0.0.1:{}", port))).unwrap();
        assert!(matches!(
            client.get_issue("JIWA-1").await,
            Err(ApiError::Transport(_))
        ));
    }
}
