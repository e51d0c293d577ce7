//! JIRA API request and response types.
//!
//! These types model the JIRA REST API v2 payloads for issues, projects,
//! comments, transitions and search results. Field names follow the upstream
//! schema verbatim (`fields.summary`, `fields.issuetype.name`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

fn default_true() -> bool {
    true
}

/// Search result from a JQL query.
///
/// Returned by `GET /rest/api/2/search`. Only the page the server chose to
/// return is surfaced; callers page explicitly if they need more.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The index of the first result.
    #[serde(default)]
    pub start_at: u32,
    /// Maximum results requested.
    #[serde(default)]
    pub max_results: u32,
    /// Total number of matching issues.
    #[serde(default)]
    pub total: u32,
    /// The list of issues.
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl SearchResult {
    /// Check if there are more pages of results.
    pub fn has_more(&self) -> bool {
        u64::from(self.start_at) + (self.issues.len() as u64) < u64::from(self.total)
    }
}

/// A JIRA issue.
///
/// Returned by `GET /rest/api/2/issue/{issueKey}` or as part of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Issue {
    /// The issue ID.
    #[serde(default)]
    pub id: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// REST URL of the issue.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// The issue fields.
    #[serde(default)]
    pub fields: IssueFields,
}

impl Issue {
    /// Get the issue summary.
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    /// Get the description, empty if unset.
    pub fn description(&self) -> &str {
        self.fields.description.as_deref().unwrap_or_default()
    }

    /// Get the issue status name, if the server returned it.
    pub fn status(&self) -> Option<&str> {
        self.fields.status.as_ref().map(|s| s.name.as_str())
    }

    /// Get the issue type name, if the server returned it.
    pub fn issue_type(&self) -> Option<&str> {
        self.fields.issuetype.as_ref().map(|t| t.name.as_str())
    }

    /// Get the assignee display name, or "Unassigned".
    pub fn assignee_name(&self) -> &str {
        self.fields
            .assignee
            .as_ref()
            .map(|u| u.label())
            .unwrap_or("Unassigned")
    }

    /// Get the project key, if the server returned it.
    pub fn project_key(&self) -> Option<&str> {
        self.fields.project.as_ref().map(|p| p.key.as_str())
    }

    /// Comments attached to the issue, oldest first.
    pub fn comments(&self) -> &[Comment] {
        self.fields
            .comment
            .as_ref()
            .map(|c| c.comments.as_slice())
            .unwrap_or_default()
    }
}

/// Issue fields consumed by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFields {
    /// The issue summary (title).
    #[serde(default)]
    pub summary: String,
    /// The issue description as plain text (API v2).
    #[serde(default)]
    pub description: Option<String>,
    /// The project the issue belongs to.
    #[serde(default)]
    pub project: Option<Project>,
    /// The issue type.
    #[serde(default)]
    pub issuetype: Option<IssueType>,
    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<String>,
    /// The assigned user, if any.
    #[serde(default)]
    pub assignee: Option<User>,
    /// The reporting user.
    #[serde(default)]
    pub reporter: Option<User>,
    /// The current workflow status.
    #[serde(default)]
    pub status: Option<Status>,
    /// Components the issue is filed under.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Embedded comment page.
    #[serde(default)]
    pub comment: Option<CommentPage>,
    /// Creation timestamp.
    #[serde(default)]
    pub created: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated: Option<String>,
}

/// A workflow status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

/// An issue type such as "Task" or "Bug".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueType {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subtask: bool,
}

/// A JIRA user.
///
/// Server deployments identify users by `name`, cloud by `accountId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl User {
    /// The most human-readable identifier available.
    pub fn label(&self) -> &str {
        if !self.display_name.is_empty() {
            &self.display_name
        } else {
            self.name.as_deref().unwrap_or("unknown")
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A JIRA project.
///
/// Returned by `GET /rest/api/2/project/{projectKey}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
    /// Issue types that can be created in this project.
    #[serde(default)]
    pub issue_types: Vec<IssueType>,
}

/// A project component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

/// A comment on a JIRA issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub author: Option<User>,
    /// Comment text (plain text in API v2).
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

/// The comment page embedded in `fields.comment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// One edge out of an issue's current workflow state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    /// The status the transition leads to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Status>,
}

/// Returned by `GET /rest/api/2/issue/{issueKey}/transitions`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// Body of `POST /rest/api/2/issue/{issueKey}/transitions`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TransitionRequest {
    pub transition: TransitionId,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TransitionId {
    pub id: String,
}

/// Reference to an entity by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    pub name: String,
}

impl NameRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Reference to an entity by `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRef {
    pub key: String,
}

/// Input for creating an issue.
#[derive(Debug, Clone, Default)]
pub struct CreateIssueInput {
    pub project: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
    pub labels: Vec<String>,
    pub component: Option<String>,
    pub assignee: Option<String>,
}

impl CreateIssueInput {
    pub(crate) fn into_request(self) -> CreateIssueRequest {
        CreateIssueRequest {
            fields: NewIssueFields {
                project: KeyRef { key: self.project },
                summary: self.summary,
                description: self.description,
                issuetype: NameRef::new(self.issue_type),
                labels: self.labels,
                components: self.component.into_iter().map(NameRef::new).collect(),
                assignee: self.assignee.map(NameRef::new),
            },
        }
    }
}

/// Body of `POST /rest/api/2/issue`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateIssueRequest {
    pub fields: NewIssueFields,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewIssueFields {
    pub project: KeyRef,
    pub summary: String,
    pub description: String,
    pub issuetype: NameRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<NameRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<NameRef>,
}

/// Response of `POST /rest/api/2/issue`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    #[serde(default)]
    pub id: String,
    /// Key assigned by the server.
    pub key: String,
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

/// Partial issue fields for `PUT /rest/api/2/issue/{issueKey}`.
///
/// Unset fields are omitted from the body and left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replaces the whole label set when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<NameRef>,
}

impl FieldUpdates {
    /// Carry an issue's editable text fields over unchanged.
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            summary: Some(issue.fields.summary.clone()),
            description: issue.fields.description.clone(),
            labels: Some(issue.fields.labels.clone()),
            assignee: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body of `PUT /rest/api/2/issue/{issueKey}`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct IssueUpdateRequest<'a> {
    pub fields: &'a FieldUpdates,
}

/// Body of `POST /rest/api/2/issue/{issueKey}/comment`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CommentRequest<'a> {
    pub body: &'a str,
}
