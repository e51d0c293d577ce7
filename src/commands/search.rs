//! Listing and searching issues.

use tracing::{instrument, warn};

use super::Context;
use crate::api::SearchResult;
use crate::error::Result;
use crate::output::{format_issue_list, OutputFormat};

/// Assignee value that lists unassigned issues.
const UNASSIGNED: &str = "empty";

/// Arguments of `list`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub user: Option<String>,
    pub status: String,
    pub project: Option<String>,
    pub labels: Vec<String>,
}

/// Build the JQL for `list`.
pub fn build_list_jql(project: &str, status: &str, user: Option<&str>, labels: &[String]) -> String {
    let mut jql = format!("project={} AND status={}", project, quote(status));

    match user {
        None | Some("") => {}
        Some(UNASSIGNED) => jql.push_str(" AND assignee is EMPTY"),
        Some(user) => jql.push_str(&format!(" AND assignee={}", quote(user))),
    }

    if !labels.is_empty() {
        let labels: Vec<String> = labels.iter().map(|l| quote(l)).collect();
        jql.push_str(&format!(" AND labels in ({})", labels.join(",")));
    }

    jql
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// List a project's issues in one status.
#[instrument(skip_all)]
pub async fn list(ctx: &Context, opts: ListOptions, output: OutputFormat) -> Result<String> {
    let project = ctx.project_or_default(opts.project)?;
    let jql = build_list_jql(&project, &opts.status, opts.user.as_deref(), &opts.labels);
    search(ctx, &jql, output).await
}

/// Run a JQL query and format the first page of results.
#[instrument(skip_all)]
pub async fn search(ctx: &Context, jql: &str, output: OutputFormat) -> Result<String> {
    let result = ctx.client.search(jql).await?;
    note_truncation(&result);
    Ok(format_issue_list(&result.issues, &ctx.links, output))
}

fn note_truncation(result: &SearchResult) {
    if result.has_more() {
        warn!(
            shown = result.issues.len(),
            total = result.total,
            "Search returned a partial page"
        );
    }
}
