//! Single-issue commands.

use std::fs;

use tracing::{info, instrument};

use super::{piped, single_issue, Context};
use crate::api::{ApiError, CreateIssueInput, FieldUpdates};
use crate::editor::{join_summary_description, split_summary_description};
use crate::error::{AppError, Result};
use crate::output::{format_issue_detail, format_issue_text, format_issue_types};

/// Arguments of `create`.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub project: Option<String>,
    pub issue_type: String,
    pub labels: Vec<String>,
    pub component: Option<String>,
    pub assignee: Option<String>,
    /// A file path, or `-` for stdin.
    pub input: Option<String>,
}

/// Create an issue and return its browse URL.
///
/// The text comes from `--in`, piped stdin or the editor, in that order.
#[instrument(skip_all)]
pub async fn create(ctx: &Context, opts: CreateOptions, stdin: Option<String>) -> Result<String> {
    let project = ctx.project_or_default(opts.project)?;

    let text = match (opts.input.as_deref(), piped(stdin)) {
        (Some("-"), Some(content)) => content,
        (Some("-"), None) => {
            return Err(AppError::usage("--in - needs the issue text piped on stdin"))
        }
        (Some(path), _) => fs::read_to_string(path)?,
        (None, Some(content)) => content,
        (None, None) => ctx.editor.edit("new", "")?,
    };
    let (summary, description) = split_summary_description(&text);

    let created = ctx
        .client
        .create_issue(CreateIssueInput {
            project,
            summary,
            description,
            issue_type: opts.issue_type,
            labels: opts.labels,
            component: opts.component,
            assignee: opts.assignee,
        })
        .await?;

    Ok(ctx.links.url_for(&created.key))
}

/// Edit an issue's summary and description in the editor.
#[instrument(skip_all)]
pub async fn edit(ctx: &Context, issue: Option<String>, stdin: Option<String>) -> Result<String> {
    let key = single_issue(ctx, issue, piped(stdin), "jiwa edit <issue>")?;
    let current = ctx.client.get_issue(&key).await?;

    let text = ctx.editor.edit(
        &key,
        &join_summary_description(current.summary(), current.description()),
    )?;
    let (summary, description) = split_summary_description(&text);
    if summary.trim().is_empty() {
        return Err(ApiError::InvalidInput("the summary cannot be empty".to_string()).into());
    }

    if summary == current.summary() && description == current.description() {
        info!(issue_key = %key, "Issue unchanged, not updating");
    } else {
        let updates = FieldUpdates {
            summary: Some(summary),
            description: Some(description),
            ..Default::default()
        };
        ctx.client.update_issue(&key, &updates).await?;
    }

    Ok(ctx.links.url_for(&key))
}

/// Print an issue.
#[instrument(skip_all)]
pub async fn cat(
    ctx: &Context,
    issue: Option<String>,
    details: bool,
    stdin: Option<String>,
) -> Result<String> {
    let key = single_issue(ctx, issue, piped(stdin), "jiwa cat <issue>")?;
    let issue = ctx.client.get_issue(&key).await?;

    if details {
        Ok(format_issue_detail(&issue, &ctx.links))
    } else {
        Ok(format_issue_text(&issue))
    }
}

/// List the issue types a project supports.
#[instrument(skip_all)]
pub async fn issue_types(ctx: &Context, project: Option<String>) -> Result<String> {
    let project = ctx.project_or_default(project)?;
    let project = ctx.client.get_project(&project).await?;
    Ok(format_issue_types(&project))
}
