//! Commands applied to every issue of an input, one at a time.
//!
//! All of them stop at the first failing issue. The issues handled before it
//! are reported through [`BatchError`](crate::batch::BatchError).

use tracing::{debug, instrument};

use super::{issue_source, piped, split_trailing, Context};
use crate::api::ApiError;
use crate::batch::for_each_issue;
use crate::error::{AppError, Result};
use crate::input::InputSource;

/// Transition issues to the status named by the last argument.
#[instrument(skip_all)]
pub async fn move_issues(ctx: &Context, args: Vec<String>, stdin: Option<String>) -> Result<String> {
    let stdin = piped(stdin);
    let usage = if stdin.is_some() {
        "jiwa mv <status>"
    } else {
        "jiwa mv <issue>... <status>"
    };
    let (source, status) = split_trailing(args, stdin, usage)?;
    let keys = source.resolve(&ctx.links)?;

    let client = &ctx.client;
    let status = status.as_str();
    let done = for_each_issue(&keys, move |key| async move {
        let applied = client.transition_issue(&key, status).await?;
        debug!(issue_key = %key, transition = %applied.name, "Moved issue");
        Ok::<(), ApiError>(())
    })
    .await?;

    Ok(ctx.urls(&done))
}

/// Assign issues to the user named by the last argument.
#[instrument(skip_all)]
pub async fn reassign(ctx: &Context, args: Vec<String>, stdin: Option<String>) -> Result<String> {
    let stdin = piped(stdin);
    let usage = if stdin.is_some() {
        "jiwa reassign <user>"
    } else {
        "jiwa reassign <issue>... <user>"
    };
    let (source, user) = split_trailing(args, stdin, usage)?;
    let keys = source.resolve(&ctx.links)?;

    let client = &ctx.client;
    let user = user.as_str();
    let done = for_each_issue(&keys, move |key| async move {
        client.assign_issue(&key, user).await
    })
    .await?;

    Ok(ctx.urls(&done))
}

/// Set labels on issues.
///
/// Labels replace the issue's current set. With `add`, each issue's current
/// labels are read first and kept.
#[instrument(skip_all)]
pub async fn label(
    ctx: &Context,
    mut args: Vec<String>,
    add: bool,
    stdin: Option<String>,
) -> Result<String> {
    let (source, labels) = match piped(stdin) {
        Some(content) => (InputSource::Stdin(content), args),
        None if args.len() >= 2 => {
            let labels = args.split_off(1);
            (InputSource::Arguments(args), labels)
        }
        None => return Err(AppError::usage("jiwa label <issue> <label>...")),
    };
    if labels.is_empty() {
        return Err(AppError::usage("jiwa label <label>..."));
    }
    let keys = source.resolve(&ctx.links)?;

    let client = &ctx.client;
    let labels = labels.as_slice();
    let done = for_each_issue(&keys, move |key| async move {
        if add {
            let current = client.get_issue(&key).await?;
            let merged = merge_labels(&current.fields.labels, labels);
            client.label_issue(&key, &merged).await
        } else {
            client.label_issue(&key, labels).await
        }
    })
    .await?;

    Ok(ctx.urls(&done))
}

/// Existing labels followed by new ones, without duplicates.
fn merge_labels(current: &[String], new: &[String]) -> Vec<String> {
    let mut merged = current.to_vec();
    for label in new {
        if !merged.contains(label) {
            merged.push(label.clone());
        }
    }
    merged
}

/// Comment on issues.
///
/// Without a message the editor collects one, which needs a terminal on
/// stdin, so piped issues require `-m`.
#[instrument(skip_all)]
pub async fn comment(
    ctx: &Context,
    issues: Vec<String>,
    message: Option<String>,
    stdin: Option<String>,
) -> Result<String> {
    let stdin = piped(stdin);
    if message.is_none() && stdin.is_some() {
        return Err(AppError::usage(
            "jiwa comment -m <text>, the editor is not available with piped issues",
        ));
    }
    let source = issue_source(issues, stdin, "jiwa comment [-m <text>] <issue>...")?;
    let keys = source.resolve(&ctx.links)?;

    let message = match message {
        Some(message) => message,
        None => ctx.editor.edit("comment", "")?,
    };

    let client = &ctx.client;
    let message = message.as_str();
    let done = for_each_issue(&keys, move |key| async move {
        client.comment_on_issue(&key, message).await
    })
    .await?;

    Ok(ctx.urls(&done))
}
