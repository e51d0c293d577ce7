//! Output formatting for command results.
//!
//! Raw output prints one browse URL per line so it can be piped into another
//! command. Table output is for people.

use clap::ValueEnum;
use tabled::{builder::Builder, settings::Style};

use crate::api::{Issue, Project};
use crate::editor::join_summary_description;
use crate::keys::IssueLinks;

/// How issue lists are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One browse URL per line.
    #[default]
    Raw,
    /// Key, summary, status and URL in a table.
    Table,
}

/// Format a list of issues.
pub fn format_issue_list(issues: &[Issue], links: &IssueLinks, format: OutputFormat) -> String {
    match format {
        OutputFormat::Raw => issues
            .iter()
            .map(|issue| links.url_for(&issue.key))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Summary", "Status", "URL"]);

            for issue in issues {
                builder.push_record([
                    issue.key.clone(),
                    issue.summary().to_string(),
                    issue.status().unwrap_or("-").to_string(),
                    links.url_for(&issue.key),
                ]);
            }

            let mut table = builder.build();
            table.with(Style::blank());
            table.to_string()
        }
    }
}

/// Format an issue as its summary line followed by the description.
///
/// This is the same layout the editor uses, so the output can be saved,
/// changed and fed back.
pub fn format_issue_text(issue: &Issue) -> String {
    join_summary_description(issue.summary(), issue.description())
}

/// Format an issue with its metadata and comments.
pub fn format_issue_detail(issue: &Issue, links: &IssueLinks) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: {}\n", issue.key, issue.summary()));
    out.push_str(&format!("URL:      {}\n", links.url_for(&issue.key)));
    if let Some(issue_type) = issue.issue_type() {
        out.push_str(&format!("Type:     {}\n", issue_type));
    }
    out.push_str(&format!("Status:   {}\n", issue.status().unwrap_or("-")));
    out.push_str(&format!("Assignee: {}\n", issue.assignee_name()));
    if !issue.fields.labels.is_empty() {
        out.push_str(&format!("Labels:   {}\n", issue.fields.labels.join(", ")));
    }

    if !issue.description().is_empty() {
        out.push('\n');
        out.push_str(issue.description().trim_end());
        out.push('\n');
    }

    for comment in issue.comments() {
        let author = comment.author.as_ref().map(|a| a.label()).unwrap_or("unknown");
        out.push_str(&format!("\n--- {} ({})\n", author, comment.created));
        out.push_str(comment.body.trim_end());
        out.push('\n');
    }

    out
}

/// Format the issue types of a project, one name per line.
pub fn format_issue_types(project: &Project) -> String {
    project
        .issue_types
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
