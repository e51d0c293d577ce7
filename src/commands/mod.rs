//! Command implementations.
//!
//! Each command takes the shared [`Context`], its parsed arguments and, when
//! stdin was piped, the piped content. Commands return the text to print on
//! success; printing and exit codes are left to the binary.
//!
//! - `issue`: create, edit, cat and issue types
//! - `search`: list and search
//! - `bulk`: move, reassign, label and comment over many issues

mod bulk;
mod issue;
mod search;

pub use bulk::{comment, label, move_issues, reassign};
pub use issue::{cat, create, edit, issue_types, CreateOptions};
pub use search::{build_list_jql, list, search, ListOptions};

use tracing::debug;

use crate::api::JiraClient;
use crate::cli::Commands;
use crate::config::Config;
use crate::editor::ExternalEditor;
use crate::error::{AppError, Result};
use crate::input::InputSource;
use crate::keys::IssueLinks;

/// Everything a command needs besides its arguments.
pub struct Context {
    pub client: JiraClient,
    pub config: Config,
    pub links: IssueLinks,
    pub editor: ExternalEditor,
}

impl Context {
    /// Build the client and link helper for a resolved configuration.
    pub fn new(config: Config, editor: ExternalEditor) -> Result<Self> {
        let client = JiraClient::new(&config)?;
        let links = IssueLinks::new(&config);
        Ok(Self {
            client,
            config,
            links,
            editor,
        })
    }

    /// One browse URL per key, newline separated.
    pub fn urls(&self, keys: &[String]) -> String {
        keys.iter()
            .map(|key| self.links.url_for(key))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The given project, or the configured default.
    fn project_or_default(&self, project: Option<String>) -> Result<String> {
        project
            .filter(|p| !p.is_empty())
            .or_else(|| self.config.default_project.clone())
            .ok_or_else(|| {
                AppError::usage("no project given and no default_project configured")
            })
    }
}

/// Run a parsed command.
pub async fn run(ctx: &Context, command: Commands, stdin: Option<String>) -> Result<String> {
    debug!(?command, piped = stdin.is_some(), "Running command");

    match command {
        Commands::Create {
            project,
            issue_type,
            labels,
            component,
            assignee,
            input,
        } => {
            let opts = CreateOptions {
                project,
                issue_type,
                labels,
                component,
                assignee,
                input,
            };
            create(ctx, opts, stdin).await
        }
        Commands::Edit { issue } => edit(ctx, issue, stdin).await,
        Commands::Cat { issue, details } => cat(ctx, issue, details, stdin).await,
        Commands::List {
            user,
            status,
            project,
            labels,
            output,
        } => {
            let opts = ListOptions {
                user,
                status,
                project,
                labels,
            };
            list(ctx, opts, output).await
        }
        Commands::Search { jql, output } => search(ctx, &jql, output).await,
        Commands::Move { args } => move_issues(ctx, args, stdin).await,
        Commands::Reassign { args } => reassign(ctx, args, stdin).await,
        Commands::Label { add, args } => label(ctx, args, add, stdin).await,
        Commands::Comment { message, issues } => comment(ctx, issues, message, stdin).await,
        Commands::IssueTypes { project } => issue_types(ctx, project).await,
    }
}

/// Piped input with nothing but whitespace counts as no piped input.
///
/// Cron jobs and CI runners hand over an empty stdin that is not a terminal.
fn piped(stdin: Option<String>) -> Option<String> {
    stdin.filter(|content| !content.trim().is_empty())
}

/// Split `[ISSUE...] VALUE` arguments.
///
/// With piped input the arguments hold only the value; otherwise the last
/// argument is the value and everything before it names issues.
fn split_trailing(
    mut args: Vec<String>,
    stdin: Option<String>,
    usage: &str,
) -> Result<(InputSource, String)> {
    match stdin {
        Some(content) => match args.len() {
            1 => Ok((InputSource::Stdin(content), args.remove(0))),
            _ => Err(AppError::usage(usage)),
        },
        None => match args.pop() {
            Some(value) if !args.is_empty() => Ok((InputSource::Arguments(args), value)),
            _ => Err(AppError::usage(usage)),
        },
    }
}

/// Issue references for commands that take them as plain arguments.
fn issue_source(args: Vec<String>, stdin: Option<String>, usage: &str) -> Result<InputSource> {
    match stdin {
        Some(_) if !args.is_empty() => Err(AppError::usage(usage)),
        Some(content) => Ok(InputSource::Stdin(content)),
        None => Ok(InputSource::Arguments(args)),
    }
}

/// Resolve exactly one issue key from an argument or piped input.
fn single_issue(
    ctx: &Context,
    issue: Option<String>,
    stdin: Option<String>,
    usage: &str,
) -> Result<String> {
    let source = issue_source(issue.into_iter().collect(), stdin, usage)?;
    let mut keys = source.resolve(&ctx.links)?;
    if keys.len() != 1 {
        return Err(AppError::usage(usage));
    }
    Ok(keys.remove(0))
}
