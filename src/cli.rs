//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Jiwa: a small JIRA client for the command line.
#[derive(Parser, Debug)]
#[command(name = "jiwa")]
#[command(version, about = "A small JIRA client for the command line", long_about = None)]
#[command(after_help = "Commands that act on issues take keys as arguments, or browse URLs piped \
on stdin, one per line. When stdin is piped, leave the issue out of the arguments:\n\n  \
jiwa ls -s 'in progress' | jiwa mv done")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Mirror debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create an issue; the first line of the text is the summary
    Create {
        /// Project key, defaults to `default_project`
        #[arg(short, long)]
        project: Option<String>,

        /// Issue type
        #[arg(short = 't', long = "type", default_value = "Task")]
        issue_type: String,

        /// Label to set, may be repeated
        #[arg(short, long = "label")]
        labels: Vec<String>,

        /// Component name
        #[arg(short, long)]
        component: Option<String>,

        /// Assign the new issue to this user
        #[arg(short, long)]
        assignee: Option<String>,

        /// Read the text from a file, or `-` for stdin
        #[arg(short = 'i', long = "in", value_name = "FILE")]
        input: Option<String>,
    },

    /// Edit the summary and description of an issue
    Edit {
        /// Issue key or URL
        issue: Option<String>,
    },

    /// Print an issue
    Cat {
        /// Issue key or URL
        issue: Option<String>,

        /// Include status, assignee, labels and comments
        #[arg(short, long)]
        details: bool,
    },

    /// List issues of a project by status
    #[command(visible_alias = "ls")]
    List {
        /// Assignee; `empty` lists unassigned issues
        #[arg(short, long)]
        user: Option<String>,

        /// Status to list
        #[arg(short, long, default_value = "to do")]
        status: String,

        /// Project key, defaults to `default_project`
        #[arg(short, long)]
        project: Option<String>,

        /// Only issues with any of these labels
        #[arg(short, long = "label", value_delimiter = ',')]
        labels: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Raw)]
        output: OutputFormat,
    },

    /// Run a JQL query
    Search {
        /// The JQL query, passed as-is
        jql: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Raw)]
        output: OutputFormat,
    },

    /// Move issues to a new status
    #[command(visible_alias = "mv")]
    Move {
        /// Issues followed by the target status; only the status when piping
        #[arg(required = true, num_args = 1.., value_name = "ISSUE... STATUS")]
        args: Vec<String>,
    },

    /// Assign issues to a user
    Reassign {
        /// Issues followed by the username; only the username when piping
        #[arg(required = true, num_args = 1.., value_name = "ISSUE... USER")]
        args: Vec<String>,
    },

    /// Set the labels of issues, replacing the labels they have
    ///
    /// Every existing label is removed unless --add is given.
    Label {
        /// Keep existing labels and add the given ones
        #[arg(long)]
        add: bool,

        /// The issue followed by labels; only labels when piping
        #[arg(required = true, num_args = 1.., value_name = "ISSUE LABEL...")]
        args: Vec<String>,
    },

    /// Comment on issues
    Comment {
        /// Comment text; opens the editor when left out
        #[arg(short, long)]
        message: Option<String>,

        /// Issue keys or URLs
        issues: Vec<String>,
    },

    /// List the issue types of a project
    IssueTypes {
        /// Project key, defaults to `default_project`
        project: Option<String>,
    },
}

impl Commands {
    /// Whether the command takes input from a pipe.
    ///
    /// Stdin is only read for these, so listing commands and `create --in FILE`
    /// never block on it.
    pub fn reads_stdin(&self) -> bool {
        match self {
            Commands::List { .. } | Commands::Search { .. } | Commands::IssueTypes { .. } => false,
            Commands::Create {
                input: Some(path), ..
            } => path == "-",
            _ => true,
        }
    }
}
