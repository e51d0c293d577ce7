//! Jiwa - a small JIRA client for the command line.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use jiwa::cli::Cli;
use jiwa::commands::{self, Context};
use jiwa::config::{self, EnvOverrides};
use jiwa::editor::ExternalEditor;
use jiwa::error::{AppError, Result};
use jiwa::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {}", e);
    }

    match run(cli).await {
        Ok(out) => {
            if !out.is_empty() {
                println!("{}", out);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("{}", action);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let env = EnvOverrides::from_env();
    let config = config::load(cli.config.as_deref(), &env)?;
    let ctx = Context::new(config, ExternalEditor::new())?;

    // Decided once here; commands only see the content.
    let stdin = if cli.command.reads_stdin() && !io::stdin().is_terminal() {
        Some(io::read_to_string(io::stdin())?)
    } else {
        None
    };

    let result = tokio::select! {
        result = commands::run(&ctx, cli.command, stdin) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            Err(AppError::Interrupted)
        }
    };

    if let Err(AppError::Batch(e)) = &result {
        if !e.processed.is_empty() {
            println!("{}", ctx.urls(&e.processed));
        }
    }

    result
}
