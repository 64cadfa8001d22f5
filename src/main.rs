//! merge-pilot command line entry point

mod cli;

use clap::{Args, Parser, Subcommand};
use merge_pilot::logging::init_tracing;
use merge_pilot::types::MergeMethod;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// Keep pull requests up to date and merge them in reaction to repository events
#[derive(Debug, Parser)]
#[command(name = "merge-pilot", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Repository as owner/repo
    #[arg(long, global = true, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Logins whose approval makes a PR mergeable (comma separated)
    #[arg(long, global = true, env = "MERGE_REVIEWERS", value_delimiter = ',')]
    pub reviewers: Vec<String>,

    /// Project board column watched by scheduled runs
    #[arg(long, global = true, env = "MERGE_PROJECT_COLUMN")]
    pub project_column: Option<u64>,

    /// Merge method
    #[arg(long, global = true, env = "MERGE_METHOD", value_enum, default_value_t = MergeMethod::Merge)]
    pub merge_method: MergeMethod,

    /// GitHub Enterprise host (defaults to github.com)
    #[arg(long, global = true, env = "GITHUB_HOST")]
    pub host: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Handle one repository event
    Event {
        /// Event kind, e.g. push, status, pull_request
        #[arg(long, env = "GITHUB_EVENT_NAME")]
        kind: String,

        /// Path to the JSON event payload
        #[arg(long, env = "GITHUB_EVENT_PATH")]
        payload: Option<PathBuf>,
    },
    /// Run against a pull request or branch URL, as if its event had fired
    Run {
        /// https://<host>/<owner>/<repo>/pull/<number> or .../tree/<branch>
        url: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.global.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    init_tracing(cli.global.log_json, level);

    let result = match cli.command {
        Command::Event { kind, payload } => {
            cli::run_event(&cli.global, &kind, payload.as_deref()).await
        }
        Command::Run { url } => cli::run_url(&cli.global, &url).await,
    };

    match result {
        Ok(outcome) => {
            cli::print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            cli::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
