//! Subcommand implementations

mod context;

use crate::GlobalArgs;
use anstream::{eprintln, println};
use anyhow::{Context, Result, bail};
use context::CommandContext;
use merge_pilot::config::Settings;
use merge_pilot::error::Error;
use merge_pilot::events::{EventKind, Outcome, dispatch, route, synthesize_event};
use merge_pilot::platform::parse_target_url;
use owo_colors::OwoColorize;
use std::path::Path;

fn settings(global: &GlobalArgs, repository: &str) -> Result<Settings> {
    Ok(Settings::new(
        repository,
        &global.reviewers,
        global.project_column,
        global.merge_method,
    )?)
}

/// Handle one event delivered by kind + payload file
pub async fn run_event(global: &GlobalArgs, kind: &str, payload: Option<&Path>) -> Result<Outcome> {
    // Reject unknown kinds before touching credentials or the network
    let event_kind = EventKind::parse(kind)?;

    let repository = global
        .repository
        .as_deref()
        .context("no repository given (use --repository or GITHUB_REPOSITORY)")?;
    let settings = settings(global, repository)?;
    if event_kind == EventKind::Schedule && settings.project_column.is_none() {
        return Err(Error::MissingProjectColumn.into());
    }

    let payload = match payload {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read event payload {}", path.display()))?,
        None if event_kind == EventKind::Schedule => Vec::new(),
        None => bail!("{kind} events need a payload (use --payload or GITHUB_EVENT_PATH)"),
    };

    let ctx = CommandContext::new(settings, global.host.clone()).await?;
    Ok(dispatch(&ctx.reconcile(), kind, &payload).await?)
}

/// Handle a PR or branch URL as if its event had fired
pub async fn run_url(global: &GlobalArgs, url: &str) -> Result<Outcome> {
    let target = parse_target_url(url)?;
    let settings = settings(global, &target.repo().to_string())?;

    // The URL decides the host; anything but github.com is treated as Enterprise
    let host = (target.host() != "github.com").then(|| target.host().to_string());
    let ctx = CommandContext::new(settings, host).await?;

    let event = synthesize_event(&ctx.platform, &target).await?;
    Ok(route(&ctx.reconcile(), event).await?)
}

/// Print the outcome summary to stdout
pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Ignored(_) => println!("{} {outcome}", "-".dimmed()),
        Outcome::Reconciled { .. } => println!("{} {outcome}", "✓".green()),
        Outcome::Batch(batch) => {
            if batch.is_success() {
                println!("{} {outcome}", "✓".green());
            } else {
                println!("{} {outcome}", "!".yellow());
                for failure in &batch.failures {
                    println!("  {} PR #{}: {}", "✗".red(), failure.pr_number, failure.message);
                }
            }
        }
    }
}

/// Print a fatal error to stderr
pub fn print_error(error: &anyhow::Error) {
    eprintln!("{} {error:#}", "error:".red().bold());
}
