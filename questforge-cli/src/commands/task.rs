//! Drive a task through its review cycle from a JSON file.
//!
//! The file holds a task as the backend returns it. Each action runs the same
//! guards the admin client runs, rewrites the file with the new state and
//! prints the request the client would send.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use questforge_core::cache::Mutation;
use questforge_core::workflow::{ReviewVerdict, TaskActionKind, assignee_dialog, reviewer_dialog};
use questforge_core::{SessionContext, Task, WorkflowError};
use tracing::debug;

use super::session::open_store;
use crate::config::QuestforgeConfig;

#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List the actions the signed-in user may take
    Actions { file: PathBuf },
    /// Start work on an assigned task
    Start { file: PathBuf },
    /// Submit work for review
    Submit {
        file: PathBuf,
        #[arg(long)]
        notes: String,
    },
    /// Pick up the latest submission for review
    StartReview { file: PathBuf },
    /// Approve or reject the submission under review
    Review {
        file: PathBuf,
        #[arg(long)]
        verdict: Verdict,
        #[arg(long)]
        feedback: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verdict {
    Approved,
    Rejected,
}

impl From<Verdict> for ReviewVerdict {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Approved => ReviewVerdict::Approved,
            Verdict::Rejected => ReviewVerdict::Rejected,
        }
    }
}

pub async fn run(args: TaskArgs, config: &QuestforgeConfig) -> Result<()> {
    let session = open_store(config).await?.get().await;

    match args.command {
        TaskCommands::Actions { file } => {
            let task = read_task(&file).await?;
            print_actions(&task, &session);
            Ok(())
        }
        TaskCommands::Start { file } => {
            apply(&file, config, TaskActionKind::Start, |task| task.start(&session)).await
        }
        TaskCommands::Submit { file, notes } => {
            apply(&file, config, TaskActionKind::Submit, |task| {
                task.submit(&session, &notes).map(|_| ())
            })
            .await
        }
        TaskCommands::StartReview { file } => {
            apply(&file, config, TaskActionKind::StartReview, |task| {
                task.start_review(&session)
            })
            .await
        }
        TaskCommands::Review {
            file,
            verdict,
            feedback,
        } => {
            apply(&file, config, TaskActionKind::SubmitReview, |task| {
                task.submit_review(&session, verdict.into(), &feedback).map(|_| ())
            })
            .await
        }
    }
}

async fn apply<F>(
    file: &Path,
    config: &QuestforgeConfig,
    kind: TaskActionKind,
    action: F,
) -> Result<()>
where
    F: FnOnce(&mut Task) -> Result<(), WorkflowError>,
{
    let mut task = read_task(file).await?;
    action(&mut task).with_context(|| format!("cannot {} task {}", kind, task.id))?;

    let endpoint = kind.endpoint(task.id, task.latest_review().map(|review| review.id))?;
    write_task(file, &task).await?;

    println!("Task {} is now {}", task.id, task.status.label());
    println!("Request:    {} {}", endpoint.method(), endpoint.url(&config.api.base_url));
    let keys: Vec<String> = Mutation::Task(kind, task.id)
        .invalidates()
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Invalidate: {}", keys.join(", "));
    Ok(())
}

fn print_actions(task: &Task, session: &SessionContext) {
    println!("Task {}: {} ({})", task.id, task.title, task.status.label());
    let actions = task.legal_actions(session);
    if actions.is_empty() {
        println!("No actions available");
    }
    for action in actions {
        println!("  {}", action);
    }
    debug!(
        assignee = ?assignee_dialog(task, session),
        reviewer = ?reviewer_dialog(task, session),
        "dialogs"
    );
}

async fn read_task(path: &Path) -> Result<Task> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid task in {}", path.display()))
}

async fn write_task(path: &Path, task: &Task) -> Result<()> {
    let contents = serde_json::to_string_pretty(task)?;
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
