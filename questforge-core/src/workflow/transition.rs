//! Task review transition table
//!
//! `(state, action) → next state` for the whole submit/review lifecycle,
//! kept in one match so every legal move is visible in one place.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::status::ProgressStatus;

/// Reviewer's decision on a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    Approved,
    Rejected,
}

impl ReviewVerdict {
    pub fn status(&self) -> ProgressStatus {
        match self {
            Self::Approved => ProgressStatus::Approved,
            Self::Rejected => ProgressStatus::Rejected,
        }
    }
}

/// A user action on a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    Start,
    Submit,
    StartReview,
    SubmitReview(ReviewVerdict),
}

impl TaskAction {
    pub fn kind(&self) -> TaskActionKind {
        match self {
            Self::Start => TaskActionKind::Start,
            Self::Submit => TaskActionKind::Submit,
            Self::StartReview => TaskActionKind::StartReview,
            Self::SubmitReview(_) => TaskActionKind::SubmitReview,
        }
    }
}

/// [`TaskAction`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskActionKind {
    Start,
    Submit,
    StartReview,
    SubmitReview,
}

impl TaskActionKind {
    pub const ALL: [TaskActionKind; 4] = [
        TaskActionKind::Start,
        TaskActionKind::Submit,
        TaskActionKind::StartReview,
        TaskActionKind::SubmitReview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Submit => "submit",
            Self::StartReview => "start_review",
            Self::SubmitReview => "submit_review",
        }
    }

    /// Whether the action belongs to the assignee (vs. the assigning user)
    pub fn is_assignee_action(&self) -> bool {
        matches!(self, Self::Start | Self::Submit)
    }

    /// Representative action for precondition checks. Both verdicts share one.
    pub(crate) fn sample_action(&self) -> TaskAction {
        match self {
            Self::Start => TaskAction::Start,
            Self::Submit => TaskAction::Submit,
            Self::StartReview => TaskAction::StartReview,
            Self::SubmitReview => TaskAction::SubmitReview(ReviewVerdict::Approved),
        }
    }
}

impl fmt::Display for TaskActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status paired with the status of its newest review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkflowState {
    pub task_status: ProgressStatus,
    pub latest_review: Option<ProgressStatus>,
}

impl WorkflowState {
    pub fn new(task_status: ProgressStatus, latest_review: Option<ProgressStatus>) -> Self {
        Self {
            task_status,
            latest_review,
        }
    }
}

/// Apply `action` to `state`
pub fn transition(state: WorkflowState, action: TaskAction) -> Result<WorkflowState, WorkflowError> {
    use ProgressStatus::*;

    let next = match (action, state.task_status, state.latest_review) {
        (TaskAction::Start, NotStarted | Assigned, review) => WorkflowState::new(InProgress, review),
        (TaskAction::Submit, InProgress, None | Some(Rejected)) => {
            WorkflowState::new(AwaitingReview, Some(AwaitingReview))
        }
        (TaskAction::StartReview, AwaitingReview, Some(AwaitingReview)) => {
            WorkflowState::new(UnderReview, Some(UnderReview))
        }
        (TaskAction::SubmitReview(ReviewVerdict::Approved), UnderReview, Some(UnderReview)) => {
            WorkflowState::new(Completed, Some(Approved))
        }
        (TaskAction::SubmitReview(ReviewVerdict::Rejected), UnderReview, Some(UnderReview)) => {
            WorkflowState::new(InProgress, Some(Rejected))
        }
        _ => {
            return Err(WorkflowError::ActionNotAllowed {
                action: action.kind(),
                task_status: state.task_status,
                review_status: state.latest_review,
            });
        }
    };

    Ok(next)
}

/// Actions whose state precondition holds, ignoring who is acting
pub fn available_actions(state: WorkflowState) -> Vec<TaskActionKind> {
    TaskActionKind::ALL
        .into_iter()
        .filter(|kind| transition(state, kind.sample_action()).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProgressStatus::*;

    fn state(task: ProgressStatus, review: Option<ProgressStatus>) -> WorkflowState {
        WorkflowState::new(task, review)
    }

    #[test]
    fn test_not_started_only_allows_start() {
        assert_eq!(
            available_actions(state(NotStarted, None)),
            vec![TaskActionKind::Start]
        );
        assert_eq!(
            transition(state(NotStarted, None), TaskAction::Start),
            Ok(state(InProgress, None))
        );
    }

    #[test]
    fn test_in_progress_without_review_only_allows_submit() {
        assert_eq!(
            available_actions(state(InProgress, None)),
            vec![TaskActionKind::Submit]
        );
        assert_eq!(
            transition(state(InProgress, None), TaskAction::Submit),
            Ok(state(AwaitingReview, Some(AwaitingReview)))
        );
    }

    #[test]
    fn test_awaiting_review_only_allows_start_review() {
        assert_eq!(
            available_actions(state(AwaitingReview, Some(AwaitingReview))),
            vec![TaskActionKind::StartReview]
        );
    }

    #[test]
    fn test_under_review_only_allows_submit_review() {
        assert_eq!(
            available_actions(state(UnderReview, Some(UnderReview))),
            vec![TaskActionKind::SubmitReview]
        );
    }

    #[test]
    fn test_approval_completes_task() {
        let next = transition(
            state(UnderReview, Some(UnderReview)),
            TaskAction::SubmitReview(ReviewVerdict::Approved),
        )
        .unwrap();
        assert_eq!(next, state(Completed, Some(Approved)));
    }

    #[test]
    fn test_rejection_reopens_task_for_resubmission() {
        let rejected = transition(
            state(UnderReview, Some(UnderReview)),
            TaskAction::SubmitReview(ReviewVerdict::Rejected),
        )
        .unwrap();
        assert_ne!(rejected.task_status, Completed);
        assert_eq!(rejected, state(InProgress, Some(Rejected)));

        let resubmitted = transition(rejected, TaskAction::Submit).unwrap();
        assert_eq!(resubmitted, state(AwaitingReview, Some(AwaitingReview)));
    }

    #[test]
    fn test_cannot_resubmit_while_review_pending() {
        for pending in [AwaitingReview, UnderReview, Approved] {
            assert!(transition(state(InProgress, Some(pending)), TaskAction::Submit).is_err());
        }
    }

    #[test]
    fn test_terminal_tasks_offer_nothing() {
        assert!(available_actions(state(Completed, Some(Approved))).is_empty());
        assert!(available_actions(state(Cancelled, None)).is_empty());
        assert!(available_actions(state(OnHold, None)).is_empty());
    }

    #[test]
    fn test_halted_tasks_ignore_pending_reviews() {
        for task_status in [Cancelled, OnHold, Completed] {
            for review in [AwaitingReview, UnderReview] {
                let halted = state(task_status, Some(review));
                assert!(available_actions(halted).is_empty(), "{task_status} offered an action");
                for kind in TaskActionKind::ALL {
                    assert!(transition(halted, kind.sample_action()).is_err());
                }
            }
        }
    }

    #[test]
    fn test_illegal_action_reports_state() {
        let err = transition(state(NotStarted, None), TaskAction::StartReview).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::ActionNotAllowed {
                action: TaskActionKind::StartReview,
                task_status: NotStarted,
                review_status: None,
            }
        );
    }

    #[test]
    fn test_assigned_counts_as_not_started() {
        assert_eq!(
            available_actions(state(Assigned, None)),
            vec![TaskActionKind::Start]
        );
    }

    #[test]
    fn test_every_table_result_stays_in_view() {
        use crate::status::StatusView;

        let reviews: Vec<Option<ProgressStatus>> = std::iter::once(None)
            .chain(
                ProgressStatus::ALL
                    .into_iter()
                    .filter(|status| status.in_view(StatusView::Review))
                    .map(Some),
            )
            .collect();

        for task_status in ProgressStatus::ALL {
            for review in reviews.iter().copied() {
                for kind in TaskActionKind::ALL {
                    if let Ok(next) = transition(state(task_status, review), kind.sample_action())
                        && let Some(review_status) = next.latest_review
                    {
                        assert!(review_status.in_view(StatusView::Review));
                    }
                }
            }
        }
    }
}
