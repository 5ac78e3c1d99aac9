//! Progress status shared by projects, tasks and task reviews
//!
//! One enum serves two lifecycles. The milestone view tracks overall progress;
//! the review view tracks a single submission/review cycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Progress status of a project, task or task review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    Assigned,
    InProgress,
    AwaitingReview,
    UnderReview,
    Approved,
    Rejected,
    Completed,
    OnHold,
    Cancelled,
}

/// Which lifecycle a status belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusView {
    Milestone,
    Review,
}

impl ProgressStatus {
    pub const ALL: [ProgressStatus; 10] = [
        ProgressStatus::NotStarted,
        ProgressStatus::Assigned,
        ProgressStatus::InProgress,
        ProgressStatus::AwaitingReview,
        ProgressStatus::UnderReview,
        ProgressStatus::Approved,
        ProgressStatus::Rejected,
        ProgressStatus::Completed,
        ProgressStatus::OnHold,
        ProgressStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::AwaitingReview => "awaiting_review",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Assigned => "Assigned",
            Self::InProgress => "In Progress",
            Self::AwaitingReview => "Awaiting Review",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Check membership in a lifecycle view. `Completed` is in both.
    pub fn in_view(&self, view: StatusView) -> bool {
        match view {
            StatusView::Milestone => matches!(
                self,
                Self::NotStarted
                    | Self::Assigned
                    | Self::InProgress
                    | Self::Completed
                    | Self::OnHold
                    | Self::Cancelled
            ),
            StatusView::Review => matches!(
                self,
                Self::AwaitingReview
                    | Self::UnderReview
                    | Self::Approved
                    | Self::Rejected
                    | Self::Completed
            ),
        }
    }

    pub fn is_terminal_milestone(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn is_terminal_review(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Completed)
    }

    /// Statuses reachable from `self` on the milestone lifecycle
    pub fn milestone_targets(&self) -> &'static [ProgressStatus] {
        use ProgressStatus::*;

        match self {
            NotStarted | Assigned => &[InProgress, OnHold, Cancelled],
            InProgress => &[Completed, OnHold, Cancelled],
            OnHold => &[InProgress, Cancelled],
            _ => &[],
        }
    }
}

/// Validate a milestone transition, returning the new status
pub fn milestone_transition(
    from: ProgressStatus,
    to: ProgressStatus,
) -> Result<ProgressStatus, WorkflowError> {
    if from.milestone_targets().contains(&to) {
        Ok(to)
    } else {
        Err(WorkflowError::InvalidMilestoneTransition { from, to })
    }
}

impl FromStr for ProgressStatus {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| WorkflowError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
