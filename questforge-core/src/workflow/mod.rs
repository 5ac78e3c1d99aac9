//! Task submission and review workflow
//!
//! The assignee starts and submits a task; the user who assigned it reviews
//! each submission. Approval completes the task, rejection sends it back for
//! another cycle.

mod dialog;
mod task;
mod transition;

pub use dialog::{AssigneeDialog, ReviewerDialog, assignee_dialog, reviewer_dialog};
pub use transition::{
    ReviewVerdict, TaskAction, TaskActionKind, WorkflowState, available_actions, transition,
};
