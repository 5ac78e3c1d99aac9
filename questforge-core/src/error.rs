//! Error types for questforge-core

use thiserror::Error;

use crate::api::ApiError;
use crate::resource::{ResourceId, ResourceType, UserId};
use crate::role::Role;
use crate::status::ProgressStatus;
use crate::workflow::TaskActionKind;

/// Top-level error type for questforge-core
#[derive(Error, Debug)]
pub enum QuestforgeError {
    #[error("Role error: {0}")]
    Role(#[from] RoleParseError),

    #[error("Permission error: {0}")]
    Permission(#[from] PermissionError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Errors from parsing a role name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    #[error("role name is empty")]
    Empty,

    #[error("unknown role: {0}")]
    Unknown(String),
}

/// Programmer errors from the permission layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),
}

/// Errors from the milestone and review state machines
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Invalid milestone transition from {from} to {to}")]
    InvalidMilestoneTransition {
        from: ProgressStatus,
        to: ProgressStatus,
    },

    #[error("Cannot {action} a task in status {task_status} (latest review: {review_status:?})")]
    ActionNotAllowed {
        action: TaskActionKind,
        task_status: ProgressStatus,
        review_status: Option<ProgressStatus>,
    },

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("session has no active role")]
    NoActiveRole,

    #[error("user {user_id} is not the assignee of task {task_id}")]
    NotAssignee { user_id: UserId, task_id: ResourceId },

    #[error("user {user_id} did not assign task {task_id}")]
    NotAssigner { user_id: UserId, task_id: ResourceId },

    #[error("submission notes are required")]
    MissingNotes,

    #[error("review feedback is required")]
    MissingFeedback,

    #[error("task {0} has no review to act on")]
    NoReview(ResourceId),

    #[error("unknown progress status: {0}")]
    UnknownStatus(String),
}

/// Errors related to the active session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("role {0} is not held by the current user")]
    RoleNotHeld(Role),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Errors from soft-delete bookkeeping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("{kind} {id} is already deleted")]
    AlreadyDeleted { kind: ResourceType, id: ResourceId },

    #[error("{kind} {id} is not deleted")]
    NotDeleted { kind: ResourceType, id: ResourceId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_error_unknown_displays_name() {
        let error = RoleParseError::Unknown("wizard".to_string());
        assert_eq!(error.to_string(), "unknown role: wizard");
    }

    #[test]
    fn permission_error_displays_resource_name() {
        let error = PermissionError::UnknownResourceType("invoice".to_string());
        assert!(error.to_string().contains("invoice"));
    }

    #[test]
    fn workflow_error_action_not_allowed_displays_statuses() {
        let error = WorkflowError::ActionNotAllowed {
            action: TaskActionKind::Submit,
            task_status: ProgressStatus::NotStarted,
            review_status: None,
        };
        let msg = error.to_string();
        assert!(msg.contains("submit"));
        assert!(msg.contains("not_started"));
    }

    #[test]
    fn session_error_role_not_held_uses_wire_name() {
        let error = SessionError::RoleNotHeld(Role::ProjectManager);
        assert!(error.to_string().contains("project_manager"));
    }

    #[test]
    fn resource_error_displays_kind_and_id() {
        let error = ResourceError::AlreadyDeleted {
            kind: ResourceType::Project,
            id: 12,
        };
        assert_eq!(error.to_string(), "project 12 is already deleted");
    }

    #[test]
    fn questforge_error_converts_from_workflow_error() {
        let error: QuestforgeError = WorkflowError::MissingNotes.into();
        assert!(matches!(error, QuestforgeError::Workflow(_)));
        assert!(error.to_string().contains("Workflow error"));
    }

    #[test]
    fn questforge_error_converts_from_session_error() {
        let error: QuestforgeError = SessionError::NotAuthenticated.into();
        assert!(matches!(error, QuestforgeError::Session(_)));
    }
}
