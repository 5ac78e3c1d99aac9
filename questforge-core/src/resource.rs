//! Resource records mirrored from the backend
//!
//! These are ephemeral copies of backend entities. Deletion is a soft-delete
//! flag (`deleted_at`) that can be reversed with a restore.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PermissionError, ResourceError, WorkflowError};
use crate::role::Role;
use crate::status::{ProgressStatus, milestone_transition};

/// Identifier of a user account
pub type UserId = i64;

/// Identifier of any other backend record
pub type ResourceId = i64;

/// Kinds of resources the permission layer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    User,
    Team,
    Project,
    Task,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::User,
        ResourceType::Team,
        ResourceType::Project,
        ResourceType::Task,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Team => "team",
            Self::Project => "project",
            Self::Task => "task",
        }
    }

    /// REST collection name
    pub fn collection(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Team => "teams",
            Self::Project => "projects",
            Self::Task => "tasks",
        }
    }
}

impl FromStr for ResourceType {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" | "users" => Ok(Self::User),
            "team" | "teams" => Ok(Self::Team),
            "project" | "projects" => Ok(Self::Project),
            "task" | "tasks" => Ok(Self::Task),
            _ => Err(PermissionError::UnknownResourceType(s.to_string())),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task and project priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Soft-delete bookkeeping shared by every resource
pub trait SoftDelete {
    const KIND: ResourceType;

    fn id(&self) -> ResourceId;

    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>);

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Mark the record deleted
    fn soft_delete_at(&mut self, now: DateTime<Utc>) -> Result<(), ResourceError> {
        if self.is_deleted() {
            return Err(ResourceError::AlreadyDeleted {
                kind: Self::KIND,
                id: self.id(),
            });
        }
        self.set_deleted_at(Some(now));
        Ok(())
    }

    /// Clear the deleted flag
    fn restore(&mut self) -> Result<(), ResourceError> {
        if !self.is_deleted() {
            return Err(ResourceError::NotDeleted {
                kind: Self::KIND,
                id: self.id(),
            });
        }
        self.set_deleted_at(None);
        Ok(())
    }
}

macro_rules! impl_soft_delete {
    ($ty:ty, $kind:expr) => {
        impl SoftDelete for $ty {
            const KIND: ResourceType = $kind;

            fn id(&self) -> ResourceId {
                self.id
            }

            fn deleted_at(&self) -> Option<DateTime<Utc>> {
                self.deleted_at
            }

            fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
                self.deleted_at = deleted_at;
            }
        }
    };
}

/// A user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "crate::role::deserialize_role_names")]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            roles: Vec::new(),
            deleted_at: None,
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }
}

/// A team of users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lead_id: Option<UserId>,
    #[serde(default)]
    pub manager_id: Option<UserId>,
    #[serde(default)]
    pub member_ids: Vec<UserId>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Team {
    pub fn new(id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            lead_id: None,
            manager_id: None,
            member_ids: Vec::new(),
            deleted_at: None,
        }
    }

    pub fn has_member(&self, user_id: UserId) -> bool {
        self.member_ids.contains(&user_id)
    }
}

/// A project tracked by milestone status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProgressStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub manager_id: Option<UserId>,
    #[serde(default)]
    pub team_id: Option<ResourceId>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn new(id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            status: ProgressStatus::NotStarted,
            priority: Priority::default(),
            manager_id: None,
            team_id: None,
            due_date: None,
            deleted_at: None,
        }
    }

    /// Move the project along the milestone lifecycle
    pub fn set_status(&mut self, to: ProgressStatus) -> Result<(), WorkflowError> {
        self.status = milestone_transition(self.status, to)?;
        Ok(())
    }
}

/// A unit of work assigned by one user to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProgressStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub project_id: Option<ResourceId>,
    #[serde(default)]
    pub assigned_to_id: Option<UserId>,
    #[serde(default)]
    pub assigned_by_id: Option<UserId>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Review history, newest first
    #[serde(default)]
    pub reviews: Vec<TaskReview>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: ResourceId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: ProgressStatus::NotStarted,
            priority: Priority::default(),
            project_id: None,
            assigned_to_id: None,
            assigned_by_id: None,
            started_at: None,
            due_date: None,
            reviews: Vec::new(),
            deleted_at: None,
        }
    }

    /// Set who the task is assigned to and who assigned it
    pub fn assigned(mut self, to: UserId, by: UserId) -> Self {
        self.assigned_to_id = Some(to);
        self.assigned_by_id = Some(by);
        self
    }

    pub fn with_status(mut self, status: ProgressStatus) -> Self {
        self.status = status;
        self
    }

    /// The only review that can still be acted on
    pub fn latest_review(&self) -> Option<&TaskReview> {
        self.reviews.first()
    }

    pub(crate) fn latest_review_mut(&mut self) -> Option<&mut TaskReview> {
        self.reviews.first_mut()
    }
}

/// One submission/review cycle of a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReview {
    pub id: ResourceId,
    pub task_id: ResourceId,
    pub status: ProgressStatus,
    pub submission_notes: String,
    pub submitted_by_id: UserId,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub reviewed_by_id: Option<UserId>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl TaskReview {
    pub fn new(
        id: ResourceId,
        task_id: ResourceId,
        submission_notes: impl Into<String>,
        submitted_by_id: UserId,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            status: ProgressStatus::AwaitingReview,
            submission_notes: submission_notes.into(),
            submitted_by_id,
            submitted_at,
            feedback: None,
            reviewed_by_id: None,
            reviewed_at: None,
        }
    }

    pub fn is_reviewed(&self) -> bool {
        self.reviewed_at.is_some()
    }
}

impl_soft_delete!(User, ResourceType::User);
impl_soft_delete!(Team, ResourceType::Team);
impl_soft_delete!(Project, ResourceType::Project);
impl_soft_delete!(Task, ResourceType::Task);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_resource_type_parse_accepts_collections() {
        assert_eq!("task".parse::<ResourceType>(), Ok(ResourceType::Task));
        assert_eq!("Projects".parse::<ResourceType>(), Ok(ResourceType::Project));
        assert_eq!(
            "invoice".parse::<ResourceType>(),
            Err(PermissionError::UnknownResourceType("invoice".to_string()))
        );
    }

    #[test]
    fn test_soft_delete_and_restore() {
        let mut project = Project::new(3, "Launch");
        assert!(!project.is_deleted());

        project.soft_delete_at(at(9)).unwrap();
        assert_eq!(project.deleted_at, Some(at(9)));

        project.restore().unwrap();
        assert!(!project.is_deleted());
    }

    #[test]
    fn test_double_delete_is_rejected() {
        let mut task = Task::new(8, "Write docs");
        task.soft_delete_at(at(9)).unwrap();

        let err = task.soft_delete_at(at(10)).unwrap_err();
        assert_eq!(
            err,
            ResourceError::AlreadyDeleted {
                kind: ResourceType::Task,
                id: 8
            }
        );
        // First deletion time is kept
        assert_eq!(task.deleted_at, Some(at(9)));
    }

    #[test]
    fn test_restore_live_record_is_rejected() {
        let mut team = Team::new(2, "Platform");
        assert!(matches!(
            team.restore(),
            Err(ResourceError::NotDeleted {
                kind: ResourceType::Team,
                ..
            })
        ));
    }

    #[test]
    fn test_project_status_follows_milestones() {
        let mut project = Project::new(1, "Migration");
        project.set_status(ProgressStatus::InProgress).unwrap();
        project.set_status(ProgressStatus::Completed).unwrap();
        assert!(project.set_status(ProgressStatus::InProgress).is_err());
        assert_eq!(project.status, ProgressStatus::Completed);
    }

    #[test]
    fn test_task_deserializes_backend_payload() {
        let json = r#"{
            "id": 41,
            "title": "Draft release notes",
            "status": "awaiting_review",
            "priority": "high",
            "assigned_to_id": 6,
            "assigned_by_id": 5,
            "reviews": [{
                "id": 2,
                "task_id": 41,
                "status": "awaiting_review",
                "submission_notes": "second pass",
                "submitted_by_id": 6,
                "submitted_at": "2024-03-02T10:00:00Z"
            }, {
                "id": 1,
                "task_id": 41,
                "status": "rejected",
                "submission_notes": "first pass",
                "submitted_by_id": 6,
                "submitted_at": "2024-03-01T10:00:00Z",
                "feedback": "missing changelog",
                "reviewed_by_id": 5,
                "reviewed_at": "2024-03-01T12:00:00Z"
            }]
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.latest_review().map(|r| r.id), Some(2));
        assert!(!task.latest_review().unwrap().is_reviewed());
        assert!(task.reviews[1].is_reviewed());
    }

    #[test]
    fn test_user_roles_accept_spaced_names() {
        let user: User = serde_json::from_str(
            r#"{"id": 5, "name": "Ada", "email": "ada@example.com", "roles": ["team lead"]}"#,
        )
        .unwrap();
        assert_eq!(user.roles, vec![Role::TeamLead]);
    }

    #[test]
    fn test_user_with_unknown_role_still_loads() {
        let user: User = serde_json::from_str(
            r#"{"id": 5, "name": "Ada", "email": "ada@example.com", "roles": ["team lead", "auditor"]}"#,
        )
        .unwrap();
        assert_eq!(user.roles, vec![Role::TeamLead, Role::TeamMember]);
    }
}
