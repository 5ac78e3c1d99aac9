//! questforge-core: access control and task review workflow for QuestForge
//!
//! This crate holds the rules the QuestForge admin client enforces before it
//! offers an action. The rules are UX guards; the backend still authorizes
//! every request.
//!
//! - **Roles** - [`Role`] and [`parse_role`]
//! - **Permission table** - [`permissions_for_role`] maps each role to a fixed [`PermissionSet`]
//! - **Ownership exceptions** - [`can_edit_resource`] and friends add access for managers, creators and leads
//! - **Navigation** - [`visible_nav_links`] filters the menu by permissions
//! - **Workflow** - [`ProgressStatus`], [`milestone_transition`] and the task review table in [`workflow`]
//! - **Session** - [`SessionContext`] is passed explicitly; [`SessionStore`] persists it
//! - **Backend contract** - [`api::Endpoint`], [`api::ApiEnvelope`] and [`cache::Mutation`]
//!
//! # Quick Start
//!
//! ```
//! use questforge_core::{ProgressStatus, Role, SessionContext, SessionUser, Task};
//! use questforge_core::workflow::{ReviewVerdict, TaskActionKind};
//!
//! let lead = SessionContext::signed_in(
//!     SessionUser::new(5, "Ada", "ada@example.com").with_roles([Role::TeamLead]),
//! );
//! let member = SessionContext::signed_in(
//!     SessionUser::new(6, "Lin", "lin@example.com").with_roles([Role::TeamMember]),
//! );
//!
//! let mut task = Task::new(1, "Write release notes").assigned(6, 5);
//! assert_eq!(task.legal_actions(&member), vec![TaskActionKind::Start]);
//!
//! task.start(&member)?;
//! task.submit(&member, "first draft")?;
//! task.start_review(&lead)?;
//! task.submit_review(&lead, ReviewVerdict::Approved, "ship it")?;
//! assert_eq!(task.status, ProgressStatus::Completed);
//! # Ok::<(), questforge_core::WorkflowError>(())
//! ```

pub mod api;
pub mod cache;
pub mod error;
pub mod nav;
pub mod ownership;
pub mod permissions;
pub mod resource;
pub mod role;
pub mod session;
pub mod status;
pub mod workflow;

pub use error::{
    PermissionError, QuestforgeError, ResourceError, RoleParseError, SessionError, WorkflowError,
};
pub use nav::{NavLink, NavSection, visible_nav_links};
pub use ownership::{
    OwnershipContext, can_delete_resource, can_delete_resource_named, can_edit_resource,
    can_edit_resource_named, can_manage_team_members, can_restore_resource,
};
pub use permissions::{
    Action, Capability, PermissionSet, permissions_for_role, permissions_for_role_name,
};
pub use resource::{
    Priority, Project, ResourceId, ResourceType, SoftDelete, Task, TaskReview, Team, User, UserId,
};
pub use role::{Role, parse_role};
pub use session::{SessionContext, SessionStore, SessionUser};
pub use status::{ProgressStatus, StatusView, milestone_transition};
