//! Static role → capability table
//!
//! Every capability of every role is a fixed constant. Ownership exceptions
//! are layered on top in [`crate::ownership`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::ResourceType;
use crate::role::Role;

/// Capability flags for one role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionSet {
    pub can_view_users: bool,
    pub can_create_users: bool,
    pub can_edit_users: bool,
    pub can_delete_users: bool,

    pub can_view_teams: bool,
    pub can_create_teams: bool,
    pub can_edit_teams: bool,
    pub can_delete_teams: bool,
    pub can_manage_team_members: bool,

    pub can_view_projects: bool,
    pub can_create_projects: bool,
    pub can_edit_projects: bool,
    pub can_delete_projects: bool,

    pub can_view_tasks: bool,
    pub can_create_tasks: bool,
    pub can_edit_tasks: bool,
    pub can_delete_tasks: bool,
    pub can_reassign_tasks: bool,
    pub can_review_tasks: bool,

    pub can_restore_deleted: bool,
    pub can_access_settings: bool,
}

/// Look up the capability set of a role
pub const fn permissions_for_role(role: Role) -> PermissionSet {
    match role {
        Role::Admin => PermissionSet::all(),
        Role::ProjectManager => PermissionSet {
            can_view_users: true,
            can_view_teams: true,
            can_create_teams: true,
            can_edit_teams: true,
            can_manage_team_members: true,
            can_view_projects: true,
            can_create_projects: true,
            can_edit_projects: true,
            can_delete_projects: true,
            can_view_tasks: true,
            can_create_tasks: true,
            can_edit_tasks: true,
            can_delete_tasks: true,
            can_reassign_tasks: true,
            can_review_tasks: true,
            can_restore_deleted: true,
            ..PermissionSet::none()
        },
        Role::TeamLead => PermissionSet {
            can_view_users: true,
            can_view_teams: true,
            can_view_projects: true,
            can_view_tasks: true,
            can_create_tasks: true,
            can_edit_tasks: true,
            can_reassign_tasks: true,
            can_review_tasks: true,
            ..PermissionSet::none()
        },
        Role::TeamMember => PermissionSet {
            can_view_teams: true,
            can_view_projects: true,
            can_view_tasks: true,
            ..PermissionSet::none()
        },
    }
}

/// Look up permissions by role name.
///
/// Unrecognized names get the least privileged role's permissions.
pub fn permissions_for_role_name(name: &str) -> PermissionSet {
    permissions_for_role(Role::from_name_or_least_privileged(name))
}

impl PermissionSet {
    /// A set that denies everything
    pub const fn none() -> Self {
        Self {
            can_view_users: false,
            can_create_users: false,
            can_edit_users: false,
            can_delete_users: false,
            can_view_teams: false,
            can_create_teams: false,
            can_edit_teams: false,
            can_delete_teams: false,
            can_manage_team_members: false,
            can_view_projects: false,
            can_create_projects: false,
            can_edit_projects: false,
            can_delete_projects: false,
            can_view_tasks: false,
            can_create_tasks: false,
            can_edit_tasks: false,
            can_delete_tasks: false,
            can_reassign_tasks: false,
            can_review_tasks: false,
            can_restore_deleted: false,
            can_access_settings: false,
        }
    }

    /// A set that allows everything
    pub const fn all() -> Self {
        Self {
            can_view_users: true,
            can_create_users: true,
            can_edit_users: true,
            can_delete_users: true,
            can_view_teams: true,
            can_create_teams: true,
            can_edit_teams: true,
            can_delete_teams: true,
            can_manage_team_members: true,
            can_view_projects: true,
            can_create_projects: true,
            can_edit_projects: true,
            can_delete_projects: true,
            can_view_tasks: true,
            can_create_tasks: true,
            can_edit_tasks: true,
            can_delete_tasks: true,
            can_reassign_tasks: true,
            can_review_tasks: true,
            can_restore_deleted: true,
            can_access_settings: true,
        }
    }

    /// Check a single capability
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewUsers => self.can_view_users,
            Capability::CreateUsers => self.can_create_users,
            Capability::EditUsers => self.can_edit_users,
            Capability::DeleteUsers => self.can_delete_users,
            Capability::ViewTeams => self.can_view_teams,
            Capability::CreateTeams => self.can_create_teams,
            Capability::EditTeams => self.can_edit_teams,
            Capability::DeleteTeams => self.can_delete_teams,
            Capability::ManageTeamMembers => self.can_manage_team_members,
            Capability::ViewProjects => self.can_view_projects,
            Capability::CreateProjects => self.can_create_projects,
            Capability::EditProjects => self.can_edit_projects,
            Capability::DeleteProjects => self.can_delete_projects,
            Capability::ViewTasks => self.can_view_tasks,
            Capability::CreateTasks => self.can_create_tasks,
            Capability::EditTasks => self.can_edit_tasks,
            Capability::DeleteTasks => self.can_delete_tasks,
            Capability::ReassignTasks => self.can_reassign_tasks,
            Capability::ReviewTasks => self.can_review_tasks,
            Capability::RestoreDeleted => self.can_restore_deleted,
            Capability::AccessSettings => self.can_access_settings,
        }
    }

    /// Base capability for an action on a resource type, before ownership
    pub fn base(&self, resource: ResourceType, action: Action) -> bool {
        self.allows(Capability::for_action(resource, action))
    }

    /// Capabilities this set grants, in table order
    pub fn granted(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.allows(*capability))
            .collect()
    }
}

impl Default for PermissionSet {
    fn default() -> Self {
        permissions_for_role(Role::LEAST_PRIVILEGED)
    }
}

/// What a caller wants to do with a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Restore,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Restore,
    ];
}

/// Name of one field of [`PermissionSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewUsers,
    CreateUsers,
    EditUsers,
    DeleteUsers,
    ViewTeams,
    CreateTeams,
    EditTeams,
    DeleteTeams,
    ManageTeamMembers,
    ViewProjects,
    CreateProjects,
    EditProjects,
    DeleteProjects,
    ViewTasks,
    CreateTasks,
    EditTasks,
    DeleteTasks,
    ReassignTasks,
    ReviewTasks,
    RestoreDeleted,
    AccessSettings,
}

impl Capability {
    pub const ALL: [Capability; 21] = [
        Capability::ViewUsers,
        Capability::CreateUsers,
        Capability::EditUsers,
        Capability::DeleteUsers,
        Capability::ViewTeams,
        Capability::CreateTeams,
        Capability::EditTeams,
        Capability::DeleteTeams,
        Capability::ManageTeamMembers,
        Capability::ViewProjects,
        Capability::CreateProjects,
        Capability::EditProjects,
        Capability::DeleteProjects,
        Capability::ViewTasks,
        Capability::CreateTasks,
        Capability::EditTasks,
        Capability::DeleteTasks,
        Capability::ReassignTasks,
        Capability::ReviewTasks,
        Capability::RestoreDeleted,
        Capability::AccessSettings,
    ];

    /// Capability that gates `action` on `resource`
    pub fn for_action(resource: ResourceType, action: Action) -> Self {
        use Action::*;
        use ResourceType::*;

        match (resource, action) {
            (_, Restore) => Capability::RestoreDeleted,
            (User, View) => Capability::ViewUsers,
            (User, Create) => Capability::CreateUsers,
            (User, Edit) => Capability::EditUsers,
            (User, Delete) => Capability::DeleteUsers,
            (Team, View) => Capability::ViewTeams,
            (Team, Create) => Capability::CreateTeams,
            (Team, Edit) => Capability::EditTeams,
            (Team, Delete) => Capability::DeleteTeams,
            (Project, View) => Capability::ViewProjects,
            (Project, Create) => Capability::CreateProjects,
            (Project, Edit) => Capability::EditProjects,
            (Project, Delete) => Capability::DeleteProjects,
            (Task, View) => Capability::ViewTasks,
            (Task, Create) => Capability::CreateTasks,
            (Task, Edit) => Capability::EditTasks,
            (Task, Delete) => Capability::DeleteTasks,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewUsers => "can_view_users",
            Self::CreateUsers => "can_create_users",
            Self::EditUsers => "can_edit_users",
            Self::DeleteUsers => "can_delete_users",
            Self::ViewTeams => "can_view_teams",
            Self::CreateTeams => "can_create_teams",
            Self::EditTeams => "can_edit_teams",
            Self::DeleteTeams => "can_delete_teams",
            Self::ManageTeamMembers => "can_manage_team_members",
            Self::ViewProjects => "can_view_projects",
            Self::CreateProjects => "can_create_projects",
            Self::EditProjects => "can_edit_projects",
            Self::DeleteProjects => "can_delete_projects",
            Self::ViewTasks => "can_view_tasks",
            Self::CreateTasks => "can_create_tasks",
            Self::EditTasks => "can_edit_tasks",
            Self::DeleteTasks => "can_delete_tasks",
            Self::ReassignTasks => "can_reassign_tasks",
            Self::ReviewTasks => "can_review_tasks",
            Self::RestoreDeleted => "can_restore_deleted",
            Self::AccessSettings => "can_access_settings",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
