//! Ownership exceptions on top of the role table
//!
//! Every check is `base capability || ownership grant`. A grant never removes
//! a base capability, and no grant applies without a known current user.

use crate::error::PermissionError;
use crate::permissions::{Action, permissions_for_role};
use crate::resource::{Project, ResourceType, Task, Team, User, UserId};
use crate::role::Role;

/// Ownership facts about one resource, relative to the acting user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnershipContext {
    pub current_user_id: Option<UserId>,
    pub owner_id: Option<UserId>,
    pub manager_id: Option<UserId>,
    pub created_by_id: Option<UserId>,
    pub assigned_to_id: Option<UserId>,
    pub lead_id: Option<UserId>,
}

impl OwnershipContext {
    pub fn new(current_user_id: Option<UserId>) -> Self {
        Self {
            current_user_id,
            ..Self::default()
        }
    }

    pub fn with_owner(mut self, id: UserId) -> Self {
        self.owner_id = Some(id);
        self
    }

    pub fn with_manager(mut self, id: UserId) -> Self {
        self.manager_id = Some(id);
        self
    }

    pub fn with_creator(mut self, id: UserId) -> Self {
        self.created_by_id = Some(id);
        self
    }

    pub fn with_assignee(mut self, id: UserId) -> Self {
        self.assigned_to_id = Some(id);
        self
    }

    pub fn with_lead(mut self, id: UserId) -> Self {
        self.lead_id = Some(id);
        self
    }

    /// The assigning user counts as the task's creator
    pub fn for_task(task: &Task, current_user_id: Option<UserId>) -> Self {
        Self {
            current_user_id,
            created_by_id: task.assigned_by_id,
            assigned_to_id: task.assigned_to_id,
            ..Self::default()
        }
    }

    pub fn for_project(project: &Project, current_user_id: Option<UserId>) -> Self {
        Self {
            current_user_id,
            manager_id: project.manager_id,
            ..Self::default()
        }
    }

    pub fn for_team(team: &Team, current_user_id: Option<UserId>) -> Self {
        Self {
            current_user_id,
            manager_id: team.manager_id,
            lead_id: team.lead_id,
            ..Self::default()
        }
    }

    /// A user account is owned by itself
    pub fn for_user(user: &User, current_user_id: Option<UserId>) -> Self {
        Self {
            current_user_id,
            owner_id: Some(user.id),
            ..Self::default()
        }
    }

    fn is_current(&self, id: Option<UserId>) -> bool {
        matches!((self.current_user_id, id), (Some(current), Some(id)) if current == id)
    }

    /// Extra access granted purely by ownership
    fn grants(&self, resource: ResourceType, action: Action) -> bool {
        match (resource, action) {
            (ResourceType::Project, Action::Edit) => self.is_current(self.manager_id),
            (ResourceType::Task, Action::Edit | Action::Delete) => {
                self.is_current(self.created_by_id)
            }
            (ResourceType::User, Action::Edit) => self.is_current(self.owner_id),
            _ => false,
        }
    }
}

fn allowed(role: Role, resource: ResourceType, action: Action, ctx: &OwnershipContext) -> bool {
    permissions_for_role(role).base(resource, action) || ctx.grants(resource, action)
}

pub fn can_edit_resource(role: Role, resource: ResourceType, ctx: &OwnershipContext) -> bool {
    allowed(role, resource, Action::Edit, ctx)
}

pub fn can_delete_resource(role: Role, resource: ResourceType, ctx: &OwnershipContext) -> bool {
    allowed(role, resource, Action::Delete, ctx)
}

/// Restore is never granted by ownership
pub fn can_restore_resource(role: Role, resource: ResourceType) -> bool {
    permissions_for_role(role).base(resource, Action::Restore)
}

/// Team leads and managers may manage their own team's members
pub fn can_manage_team_members(role: Role, ctx: &OwnershipContext) -> bool {
    permissions_for_role(role).can_manage_team_members
        || ctx.is_current(ctx.lead_id)
        || ctx.is_current(ctx.manager_id)
}

/// [`can_edit_resource`] for a resource type given by name
pub fn can_edit_resource_named(
    role: Role,
    resource: &str,
    ctx: &OwnershipContext,
) -> Result<bool, PermissionError> {
    Ok(can_edit_resource(role, resource.parse()?, ctx))
}

/// [`can_delete_resource`] for a resource type given by name
pub fn can_delete_resource_named(
    role: Role,
    resource: &str,
    ctx: &OwnershipContext,
) -> Result<bool, PermissionError> {
    Ok(can_delete_resource(role, resource.parse()?, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [Option<UserId>; 3] = [None, Some(5), Some(6)];

    /// Every context over a small id space
    fn all_contexts() -> Vec<OwnershipContext> {
        let mut contexts = Vec::new();
        for current_user_id in IDS {
            for owner_id in IDS {
                for manager_id in IDS {
                    for created_by_id in IDS {
                        for lead_id in IDS {
                            contexts.push(OwnershipContext {
                                current_user_id,
                                owner_id,
                                manager_id,
                                created_by_id,
                                assigned_to_id: created_by_id,
                                lead_id,
                            });
                        }
                    }
                }
            }
        }
        contexts
    }

    #[test]
    fn team_member_edits_task_they_assigned() {
        let ctx = OwnershipContext::new(Some(5)).with_creator(5);
        assert!(!Role::TeamMember.permissions().can_edit_tasks);
        assert!(can_edit_resource(Role::TeamMember, ResourceType::Task, &ctx));
        assert!(can_delete_resource(Role::TeamMember, ResourceType::Task, &ctx));
    }

    #[test]
    fn team_member_cannot_edit_someone_elses_task() {
        let ctx = OwnershipContext::new(Some(6)).with_creator(5);
        assert!(!can_edit_resource(Role::TeamMember, ResourceType::Task, &ctx));
        assert!(!can_delete_resource(Role::TeamMember, ResourceType::Task, &ctx));
    }

    #[test]
    fn assignee_gets_no_edit_rights() {
        let ctx = OwnershipContext::new(Some(6)).with_assignee(6);
        assert!(!can_edit_resource(Role::TeamMember, ResourceType::Task, &ctx));
    }

    #[test]
    fn project_manager_match_grants_edit_only() {
        let ctx = OwnershipContext::new(Some(9)).with_manager(9);
        assert!(can_edit_resource(Role::TeamLead, ResourceType::Project, &ctx));
        assert!(!can_delete_resource(Role::TeamLead, ResourceType::Project, &ctx));
    }

    #[test]
    fn users_edit_their_own_profile() {
        let user = User::new(4, "Grace", "grace@example.com");
        let own = OwnershipContext::for_user(&user, Some(4));
        let other = OwnershipContext::for_user(&user, Some(7));

        assert!(can_edit_resource(Role::TeamMember, ResourceType::User, &own));
        assert!(!can_edit_resource(Role::TeamMember, ResourceType::User, &other));
        assert!(!can_delete_resource(Role::TeamMember, ResourceType::User, &own));
    }

    #[test]
    fn team_lead_manages_only_their_team() {
        let mut team = Team::new(1, "Core");
        team.lead_id = Some(3);

        let lead = OwnershipContext::for_team(&team, Some(3));
        let outsider = OwnershipContext::for_team(&team, Some(4));

        assert!(can_manage_team_members(Role::TeamLead, &lead));
        assert!(!can_manage_team_members(Role::TeamLead, &outsider));
        assert!(can_manage_team_members(Role::ProjectManager, &outsider));
        // Member management does not extend to editing the team itself
        assert!(!can_edit_resource(Role::TeamLead, ResourceType::Team, &lead));
    }

    #[test]
    fn missing_current_user_fails_closed() {
        let ctx = OwnershipContext::new(None)
            .with_creator(5)
            .with_manager(5)
            .with_owner(5)
            .with_lead(5);
        for resource in ResourceType::ALL {
            assert!(!can_edit_resource(Role::TeamMember, resource, &ctx));
            assert!(!can_delete_resource(Role::TeamMember, resource, &ctx));
        }
        assert!(!can_manage_team_members(Role::TeamMember, &ctx));
    }

    #[test]
    fn ownership_never_revokes_base_capability() {
        for role in Role::ALL {
            let perms = role.permissions();
            for resource in ResourceType::ALL {
                for ctx in all_contexts() {
                    if perms.base(resource, Action::Edit) {
                        assert!(can_edit_resource(role, resource, &ctx));
                    }
                    if perms.base(resource, Action::Delete) {
                        assert!(can_delete_resource(role, resource, &ctx));
                    }
                    if perms.can_manage_team_members {
                        assert!(can_manage_team_members(role, &ctx));
                    }
                }
            }
        }
    }

    #[test]
    fn admin_is_allowed_regardless_of_context() {
        for resource in ResourceType::ALL {
            let ctx = OwnershipContext::default();
            assert!(can_edit_resource(Role::Admin, resource, &ctx));
            assert!(can_delete_resource(Role::Admin, resource, &ctx));
            assert!(can_restore_resource(Role::Admin, resource));
        }
    }

    #[test]
    fn restore_follows_role_table_only() {
        assert!(can_restore_resource(Role::ProjectManager, ResourceType::Task));
        assert!(!can_restore_resource(Role::TeamLead, ResourceType::Task));
    }

    #[test]
    fn named_checks_fail_fast_on_unknown_type() {
        let ctx = OwnershipContext::new(Some(1));
        assert_eq!(
            can_edit_resource_named(Role::Admin, "invoice", &ctx),
            Err(PermissionError::UnknownResourceType("invoice".to_string()))
        );
        assert!(can_delete_resource_named(Role::Admin, "widget", &ctx).is_err());
        assert_eq!(can_edit_resource_named(Role::Admin, "task", &ctx), Ok(true));
    }

    #[test]
    fn context_from_task_uses_assigner_as_creator() {
        let task = Task::new(10, "Audit").assigned(6, 5);
        let ctx = OwnershipContext::for_task(&task, Some(5));
        assert_eq!(ctx.created_by_id, Some(5));
        assert_eq!(ctx.assigned_to_id, Some(6));
        assert!(can_edit_resource(Role::TeamMember, ResourceType::Task, &ctx));
    }
}
