//! Session context: the signed-in user and their active role

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::ownership::{self, OwnershipContext};
use crate::permissions::{PermissionSet, permissions_for_role};
use crate::resource::{ResourceType, User, UserId};
use crate::role::Role;

/// The signed-in account as the session sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "crate::role::deserialize_role_names")]
    pub roles: Vec<Role>,
}

impl SessionUser {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
        }
    }
}

/// Explicit session state passed to permission and workflow checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    user: Option<SessionUser>,
    #[serde(default)]
    ui_mode: Option<Role>,
}

impl SessionContext {
    /// A signed-out session
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Signed-in session in the user's most privileged role
    pub fn signed_in(user: SessionUser) -> Self {
        let mut session = Self::default();
        session.login(user);
        session
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// The raw selected role, which may not be held by the user
    pub fn ui_mode(&self) -> Option<Role> {
        self.ui_mode
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|user| user.id)
    }

    /// The selected role, only if the user actually holds it
    pub fn active_role(&self) -> Option<Role> {
        let user = self.user.as_ref()?;
        let role = self.ui_mode?;
        if user.has_role(role) {
            Some(role)
        } else {
            warn!(user_id = user.id, %role, "ui mode names a role the user does not hold");
            None
        }
    }

    /// Permissions of the active role, or nothing without one
    pub fn permissions(&self) -> PermissionSet {
        self.active_role()
            .map(permissions_for_role)
            .unwrap_or_else(PermissionSet::none)
    }

    /// Roles offered by the role switcher
    pub fn switchable_roles(&self) -> Vec<Role> {
        match &self.user {
            Some(user) => Role::ALL
                .into_iter()
                .filter(|role| user.has_role(*role))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn switch_role(&mut self, role: Role) -> Result<(), SessionError> {
        let user = self.user.as_ref().ok_or(SessionError::NotAuthenticated)?;
        if !user.has_role(role) {
            return Err(SessionError::RoleNotHeld(role));
        }
        debug!(user_id = user.id, %role, "switched active role");
        self.ui_mode = Some(role);
        Ok(())
    }

    pub fn login(&mut self, user: SessionUser) {
        self.ui_mode = Role::ALL.into_iter().find(|role| user.has_role(*role));
        debug!(user_id = user.id, ui_mode = ?self.ui_mode, "logged in");
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.ui_mode = None;
    }

    /// Empty ownership context with the current user filled in
    pub fn ownership(&self) -> OwnershipContext {
        OwnershipContext::new(self.current_user_id())
    }

    pub fn can_edit(&self, resource: ResourceType, ctx: &OwnershipContext) -> bool {
        self.active_role()
            .is_some_and(|role| ownership::can_edit_resource(role, resource, &self.bind(ctx)))
    }

    pub fn can_delete(&self, resource: ResourceType, ctx: &OwnershipContext) -> bool {
        self.active_role()
            .is_some_and(|role| ownership::can_delete_resource(role, resource, &self.bind(ctx)))
    }

    pub fn can_manage_team_members(&self, ctx: &OwnershipContext) -> bool {
        self.active_role()
            .is_some_and(|role| ownership::can_manage_team_members(role, &self.bind(ctx)))
    }

    /// The session, not the caller, decides who the current user is
    fn bind(&self, ctx: &OwnershipContext) -> OwnershipContext {
        OwnershipContext {
            current_user_id: self.current_user_id(),
            ..*ctx
        }
    }
}
