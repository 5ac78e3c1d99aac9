//! Roles a QuestForge account can hold
//!
//! A user may hold several roles but operates under one active role at a time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::error::RoleParseError;
use crate::permissions::{PermissionSet, permissions_for_role};

/// Permission tier of an account, most privileged first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Full control over users, teams, projects and tasks
    Admin,
    /// Runs projects and the teams working on them
    ProjectManager,
    /// Leads a team and reviews its work
    TeamLead,
    /// Works on assigned tasks
    TeamMember,
}

impl Role {
    /// All roles in privilege order
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::ProjectManager,
        Role::TeamLead,
        Role::TeamMember,
    ];

    /// Role used when a role name cannot be understood
    pub const LEAST_PRIVILEGED: Role = Role::TeamMember;

    /// Wire name used by the backend and in persisted sessions
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProjectManager => "project_manager",
            Self::TeamLead => "team_lead",
            Self::TeamMember => "team_member",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::ProjectManager => "Project Manager",
            Self::TeamLead => "Team Lead",
            Self::TeamMember => "Team Member",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Admin => "Manages every user, team, project and task",
            Self::ProjectManager => "Creates projects, staffs teams and assigns work",
            Self::TeamLead => "Assigns and reviews tasks for their team",
            Self::TeamMember => "Works on and submits assigned tasks",
        }
    }

    /// Get the permission table entry for this role
    pub fn permissions(&self) -> PermissionSet {
        permissions_for_role(*self)
    }

    /// Parse a role name from an untrusted payload.
    ///
    /// Unknown names fall back to [`Role::LEAST_PRIVILEGED`].
    pub fn from_name_or_least_privileged(name: &str) -> Self {
        match parse_role(name) {
            Ok(role) => role,
            Err(error) => {
                warn!(role = name, %error, "treating unrecognized role as least privileged");
                Self::LEAST_PRIVILEGED
            }
        }
    }
}

/// Parse a role name.
///
/// Matching ignores case and surrounding whitespace, and accepts `_`, `-` or
/// whitespace between words, so `"team lead"`, `"Team-Lead"` and `"team_lead"`
/// are the same role.
pub fn parse_role(input: &str) -> Result<Role, RoleParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RoleParseError::Empty);
    }

    let normalized = trimmed
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");

    match normalized.as_str() {
        "admin" => Ok(Role::Admin),
        "project_manager" => Ok(Role::ProjectManager),
        "team_lead" => Ok(Role::TeamLead),
        "team_member" => Ok(Role::TeamMember),
        _ => Err(RoleParseError::Unknown(trimmed.to_string())),
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_role(s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        parse_role(&name).map_err(serde::de::Error::custom)
    }
}

/// Role list from a backend payload. Unknown names become
/// [`Role::LEAST_PRIVILEGED`] instead of failing the whole record.
pub fn deserialize_role_names<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Role>, D::Error> {
    let names = Vec::<String>::deserialize(deserializer)?;
    let mut roles = Vec::with_capacity(names.len());
    for role in names.iter().map(|name| Role::from_name_or_least_privileged(name)) {
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    Ok(roles)
}
