//! Navigation sections filtered by permissions

use serde::Serialize;

use crate::permissions::PermissionSet;

/// Top-level navigation section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavSection {
    Dashboard,
    Users,
    Teams,
    Projects,
    Tasks,
    Settings,
}

impl NavSection {
    pub const ALL: [NavSection; 6] = [
        NavSection::Dashboard,
        NavSection::Users,
        NavSection::Teams,
        NavSection::Projects,
        NavSection::Tasks,
        NavSection::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Teams => "Teams",
            Self::Projects => "Projects",
            Self::Tasks => "Tasks",
            Self::Settings => "Settings",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Users => "/users",
            Self::Teams => "/teams",
            Self::Projects => "/projects",
            Self::Tasks => "/tasks",
            Self::Settings => "/settings",
        }
    }

    pub fn is_visible(&self, permissions: &PermissionSet) -> bool {
        match self {
            Self::Dashboard => true,
            Self::Users => permissions.can_view_users,
            Self::Teams => permissions.can_view_teams,
            Self::Projects => permissions.can_view_projects,
            Self::Tasks => permissions.can_view_tasks,
            Self::Settings => permissions.can_access_settings,
        }
    }
}

/// A rendered navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub section: NavSection,
    pub label: &'static str,
    pub path: &'static str,
}

impl From<NavSection> for NavLink {
    fn from(section: NavSection) -> Self {
        Self {
            section,
            label: section.label(),
            path: section.path(),
        }
    }
}

/// Navigation links visible under a permission set, in menu order
pub fn visible_nav_links(permissions: &PermissionSet) -> Vec<NavLink> {
    NavSection::ALL
        .into_iter()
        .filter(|section| section.is_visible(permissions))
        .map(NavLink::from)
        .collect()
}
