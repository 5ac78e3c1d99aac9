//! Query keys a mutation makes stale
//!
//! Invalidation is fire-and-forget: callers refetch the returned keys, with no
//! ordering guarantee against reads already in flight.

use std::fmt;

use serde::Serialize;

use crate::resource::{ResourceId, ResourceType};
use crate::workflow::TaskActionKind;

/// Part of a resource a cached query covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyScope {
    List,
    Item(ResourceId),
    /// Review history of a task
    Reviews(ResourceId),
}

/// Cache key of one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueryKey {
    pub resource: ResourceType,
    pub scope: KeyScope,
}

impl QueryKey {
    pub fn list(resource: ResourceType) -> Self {
        Self {
            resource,
            scope: KeyScope::List,
        }
    }

    pub fn item(resource: ResourceType, id: ResourceId) -> Self {
        Self {
            resource,
            scope: KeyScope::Item(id),
        }
    }

    pub fn reviews(task_id: ResourceId) -> Self {
        Self {
            resource: ResourceType::Task,
            scope: KeyScope::Reviews(task_id),
        }
    }

    /// Key segments, e.g. `["tasks", "4", "reviews"]`
    pub fn parts(&self) -> Vec<String> {
        let mut parts = vec![self.resource.collection().to_string()];
        match self.scope {
            KeyScope::List => {}
            KeyScope::Item(id) => parts.push(id.to_string()),
            KeyScope::Reviews(id) => {
                parts.push(id.to_string());
                parts.push("reviews".to_string());
            }
        }
        parts
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts().join(":"))
    }
}

/// A write sent to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    Create(ResourceType),
    Update(ResourceType, ResourceId),
    Delete(ResourceType, ResourceId),
    Restore(ResourceType, ResourceId),
    UpdateTeamMembers(ResourceId),
    Task(TaskActionKind, ResourceId),
}

impl Mutation {
    pub fn invalidates(&self) -> Vec<QueryKey> {
        match *self {
            Self::Create(resource) => vec![QueryKey::list(resource)],
            Self::Update(resource, id) | Self::Delete(resource, id) | Self::Restore(resource, id) => {
                vec![QueryKey::list(resource), QueryKey::item(resource, id)]
            }
            Self::UpdateTeamMembers(team_id) => vec![
                QueryKey::list(ResourceType::Team),
                QueryKey::item(ResourceType::Team, team_id),
                QueryKey::list(ResourceType::User),
            ],
            Self::Task(_, task_id) => vec![
                QueryKey::list(ResourceType::Task),
                QueryKey::item(ResourceType::Task, task_id),
                QueryKey::reviews(task_id),
            ],
        }
    }
}
