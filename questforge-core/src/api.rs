//! Backend contract: endpoints, response envelopes and error classification
//!
//! Only the shapes live here; transport is left to the caller.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::WorkflowError;
use crate::resource::{ResourceId, ResourceType};
use crate::workflow::TaskActionKind;

/// Standard response wrapper returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn field_errors(&self) -> FieldErrors {
        FieldErrors(self.errors.clone().unwrap_or_default())
    }
}

/// Field-keyed validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Messages for one form field
    pub fn for_field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// First message for a field, as shown inline under the input
    pub fn first(&self, field: &str) -> Option<&str> {
        self.for_field(field).first().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    List(ResourceType),
    Show(ResourceType, ResourceId),
    Create(ResourceType),
    Update(ResourceType, ResourceId),
    Delete(ResourceType, ResourceId),
    Restore(ResourceType, ResourceId),
    StartTask(ResourceId),
    SubmitTask(ResourceId),
    StartReview {
        task_id: ResourceId,
        review_id: ResourceId,
    },
    SubmitReview {
        task_id: ResourceId,
        review_id: ResourceId,
    },
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::List(_) | Self::Show(..) => HttpMethod::Get,
            Self::Update(..) => HttpMethod::Put,
            Self::Delete(..) => HttpMethod::Delete,
            Self::Create(_)
            | Self::Restore(..)
            | Self::StartTask(_)
            | Self::SubmitTask(_)
            | Self::StartReview { .. }
            | Self::SubmitReview { .. } => HttpMethod::Post,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::List(resource) | Self::Create(resource) => format!("/{}", resource.collection()),
            Self::Show(resource, id) | Self::Update(resource, id) | Self::Delete(resource, id) => {
                format!("/{}/{}", resource.collection(), id)
            }
            Self::Restore(resource, id) => format!("/{}/{}/restore", resource.collection(), id),
            Self::StartTask(id) => format!("/tasks/{}/start", id),
            Self::SubmitTask(id) => format!("/tasks/{}/submit", id),
            Self::StartReview { task_id, review_id } => {
                format!("/tasks/{}/reviews/{}/start", task_id, review_id)
            }
            Self::SubmitReview { task_id, review_id } => {
                format!("/tasks/{}/reviews/{}/submit", task_id, review_id)
            }
        }
    }

    /// Full URL under `base_url`
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

impl TaskActionKind {
    /// Route for this action. Review actions need the latest review's id.
    pub fn endpoint(
        &self,
        task_id: ResourceId,
        review_id: Option<ResourceId>,
    ) -> Result<Endpoint, WorkflowError> {
        match self {
            Self::Start => Ok(Endpoint::StartTask(task_id)),
            Self::Submit => Ok(Endpoint::SubmitTask(task_id)),
            Self::StartReview => review_id
                .map(|review_id| Endpoint::StartReview { task_id, review_id })
                .ok_or(WorkflowError::NoReview(task_id)),
            Self::SubmitReview => review_id
                .map(|review_id| Endpoint::SubmitReview { task_id, review_id })
                .ok_or(WorkflowError::NoReview(task_id)),
        }
    }
}

/// Failed backend call, classified by how the UI must react
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("not signed in")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("network error: {0}")]
    Network(String),

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
}

/// Where an error is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSurface {
    /// Messages under the offending form fields
    InlineFields,
    /// "Not found" page
    NotFound,
    /// Back to the sign-in page
    Redirect,
    /// Generic toast, no retry
    Toast,
}

impl ApiError {
    /// Classify a non-success response
    pub fn from_response<T>(status: u16, envelope: &ApiEnvelope<T>) -> Self {
        let field_errors = envelope.field_errors();
        match status {
            400 | 422 if !field_errors.is_empty() => Self::Validation(field_errors),
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            _ => Self::Server {
                status,
                message: envelope
                    .message
                    .clone()
                    .unwrap_or_else(|| "request failed".to_string()),
            },
        }
    }

    pub fn surface(&self) -> ErrorSurface {
        match self {
            Self::Validation(_) => ErrorSurface::InlineFields,
            Self::Forbidden | Self::NotFound => ErrorSurface::NotFound,
            Self::Unauthorized => ErrorSurface::Redirect,
            Self::Network(_) | Self::Server { .. } => ErrorSurface::Toast,
        }
    }
}
