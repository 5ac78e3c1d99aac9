//! Guarded task operations
//!
//! Each operation checks, in order: authentication, a valid active role, the
//! acting user (assignee or assigning user), required text, and finally the
//! transition table.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::transition::{
    ReviewVerdict, TaskAction, TaskActionKind, WorkflowState, available_actions, transition,
};
use crate::error::WorkflowError;
use crate::resource::{ResourceId, Task, TaskReview, UserId};
use crate::session::SessionContext;

impl Task {
    pub fn workflow_state(&self) -> WorkflowState {
        WorkflowState::new(self.status, self.latest_review().map(|review| review.status))
    }

    /// Check that the session may perform `kind` on this task as a person,
    /// regardless of the task's current state
    pub fn authorize(
        &self,
        session: &SessionContext,
        kind: TaskActionKind,
    ) -> Result<UserId, WorkflowError> {
        let user_id = session
            .current_user_id()
            .ok_or(WorkflowError::NotAuthenticated)?;
        if session.active_role().is_none() {
            return Err(WorkflowError::NoActiveRole);
        }

        if kind.is_assignee_action() {
            if self.assigned_to_id != Some(user_id) {
                return Err(WorkflowError::NotAssignee {
                    user_id,
                    task_id: self.id,
                });
            }
        } else if self.assigned_by_id != Some(user_id) {
            return Err(WorkflowError::NotAssigner {
                user_id,
                task_id: self.id,
            });
        }

        Ok(user_id)
    }

    /// Begin work on the task
    pub fn start(&mut self, session: &SessionContext) -> Result<(), WorkflowError> {
        self.start_at(session, Utc::now())
    }

    pub fn start_at(
        &mut self,
        session: &SessionContext,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        let user_id = self.guard(session, TaskAction::Start)?;
        let next = self.advance(TaskAction::Start)?;

        self.status = next.task_status;
        self.started_at = Some(now);
        debug!(task_id = self.id, user_id, status = %self.status, "task started");
        Ok(())
    }

    /// Submit the work for review, opening a new review cycle
    pub fn submit(
        &mut self,
        session: &SessionContext,
        notes: &str,
    ) -> Result<&TaskReview, WorkflowError> {
        self.submit_at(session, notes, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        session: &SessionContext,
        notes: &str,
        now: DateTime<Utc>,
    ) -> Result<&TaskReview, WorkflowError> {
        let user_id = self.guard(session, TaskAction::Submit)?;
        let notes = notes.trim();
        if notes.is_empty() {
            return Err(self.rejected(TaskActionKind::Submit, WorkflowError::MissingNotes));
        }
        let next = self.advance(TaskAction::Submit)?;

        let review = TaskReview::new(self.next_review_id(), self.id, notes, user_id, now);
        self.reviews.insert(0, review);
        self.status = next.task_status;
        debug!(task_id = self.id, user_id, review_id = self.reviews[0].id, "task submitted for review");
        Ok(&self.reviews[0])
    }

    /// Pick up the latest submission for review
    pub fn start_review(&mut self, session: &SessionContext) -> Result<(), WorkflowError> {
        let user_id = self.guard(session, TaskAction::StartReview)?;
        let next = self.advance(TaskAction::StartReview)?;

        self.apply_review_state(next)?;
        debug!(task_id = self.id, user_id, "review started");
        Ok(())
    }

    /// Approve or reject the latest submission
    pub fn submit_review(
        &mut self,
        session: &SessionContext,
        verdict: ReviewVerdict,
        feedback: &str,
    ) -> Result<&TaskReview, WorkflowError> {
        self.submit_review_at(session, verdict, feedback, Utc::now())
    }

    pub fn submit_review_at(
        &mut self,
        session: &SessionContext,
        verdict: ReviewVerdict,
        feedback: &str,
        now: DateTime<Utc>,
    ) -> Result<&TaskReview, WorkflowError> {
        let action = TaskAction::SubmitReview(verdict);
        let user_id = self.guard(session, action)?;
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(self.rejected(action.kind(), WorkflowError::MissingFeedback));
        }
        let next = self.advance(action)?;

        self.apply_review_state(next)?;
        let task_id = self.id;
        let review = self
            .latest_review_mut()
            .ok_or(WorkflowError::NoReview(task_id))?;
        review.feedback = Some(feedback.to_string());
        review.reviewed_by_id = Some(user_id);
        review.reviewed_at = Some(now);

        debug!(task_id, user_id, ?verdict, "review submitted");
        Ok(&self.reviews[0])
    }

    /// Actions the session may take on this task right now
    pub fn legal_actions(&self, session: &SessionContext) -> Vec<TaskActionKind> {
        available_actions(self.workflow_state())
            .into_iter()
            .filter(|kind| self.authorize(session, *kind).is_ok())
            .collect()
    }

    fn guard(&self, session: &SessionContext, action: TaskAction) -> Result<UserId, WorkflowError> {
        self.authorize(session, action.kind())
            .map_err(|error| self.rejected(action.kind(), error))
    }

    fn advance(&self, action: TaskAction) -> Result<WorkflowState, WorkflowError> {
        transition(self.workflow_state(), action).map_err(|error| self.rejected(action.kind(), error))
    }

    fn rejected(&self, action: TaskActionKind, error: WorkflowError) -> WorkflowError {
        warn!(task_id = self.id, %action, %error, "task action rejected");
        error
    }

    fn apply_review_state(&mut self, next: WorkflowState) -> Result<(), WorkflowError> {
        let task_id = self.id;
        let review = self
            .latest_review_mut()
            .ok_or(WorkflowError::NoReview(task_id))?;
        if let Some(status) = next.latest_review {
            review.status = status;
        }
        self.status = next.task_status;
        Ok(())
    }

    /// Provisional id until the backend returns the stored review
    fn next_review_id(&self) -> ResourceId {
        self.reviews.iter().map(|review| review.id).max().unwrap_or(0) + 1
    }
}
