//! Which task dialog to offer the current user
//!
//! A failed precondition never surfaces as an error here: the action is
//! simply not offered.

use serde::Serialize;

use super::transition::TaskActionKind;
use crate::resource::Task;
use crate::session::SessionContext;
use crate::status::ProgressStatus;

/// Dialog shown to the task's assignee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssigneeDialog {
    /// Confirm starting work
    StartConfirmation,
    /// Form collecting submission notes
    SubmitForm,
    /// Read-only notice while the assigning user reviews
    AwaitingReview,
    Hidden,
}

/// Dialog shown to the user who assigned the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerDialog {
    /// Confirm picking up the submission
    StartReviewConfirmation,
    /// Form collecting verdict and feedback
    SubmitReviewForm,
    Hidden,
}

pub fn assignee_dialog(task: &Task, session: &SessionContext) -> AssigneeDialog {
    let actions = task.legal_actions(session);
    if actions.contains(&TaskActionKind::Start) {
        return AssigneeDialog::StartConfirmation;
    }
    if actions.contains(&TaskActionKind::Submit) {
        return AssigneeDialog::SubmitForm;
    }

    let pending = matches!(
        task.status,
        ProgressStatus::AwaitingReview | ProgressStatus::UnderReview
    );
    if pending && task.authorize(session, TaskActionKind::Submit).is_ok() {
        AssigneeDialog::AwaitingReview
    } else {
        AssigneeDialog::Hidden
    }
}

pub fn reviewer_dialog(task: &Task, session: &SessionContext) -> ReviewerDialog {
    let actions = task.legal_actions(session);
    if actions.contains(&TaskActionKind::StartReview) {
        ReviewerDialog::StartReviewConfirmation
    } else if actions.contains(&TaskActionKind::SubmitReview) {
        ReviewerDialog::SubmitReviewForm
    } else {
        ReviewerDialog::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use crate::session::SessionUser;

    fn session(id: i64, role: Role) -> SessionContext {
        SessionContext::signed_in(SessionUser::new(id, "user", "user@example.com").with_roles([role]))
    }

    #[test]
    fn test_assignee_progression() {
        let member = session(6, Role::TeamMember);
        let lead = session(5, Role::TeamLead);
        let mut task = Task::new(1, "Write tests").assigned(6, 5);

        assert_eq!(assignee_dialog(&task, &member), AssigneeDialog::StartConfirmation);
        task.start(&member).unwrap();
        assert_eq!(assignee_dialog(&task, &member), AssigneeDialog::SubmitForm);
        task.submit(&member, "done").unwrap();
        assert_eq!(assignee_dialog(&task, &member), AssigneeDialog::AwaitingReview);
        task.start_review(&lead).unwrap();
        assert_eq!(assignee_dialog(&task, &member), AssigneeDialog::AwaitingReview);
    }

    #[test]
    fn test_reviewer_progression() {
        let member = session(6, Role::TeamMember);
        let lead = session(5, Role::TeamLead);
        let mut task = Task::new(1, "Write tests").assigned(6, 5);
        assert_eq!(reviewer_dialog(&task, &lead), ReviewerDialog::Hidden);

        task.start(&member).unwrap();
        task.submit(&member, "done").unwrap();
        assert_eq!(
            reviewer_dialog(&task, &lead),
            ReviewerDialog::StartReviewConfirmation
        );

        task.start_review(&lead).unwrap();
        assert_eq!(reviewer_dialog(&task, &lead), ReviewerDialog::SubmitReviewForm);
    }

    #[test]
    fn test_strangers_see_nothing() {
        let stranger = session(99, Role::Admin);
        let task = Task::new(1, "Write tests")
            .assigned(6, 5)
            .with_status(ProgressStatus::InProgress);
        assert_eq!(assignee_dialog(&task, &stranger), AssigneeDialog::Hidden);
        assert_eq!(reviewer_dialog(&task, &stranger), ReviewerDialog::Hidden);
    }

    #[test]
    fn test_cancelled_task_hides_pending_review() {
        let member = session(6, Role::TeamMember);
        let lead = session(5, Role::TeamLead);
        let mut task = Task::new(1, "Write tests").assigned(6, 5);
        task.start(&member).unwrap();
        task.submit(&member, "done").unwrap();

        for halted in [ProgressStatus::Cancelled, ProgressStatus::OnHold] {
            task.status = halted;
            assert_eq!(reviewer_dialog(&task, &lead), ReviewerDialog::Hidden);
            assert_eq!(assignee_dialog(&task, &member), AssigneeDialog::Hidden);
            assert!(task.start_review(&lead).is_err());
            assert_eq!(task.status, halted);
        }
    }
}
