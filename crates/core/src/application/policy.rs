//! Action Policy - which operations the console offers per record
//!
//! The backend enforces the lifecycle; this table only decides what gets
//! rendered. The decision table is exhaustive: View is unconditional, Edit
//! requires an in-process record, Claim a pending one, Retry a failed one,
//! and Delete is admin-only regardless of status.

use crate::domain::{DomainError, Queue, QueueStatus, Role};

/// Operations a queue record's action menu can contain, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Claim,
    Retry,
    Delete,
}

impl Action {
    /// Every action, in menu order
    pub const ALL: [Action; 5] = [
        Action::View,
        Action::Edit,
        Action::Claim,
        Action::Retry,
        Action::Delete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::View => "View",
            Action::Edit => "Edit",
            Action::Claim => "Claim",
            Action::Retry => "Retry",
            Action::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of the decision table
pub fn is_available(action: Action, status: QueueStatus, role: Role) -> bool {
    match action {
        Action::View => true,
        Action::Edit => status == QueueStatus::InProcess,
        Action::Claim => status == QueueStatus::Pending,
        Action::Retry => status == QueueStatus::Failed,
        Action::Delete => role == Role::Admin,
    }
}

/// Ordered action set offered for a record
pub fn available_actions(status: QueueStatus, role: Role) -> Vec<Action> {
    Action::ALL
        .iter()
        .copied()
        .filter(|action| is_available(*action, status, role))
        .collect()
}

/// Policy check that reports the denial as an error
pub fn ensure_available(action: Action, status: QueueStatus, role: Role) -> Result<(), DomainError> {
    if is_available(action, status, role) {
        Ok(())
    } else {
        Err(DomainError::ActionNotAllowed {
            action: action.label().to_string(),
            status: status.to_string(),
        })
    }
}

/// The form a chosen action opens, carried as its own state instead of a
/// tag mutated onto the record. Delete never opens a form (it is
/// confirm-then-call) and so has no variant here.
///
/// `Edit` covers both flows: admins get the metadata form, workers the
/// claim-style status form. The split happens where the intent is consumed.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    View(Queue),
    Edit(Queue),
    Claim(Queue),
    Retry(Queue),
}

impl Intent {
    /// Resolve a form-opening action against the policy. Delete is
    /// confirm-then-call and never opens a form; gate it with
    /// `ensure_available` instead.
    pub fn for_action(action: Action, queue: Queue, role: Role) -> Result<Intent, DomainError> {
        ensure_available(action, queue.status, role)?;

        match action {
            Action::View => Ok(Intent::View(queue)),
            Action::Edit => Ok(Intent::Edit(queue)),
            Action::Claim => Ok(Intent::Claim(queue)),
            Action::Retry => Ok(Intent::Retry(queue)),
            Action::Delete => Err(DomainError::ValidationError(
                "delete opens no form".to_string(),
            )),
        }
    }

    pub fn queue(&self) -> &Queue {
        match self {
            Intent::View(queue)
            | Intent::Edit(queue)
            | Intent::Claim(queue)
            | Intent::Retry(queue) => queue,
        }
    }
}
