//! Request Shaper - one payload per mutating intent
//!
//! The backend routes are fixed and each takes a different field subset.
//! Two of them (claimupdate, requeue) expect capitalized JSON keys; the
//! serde renames below are the wire contract, not a style choice.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::{DomainError, Queue, QueueStatus};
use crate::port::TimeProvider;

/// Claim windows default to one day when the record carries none
const DEFAULT_WINDOW_HOURS: i64 = 24;

/// POST /api/queues (create)
#[derive(Debug, Clone, Serialize)]
pub struct CreateQueuePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_id: Option<String>,
    pub task_name: String,
    pub details: String,
    pub status: QueueStatus,
}

/// PUT /api/queues/update/{id} (admin metadata edit, no lifecycle fields)
#[derive(Debug, Clone, Serialize)]
pub struct UpdateQueuePayload {
    pub task_name: String,
    pub details: String,
}

/// POST /api/queues/claim
#[derive(Debug, Clone, Serialize)]
pub struct ClaimQueuePayload {
    pub id: String,
    pub estimated_start: DateTime<Utc>,
    pub estimated_end: DateTime<Utc>,
}

/// PUT /api/queues/claimupdate/{id}
#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdatePayload {
    #[serde(rename = "Status")]
    pub status: QueueStatus,
    #[serde(rename = "Notes")]
    pub notes: String,
}

/// PUT /api/queues/requeue/{id}
#[derive(Debug, Clone, Serialize)]
pub struct RequeuePayload {
    #[serde(rename = "Notes")]
    pub notes: String,
}

/// Add form. Status is pinned to pending; the backend drives it from there.
#[derive(Debug, Clone)]
pub struct CreateForm {
    pub queue_id: Option<String>,
    pub task_name: String,
    pub details: String,
}

impl CreateForm {
    pub fn new(queue_id: Option<String>, task_name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            queue_id,
            task_name: task_name.into(),
            details: details.into(),
        }
    }

    pub fn into_payload(self) -> Result<CreateQueuePayload, DomainError> {
        if self.task_name.trim().is_empty() {
            return Err(DomainError::ValidationError("task_name is required".to_string()));
        }

        Ok(CreateQueuePayload {
            queue_id: self.queue_id.filter(|id| !id.trim().is_empty()),
            task_name: self.task_name,
            details: self.details,
            status: QueueStatus::Pending,
        })
    }
}

/// Admin metadata edit form. The id travels in the URL, not the body.
#[derive(Debug, Clone)]
pub struct MetadataForm {
    pub id: String,
    pub task_name: String,
    pub details: String,
}

impl MetadataForm {
    pub fn open(queue: &Queue) -> Self {
        Self {
            id: queue.id.clone(),
            task_name: queue.task_name.clone(),
            details: queue.details.clone(),
        }
    }

    pub fn into_payload(self) -> UpdateQueuePayload {
        UpdateQueuePayload {
            task_name: self.task_name,
            details: self.details,
        }
    }
}

/// Claim form. Window defaults are captured once, when the form opens, so
/// the clock cannot drift across an editing session.
#[derive(Debug, Clone)]
pub struct ClaimForm {
    pub id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl ClaimForm {
    pub fn open(queue: &Queue, clock: &dyn TimeProvider) -> Self {
        let now = clock.now();
        Self {
            id: queue.id.clone(),
            start_date: queue.start_date.unwrap_or(now),
            end_date: queue
                .end_date
                .unwrap_or(now + Duration::hours(DEFAULT_WINDOW_HOURS)),
        }
    }

    /// Override the window from user input; `None` keeps the captured value
    pub fn with_window(mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        if let Some(start) = start {
            self.start_date = start;
        }
        if let Some(end) = end {
            self.end_date = end;
        }
        self
    }

    pub fn into_payload(self) -> ClaimQueuePayload {
        ClaimQueuePayload {
            id: self.id,
            estimated_start: self.start_date,
            estimated_end: self.end_date,
        }
    }
}

/// Statuses the claim-style edit form may select
pub const PROGRESS_STATUS_CHOICES: [QueueStatus; 3] = [
    QueueStatus::InProcess,
    QueueStatus::Completed,
    QueueStatus::Failed,
];

/// Claim-style edit form: status transition with an annotation
#[derive(Debug, Clone)]
pub struct ProgressForm {
    pub id: String,
    pub status: QueueStatus,
    pub notes: String,
}

impl ProgressForm {
    pub fn open(queue: &Queue) -> Self {
        Self {
            id: queue.id.clone(),
            status: queue.status,
            notes: queue.notes.clone(),
        }
    }

    pub fn into_payload(self) -> Result<ProgressUpdatePayload, DomainError> {
        if !PROGRESS_STATUS_CHOICES.contains(&self.status) {
            return Err(DomainError::ValidationError(format!(
                "status {} cannot be set from the edit form",
                self.status
            )));
        }

        Ok(ProgressUpdatePayload {
            status: self.status,
            notes: self.notes,
        })
    }
}

/// Requeue form. Notes are the one required field.
#[derive(Debug, Clone)]
pub struct RetryForm {
    pub id: String,
    pub notes: String,
}

impl RetryForm {
    pub fn open(queue: &Queue) -> Self {
        Self {
            id: queue.id.clone(),
            notes: queue.notes.clone(),
        }
    }

    pub fn into_payload(self) -> Result<RequeuePayload, DomainError> {
        if self.notes.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "notes are required to retry a failed record".to_string(),
            ));
        }

        Ok(RequeuePayload { notes: self.notes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    struct FixedClock(DateTime<Utc>);

    impl TimeProvider for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn keys(value: &serde_json::Value) -> BTreeSet<String> {
        value
            .as_object()
            .expect("payload serializes to an object")
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn claim_window_defaults_to_24_hours() {
        let queue = Queue::new_test("Q-10", "ingest", QueueStatus::Pending);
        let clock = FixedClock(DateTime::from_timestamp(1_750_000_000, 0).unwrap());

        let form = ClaimForm::open(&queue, &clock);
        assert_eq!(form.end_date - form.start_date, Duration::hours(24));
        assert_eq!(form.start_date, clock.0);
    }

    #[test]
    fn claim_keeps_an_existing_window() {
        let mut queue = Queue::new_test("Q-11", "ingest", QueueStatus::Pending);
        let start = DateTime::from_timestamp(1_750_000_000, 0).unwrap();
        queue.start_date = Some(start);
        queue.end_date = Some(start + Duration::hours(2));

        let clock = FixedClock(start + Duration::days(10));
        let form = ClaimForm::open(&queue, &clock);
        assert_eq!(form.start_date, start);
        assert_eq!(form.end_date - form.start_date, Duration::hours(2));
    }

    #[test]
    fn claim_payload_carries_exactly_id_and_window() {
        let queue = Queue::new_test("Q-12", "ingest", QueueStatus::Pending);
        let clock = FixedClock(DateTime::from_timestamp(1_750_000_000, 0).unwrap());
        let payload = serde_json::to_value(ClaimForm::open(&queue, &clock).into_payload()).unwrap();

        let expected: BTreeSet<String> = ["id", "estimated_start", "estimated_end"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(keys(&payload), expected);
    }

    #[test]
    fn update_payload_never_carries_lifecycle_fields() {
        let queue = Queue::new_test("Q-13", "ingest", QueueStatus::InProcess);
        let payload = serde_json::to_value(MetadataForm::open(&queue).into_payload()).unwrap();

        let expected: BTreeSet<String> = ["task_name", "details"].into_iter().map(String::from).collect();
        assert_eq!(keys(&payload), expected);
    }

    #[test]
    fn requeue_payload_is_notes_only_with_capitalized_key() {
        let mut queue = Queue::new_test("Q-14", "ingest", QueueStatus::Failed);
        queue.notes = "transient error".to_string();
        let payload = serde_json::to_value(RetryForm::open(&queue).into_payload().unwrap()).unwrap();

        assert_eq!(payload, serde_json::json!({ "Notes": "transient error" }));
    }

    #[test]
    fn retry_requires_notes() {
        let queue = Queue::new_test("Q-15", "ingest", QueueStatus::Failed);
        let err = RetryForm::open(&queue).into_payload().unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn progress_payload_uses_capitalized_keys_and_no_dates() {
        let queue = Queue::new_test("Q-16", "ingest", QueueStatus::InProcess);
        let mut form = ProgressForm::open(&queue);
        form.status = QueueStatus::Completed;
        form.notes = "done".to_string();

        let payload = serde_json::to_value(form.into_payload().unwrap()).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({ "Status": "completed", "Notes": "done" })
        );
    }

    #[test]
    fn progress_form_cannot_select_pending() {
        let queue = Queue::new_test("Q-17", "ingest", QueueStatus::InProcess);
        let mut form = ProgressForm::open(&queue);
        form.status = QueueStatus::Pending;
        assert!(form.into_payload().is_err());
    }

    #[test]
    fn create_defaults_to_pending_and_omits_blank_queue_id() {
        let payload = CreateForm::new(None, "ingest", "nightly").into_payload().unwrap();
        assert_eq!(payload.status, QueueStatus::Pending);

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "task_name": "ingest",
                "details": "nightly",
                "status": "pending"
            })
        );

        let with_id = CreateForm::new(Some("Q-99".into()), "ingest", "")
            .into_payload()
            .unwrap();
        assert_eq!(with_id.queue_id.as_deref(), Some("Q-99"));
    }

    #[test]
    fn create_requires_a_task_name() {
        let err = CreateForm::new(None, "  ", "nightly").into_payload().unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }
}
