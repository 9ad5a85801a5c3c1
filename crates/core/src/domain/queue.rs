// Queue Domain Model
//
// The backend owns every record; this is the read/display copy the console
// holds between fetches. Status transitions are requested, never computed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Server-assigned opaque identifier
pub type RecordId = String;

/// Queue record status, spelled the way the wire carries it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Pending,
    InProcess,
    Completed,
    Failed,
}

impl QueueStatus {
    /// Every status, in lifecycle order
    pub const ALL: [QueueStatus; 4] = [
        QueueStatus::Pending,
        QueueStatus::InProcess,
        QueueStatus::Completed,
        QueueStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Pending => "pending",
            QueueStatus::InProcess => "in_process",
            QueueStatus::Completed => "completed",
            QueueStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QueueStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(QueueStatus::Pending),
            "in_process" => Ok(QueueStatus::InProcess),
            "completed" => Ok(QueueStatus::Completed),
            "failed" => Ok(QueueStatus::Failed),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// User role carried in the session. The backend reports it with arbitrary
/// casing, so parsing lowercases first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Worker,
}

impl Role {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "worker" => Ok(Role::Worker),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Worker => write!(f, "worker"),
        }
    }
}

/// Status dropdown state: a concrete status or "all"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(QueueStatus),
}

impl StatusFilter {
    /// The value sent to the listing endpoints; `All` becomes null
    pub fn as_query(&self) -> Option<QueueStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

/// Queue record as the backend returns it. Assignment and window fields are
/// absent until a worker claims the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    pub id: RecordId,
    pub queue_id: String,
    pub task_name: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub notes: String,
    pub status: QueueStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Queue {
    /// Create a test record with fixed timestamps.
    ///
    /// **Note**: only for tests; production records always come off the
    /// wire.
    pub fn new_test(queue_id: impl Into<String>, task_name: impl Into<String>, status: QueueStatus) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let created_at = DateTime::<Utc>::from_timestamp(1_700_000_000 + counter as i64, 0)
            .expect("fixed test timestamp is valid");

        Self {
            id: format!("rec-{}", counter),
            queue_id: queue_id.into(),
            task_name: task_name.into(),
            details: String::new(),
            notes: String::new(),
            status,
            assigned_to: None,
            assigned_to_name: None,
            assigned_at: None,
            start_date: None,
            end_date: None,
            created_at,
            updated_at: created_at,
        }
    }
}
