//! List Fetcher model - filter state, listing payloads, fetch sequencing
//!
//! The displayed collection is always replaced wholesale by the newest
//! response. Free text only takes effect on an explicit submit; the status
//! dropdown takes effect immediately. A superseded in-flight fetch must
//! never clobber a newer one.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Queue, QueueStatus, StatusFilter};

/// POST /api/queues listing body. Empty text and the All filter are sent
/// as explicit nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdminListPayload {
    pub task_name: Option<String>,
    pub status: Option<QueueStatus>,
}

/// POST /api/getqueuesworker body. This route receives the raw text, empty
/// string included; only the status collapses to null.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkerListPayload {
    pub task_name: String,
    pub status: Option<QueueStatus>,
}

/// Filter state for a queue listing
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    draft: String,
    task_name: String,
    status: StatusFilter,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keystroke into the search box; never triggers a fetch
    pub fn type_search(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submit the search box. Returns true when a new fetch is due.
    pub fn submit_search(&mut self) -> bool {
        if self.draft == self.task_name {
            return false;
        }
        self.task_name = self.draft.clone();
        true
    }

    /// Change the status dropdown. Returns true when a new fetch is due.
    pub fn set_status(&mut self, status: StatusFilter) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        true
    }

    /// Reset both filters. Returns true when a new fetch is due.
    pub fn clear(&mut self) -> bool {
        let changed = !self.task_name.is_empty()
            || !self.draft.is_empty()
            || self.status != StatusFilter::All;
        self.draft.clear();
        self.task_name.clear();
        self.status = StatusFilter::All;
        changed
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn admin_payload(&self) -> AdminListPayload {
        AdminListPayload {
            task_name: if self.task_name.is_empty() {
                None
            } else {
                Some(self.task_name.clone())
            },
            status: self.status.as_query(),
        }
    }

    pub fn worker_payload(&self) -> WorkerListPayload {
        WorkerListPayload {
            task_name: self.task_name.clone(),
            status: self.status.as_query(),
        }
    }
}

/// Serial numbers for list fetches. The newest issued ticket wins; results
/// for superseded tickets are dropped instead of replacing the display.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    current: u64,
}

/// Handle for one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch, superseding any still in flight
    pub fn begin(&mut self) -> FetchTicket {
        self.current += 1;
        FetchTicket(self.current)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.current
    }

    /// Accept a completed fetch. Returns the rows when the ticket is still
    /// current, None when a newer fetch superseded it.
    pub fn accept(&self, ticket: FetchTicket, rows: Vec<Queue>) -> Option<Vec<Queue>> {
        if self.is_current(ticket) {
            Some(rows)
        } else {
            debug!(ticket = ticket.0, current = self.current, "dropping superseded fetch");
            None
        }
    }
}

/// Dashboard tallies, computed client-side from the unfiltered listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    pub total: usize,
    pub pending: usize,
    pub in_process: usize,
    pub completed: usize,
    pub failed: usize,
}

impl QueueStats {
    pub fn tally(queues: &[Queue]) -> Self {
        let mut stats = QueueStats {
            total: queues.len(),
            ..QueueStats::default()
        };

        for queue in queues {
            match queue.status {
                QueueStatus::Pending => stats.pending += 1,
                QueueStatus::InProcess => stats.in_process += 1,
                QueueStatus::Completed => stats.completed += 1,
                QueueStatus::Failed => stats.failed += 1,
            }
        }

        stats
    }
}
