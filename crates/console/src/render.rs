//! Table rendering and status badges

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use tabled::{Table, Tabled};

use queuedeck_core::application::policy::available_actions;
use queuedeck_core::domain::{Queue, QueueStatus, Role};

/// Terminal counterpart of the web console's status badge colors
pub fn status_badge(status: QueueStatus) -> ColoredString {
    match status {
        QueueStatus::Pending => status.as_str().yellow(),
        QueueStatus::InProcess => status.as_str().blue(),
        QueueStatus::Completed => status.as_str().green(),
        QueueStatus::Failed => status.as_str().red(),
    }
}

/// Comma-joined action menu for a record, as the policy renders it
pub fn actions_label(status: QueueStatus, role: Role) -> String {
    available_actions(status, role)
        .iter()
        .map(|action| action.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[derive(Tabled)]
pub struct QueueRow {
    #[tabled(rename = "Queue ID")]
    queue_id: String,
    #[tabled(rename = "Task Name")]
    task_name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created_at: String,
    #[tabled(rename = "Start")]
    start_date: String,
    #[tabled(rename = "End")]
    end_date: String,
    #[tabled(rename = "Assigned To")]
    assigned_to_name: String,
    #[tabled(rename = "Actions")]
    actions: String,
}

impl QueueRow {
    pub fn from_queue(queue: &Queue, role: Role) -> Self {
        Self {
            queue_id: queue.queue_id.clone(),
            task_name: queue.task_name.clone(),
            status: status_badge(queue.status).to_string(),
            created_at: format_date(Some(queue.created_at)),
            start_date: format_date(queue.start_date),
            end_date: format_date(queue.end_date),
            assigned_to_name: queue.assigned_to_name.clone().unwrap_or_default(),
            actions: actions_label(queue.status, role),
        }
    }
}

pub fn queue_table(queues: &[Queue], role: Role) -> String {
    let rows: Vec<QueueRow> = queues
        .iter()
        .map(|queue| QueueRow::from_queue(queue, role))
        .collect();
    Table::new(rows).to_string()
}
