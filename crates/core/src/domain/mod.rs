// Domain Layer - records and value objects mirrored from the backend

pub mod error;
pub mod queue;
pub mod session;

// Re-exports
pub use error::DomainError;
pub use queue::{Queue, QueueStatus, Role, StatusFilter};
pub use session::Session;
