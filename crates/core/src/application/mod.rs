// Application Layer - the queue lifecycle view model

pub mod listing;
pub mod policy;
pub mod shaper;

// Re-exports
pub use listing::{FetchSequencer, FetchTicket, ListFilter, QueueStats};
pub use policy::{available_actions, ensure_available, is_available, Action, Intent};
pub use shaper::{ClaimForm, CreateForm, MetadataForm, ProgressForm, RetryForm};
