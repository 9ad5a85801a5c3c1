//! QueueDeck Client - typed REST access to the Queue Management System
//!
//! One method per backend route; payload shapes come from
//! `queuedeck-core` so the wire contract lives in a single place.
//!
//! # Example
//!
//! ```no_run
//! use queuedeck_client::QueueClient;
//! use queuedeck_core::application::listing::AdminListPayload;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = QueueClient::new("http://127.0.0.1:8080")?;
//! let session = client.login("ops", "secret").await?;
//!
//! let client = client.with_session(&session);
//! let queues = client.list_queues(&AdminListPayload::default()).await?;
//! println!("{} queues", queues.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::QueueClient;
pub use error::{ClientError, Result};
pub use types::{ApiErrorBody, LoginRequest, LoginResponse, LoginUser};
