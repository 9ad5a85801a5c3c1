// Session Store Port
//
// Init reads the persisted session on startup, teardown clears it on
// logout. Components receive the store; nothing reads storage ad hoc.

use crate::domain::Session;
use crate::error::Result;

pub trait SessionStore: Send + Sync {
    /// Read the persisted session, if any
    fn load(&self) -> Result<Option<Session>>;

    /// Persist the session (login)
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove the persisted session (logout)
    fn clear(&self) -> Result<()>;
}
