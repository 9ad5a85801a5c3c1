// Session value object
//
// The browser build kept a bearer token plus {username, role} in
// localStorage; the console persists the same triple through the
// SessionStore port.

use serde::{Deserialize, Serialize};

use crate::domain::queue::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            role,
        }
    }
}
