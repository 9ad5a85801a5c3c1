//! Wire types for the session endpoints
//!
//! Queue payload shapes live in queuedeck-core; only login and the error
//! body are client-specific.

use serde::{Deserialize, Serialize};

/// POST /api/login body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub role: String,
}

/// Error body shape; the backend populates `error` or `message`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Preferred display text; `error` wins when both fields are set
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}
