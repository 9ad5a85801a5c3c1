//! Queue Management System client implementation

use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use tracing::debug;

use queuedeck_core::application::listing::{AdminListPayload, WorkerListPayload};
use queuedeck_core::application::shaper::{
    ClaimQueuePayload, CreateQueuePayload, ProgressUpdatePayload, RequeuePayload,
    UpdateQueuePayload,
};
use queuedeck_core::domain::{Queue, Role, Session};

use crate::error::{ClientError, Result};
use crate::types::{ApiErrorBody, LoginRequest, LoginResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Queue Management System client
///
/// Holds the base URL and, once signed in, the bearer token attached to
/// every request.
pub struct QueueClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl QueueClient {
    /// Build an unauthenticated client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend root (e.g., `http://127.0.0.1:8080`)
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a signed-in session's token
    pub fn with_session(self, session: &Session) -> Self {
        self.with_token(session.token.clone())
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// POST /api/login
    ///
    /// Returns a ready-to-persist session; the reported role is parsed
    /// case-insensitively.
    pub async fn login(&self, username: impl Into<String>, password: impl Into<String>) -> Result<Session> {
        let username = username.into();
        let body = LoginRequest {
            username: username.clone(),
            password: password.into(),
        };

        let response = self.send(Method::POST, "/api/login", Some(&body)).await?;
        let parsed: LoginResponse = response.json().await?;

        let role = Role::parse(&parsed.user.role)?;
        Ok(Session::new(parsed.token, username, role))
    }

    /// POST /api/queues (filtered listing, server-defined order)
    pub async fn list_queues(&self, filter: &AdminListPayload) -> Result<Vec<Queue>> {
        let response = self.send(Method::POST, "/api/queues", Some(filter)).await?;
        Ok(response.json().await?)
    }

    /// POST /api/getqueuesworker (worker-scoped listing)
    pub async fn list_worker_queues(&self, filter: &WorkerListPayload) -> Result<Vec<Queue>> {
        let response = self
            .send(Method::POST, "/api/getqueuesworker", Some(filter))
            .await?;
        Ok(response.json().await?)
    }

    /// POST /api/queues (create; same route as the listing, different body)
    pub async fn create_queue(&self, payload: &CreateQueuePayload) -> Result<()> {
        self.send(Method::POST, "/api/queues", Some(payload)).await?;
        Ok(())
    }

    /// PUT /api/queues/update/{id}
    pub async fn update_queue(&self, id: &str, payload: &UpdateQueuePayload) -> Result<()> {
        let path = format!("/api/queues/update/{}", id);
        self.send(Method::PUT, &path, Some(payload)).await?;
        Ok(())
    }

    /// POST /api/queues/claim
    pub async fn claim_queue(&self, payload: &ClaimQueuePayload) -> Result<()> {
        self.send(Method::POST, "/api/queues/claim", Some(payload))
            .await?;
        Ok(())
    }

    /// PUT /api/queues/claimupdate/{id}
    pub async fn update_claimed(&self, id: &str, payload: &ProgressUpdatePayload) -> Result<()> {
        let path = format!("/api/queues/claimupdate/{}", id);
        self.send(Method::PUT, &path, Some(payload)).await?;
        Ok(())
    }

    /// PUT /api/queues/requeue/{id}
    pub async fn requeue_queue(&self, id: &str, payload: &RequeuePayload) -> Result<()> {
        let path = format!("/api/queues/requeue/{}", id);
        self.send(Method::PUT, &path, Some(payload)).await?;
        Ok(())
    }

    /// DELETE /api/queues/{id}
    pub async fn delete_queue(&self, id: &str) -> Result<()> {
        let path = format!("/api/queues/{}", id);
        self.send(Method::DELETE, &path, None::<&()>).await?;
        Ok(())
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, &url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
