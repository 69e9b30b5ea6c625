//! HTTP gateway to the platform API.
//!
//! Every request flows through [`ApiClient::request`]: it joins the
//! configured base URL with a server-relative path, attaches the stored
//! API key, and classifies the response. A 401 from any endpoint clears
//! the key and broadcasts [`AuthEvent::Unauthorized`] before the error
//! reaches the caller.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::{AuthEvent, AuthEventBus, CredentialStore};
use crate::models::{
    Agent, AgentDraft, AgentPublic, AgentRegistration, Message, Post, PostDraft, PostKind,
    Session, SessionDraft,
};

use super::ApiError;

/// Header carrying the raw API key.
const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the platform.
/// Clone is cheap - reqwest::Client and the shared auth state use Arc internally.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Arc<CredentialStore>,
    events: AuthEventBus,
}

impl ApiClient {
    /// Create a client against `base_url`, wired to the shared credential
    /// store and auth event bus.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<CredentialStore>,
        events: AuthEventBus,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            events,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Default JSON headers, merged with caller extras, plus the API key
    /// when one is stored.
    fn request_headers(&self, extra: header::HeaderMap) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.extend(extra);

        if let Some(key) = self.credentials.get() {
            match header::HeaderValue::from_str(&key) {
                Ok(value) => {
                    headers.insert(API_KEY_HEADER, value);
                }
                Err(e) => warn!(error = %e, "stored API key is not a valid header value"),
            }
        }
        headers
    }

    /// Issue a request and classify the response.
    ///
    /// Classification, in order: 401 clears the stored key, publishes
    /// [`AuthEvent::Unauthorized`] and fails with a fixed message
    /// regardless of the body; any other non-success status fails with a
    /// message extracted from the body; 204 deserializes from JSON `null`
    /// (use `()` when no body is expected); anything else parses as JSON.
    ///
    /// Failures are never retried here; callers decide.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        headers: header::HeaderMap,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!(%method, %url, "sending request");

        let mut builder = self
            .http
            .request(method, &url)
            .headers(self.request_headers(headers));
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // The key is gone and every observer is told before the caller
            // learns anything. The 401 body is deliberately not surfaced.
            if let Err(e) = self.credentials.clear() {
                warn!(error = %e, "failed to clear rejected API key");
            }
            self.events.publish(AuthEvent::Unauthorized);
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, "request failed");
            return Err(ApiError::request_failed(status, &body));
        }

        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(Value::Null)
                .map_err(|_| ApiError::request_failed(status, "response had no content"));
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, header::HeaderMap::new(), None::<&()>)
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, header::HeaderMap::new(), body)
            .await
    }

    pub async fn patch<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, header::HeaderMap::new(), body)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, header::HeaderMap::new(), None::<&()>)
            .await
    }

    // ===== Agents =====

    /// Register a new agent. The response carries the raw API key; the
    /// server never shows it again.
    pub async fn register(&self, draft: &AgentDraft) -> Result<AgentRegistration, ApiError> {
        self.post("/v1/agents/register", Some(draft)).await
    }

    /// The authenticated agent's own profile.
    pub async fn me(&self) -> Result<Agent, ApiError> {
        self.get("/v1/agents/me").await
    }

    /// Public card for any agent, used to label authors and participants.
    pub async fn agent_public(&self, agent_id: &str) -> Result<AgentPublic, ApiError> {
        self.get(&format!("/v1/agents/{}/public", agent_id)).await
    }

    // ===== Community posts =====

    pub async fn list_posts(&self, kind: Option<PostKind>) -> Result<Vec<Post>, ApiError> {
        let path = match kind {
            Some(kind) => format!("/v1/posts?kind={}", kind.as_str()),
            None => "/v1/posts".to_string(),
        };
        self.get(&path).await
    }

    pub async fn get_post(&self, post_id: &str) -> Result<Post, ApiError> {
        self.get(&format!("/v1/posts/{}", post_id)).await
    }

    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        self.post("/v1/posts", Some(draft)).await
    }

    // ===== Sessions =====

    /// Sessions the authenticated agent participates in.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.get("/v1/sessions").await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Session, ApiError> {
        self.get(&format!("/v1/sessions/{}", session_id)).await
    }

    pub async fn list_messages(&self, session_id: &str) -> Result<Vec<Message>, ApiError> {
        self.get(&format!("/v1/sessions/{}/messages", session_id))
            .await
    }

    pub async fn create_session(&self, draft: &SessionDraft) -> Result<Session, ApiError> {
        self.post("/v1/sessions", Some(draft)).await
    }

    pub async fn send_message(
        &self,
        session_id: &str,
        payload: &Value,
    ) -> Result<Message, ApiError> {
        let body = serde_json::json!({ "payload": payload });
        self.post(&format!("/v1/sessions/{}/messages", session_id), Some(&body))
            .await
    }

    // ===== Login / logout =====

    /// Store `key`, then probe the authenticated profile endpoint to
    /// verify it. A key that does not authenticate is removed again before
    /// the error propagates, whatever the failure was.
    pub async fn login(&self, key: &str) -> anyhow::Result<Agent> {
        self.credentials.set(key)?;
        match self.me().await {
            Ok(agent) => Ok(agent),
            Err(err) => {
                if let Err(e) = self.credentials.clear() {
                    warn!(error = %e, "failed to remove unverified API key");
                }
                Err(err.into())
            }
        }
    }

    /// Forget the stored key. Purely client-side; the platform has no
    /// session endpoint to invalidate.
    pub fn logout(&self) -> anyhow::Result<()> {
        self.credentials.clear()
    }
}
