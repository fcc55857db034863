//! Friendlog REST API Client
//!
//! HTTP client for the friendlog backend. Each operation sends exactly one
//! request (except [`FriendClient::conversation`], which reads the friend's
//! details) and either returns the parsed body or a [`ClientError`].
//!
//! Authenticated operations read the stored [`Session`] first and fail with
//! [`ClientError::LoginRequired`] when there is none. A `401` on any
//! authenticated call clears the stored session and surfaces as
//! [`ClientError::SessionExpired`].
//!
//! # Endpoints
//!
//! - `POST /auth/login`, `POST /auth/register`, `POST /auth/logout`
//! - `GET /friends/`, `POST /friends/`
//! - `GET /friends/{id}`, `PUT /friends/{id}`
//! - `POST /friends/{id}/conversations`
//! - `GET /chats`, `POST /chat`

mod error;

pub use error::{ClientError, ClientResult};

use chrono::NaiveDate;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::endpoint::ApiBase;
use crate::models::{
    AuthResponse, ChatMessage, ChatMessageSend, Conversation, ConversationInput,
    CreateFriendRequest, ErrorDetail, Friend, FriendAttribute, FriendDetails, LoginRequest,
    RegisterRequest, UpdateAttributesRequest,
};
use crate::session::{
    FileSessionStore, Session, SessionStore, DEFAULT_LIFETIME_DAYS, LIFETIME_DAYS_RANGE,
};

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Client tuning
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base: ApiBase,
    pub request_timeout: Duration,
    pub session_lifetime_days: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base: ApiBase::default(),
            request_timeout: Duration::from_secs(30),
            session_lifetime_days: DEFAULT_LIFETIME_DAYS,
        }
    }
}

/// Friendlog backend client
pub struct FriendClient {
    http: Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
}

impl FriendClient {
    /// Create a client with the given configuration and session store
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> ClientResult<Self> {
        if !LIFETIME_DAYS_RANGE.contains(&config.session_lifetime_days) {
            return Err(ClientError::Validation(format!(
                "session lifetime must be {}..={} days, got {}",
                LIFETIME_DAYS_RANGE.start(),
                LIFETIME_DAYS_RANGE.end(),
                config.session_lifetime_days
            )));
        }

        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config,
            store,
        })
    }

    /// Create a client from loaded configuration, keeping the session in the
    /// configured token file
    pub fn from_config(config: &Config, base: ApiBase) -> ClientResult<Self> {
        let store = Arc::new(FileSessionStore::new(&config.session.token_file));
        Self::new(
            ClientConfig {
                base,
                request_timeout: Duration::from_secs(config.api.request_timeout_secs),
                session_lifetime_days: config.session.lifetime_days,
            },
            store,
        )
    }

    pub fn base(&self) -> &ApiBase {
        &self.config.base
    }

    /// The stored session, if it exists and has not expired
    pub async fn current_session(&self) -> ClientResult<Option<Session>> {
        Ok(self.store.load().await?)
    }

    /// The stored session, or [`ClientError::LoginRequired`]
    pub async fn session(&self) -> ClientResult<Session> {
        self.current_session()
            .await?
            .ok_or(ClientError::LoginRequired)
    }

    // ============================================
    // Auth
    // ============================================

    /// Log in and persist the returned token
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let request = self.request(Method::POST, "/auth/login").json(&body);
        let response = self.send(&Method::POST, "/auth/login", request).await?;

        if !response.status().is_success() {
            return Err(ClientError::LoginFailed(error_message(response).await));
        }

        let auth: AuthResponse = decode(response).await?;
        self.start_session(&auth).await?;
        tracing::info!(email = %body.email, "Logged in");
        Ok(auth)
    }

    /// Create an account and persist the returned token
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthResponse> {
        if name.trim().is_empty() {
            return Err(ClientError::Validation("name must not be empty".to_string()));
        }

        let body = RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let request = self.request(Method::POST, "/auth/register").json(&body);
        let response = self.send(&Method::POST, "/auth/register", request).await?;

        if !response.status().is_success() {
            return Err(ClientError::RegistrationFailed(
                error_message(response).await,
            ));
        }

        let auth: AuthResponse = decode(response).await?;
        self.start_session(&auth).await?;
        tracing::info!(email = %body.email, "Registered");
        Ok(auth)
    }

    /// Tell the backend we are leaving, then forget the session.
    ///
    /// The backend call is best effort; the local session is cleared even if
    /// it fails. Returns whether a session was present.
    pub async fn logout(&self) -> ClientResult<bool> {
        let session = match self.current_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored session, clearing it");
                None
            }
        };

        if let Some(session) = &session {
            let request = self
                .request(Method::POST, "/auth/logout")
                .header(AUTHORIZATION, session.authorization());
            match self.send(&Method::POST, "/auth/logout", request).await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(status = %response.status(), "Backend logout rejected");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Backend logout failed"),
            }
        }

        self.store.clear().await?;
        Ok(session.is_some())
    }

    // ============================================
    // Friends
    // ============================================

    pub async fn friends(&self) -> ClientResult<Vec<Friend>> {
        let response = self.authed(Method::GET, "/friends/", |r| r).await?;
        decode(response).await
    }

    pub async fn create_friend(&self, name: &str) -> ClientResult<Friend> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::Validation(
                "friend name must not be empty".to_string(),
            ));
        }

        let body = CreateFriendRequest {
            name: name.to_string(),
        };
        let response = self
            .authed(Method::POST, "/friends/", |r| r.json(&body))
            .await?;
        decode(response).await
    }

    pub async fn friend_details(&self, friend_id: i64) -> ClientResult<FriendDetails> {
        let path = format!("/friends/{}", friend_id);
        let response = self.authed(Method::GET, &path, |r| r).await?;
        decode(response).await
    }

    /// Replace a friend's attribute list
    pub async fn update_attributes(
        &self,
        friend_id: i64,
        attributes: Vec<FriendAttribute>,
    ) -> ClientResult<()> {
        let path = format!("/friends/{}", friend_id);
        let body = UpdateAttributesRequest { attributes };
        self.authed(Method::PUT, &path, |r| r.json(&body)).await?;
        tracing::debug!(friend_id, count = body.attributes.len(), "Attributes saved");
        Ok(())
    }

    // ============================================
    // Conversations
    // ============================================

    pub async fn add_conversation(
        &self,
        friend_id: i64,
        context: &str,
        conversation_date: NaiveDate,
    ) -> ClientResult<()> {
        if context.trim().is_empty() {
            return Err(ClientError::Validation(
                "conversation context must not be empty".to_string(),
            ));
        }

        let path = format!("/friends/{}/conversations", friend_id);
        let body = ConversationInput {
            context: context.to_string(),
            conversation_date,
        };
        self.authed(Method::POST, &path, |r| r.json(&body)).await?;
        Ok(())
    }

    /// Conversation number `index` (0-based) of a friend
    pub async fn conversation(&self, friend_id: i64, index: usize) -> ClientResult<Conversation> {
        let details = self.friend_details(friend_id).await?;
        details
            .conversations
            .into_iter()
            .nth(index)
            .ok_or_else(|| {
                ClientError::NotFound(format!(
                    "conversation {} of friend {}",
                    index, friend_id
                ))
            })
    }

    // ============================================
    // Chat
    // ============================================

    pub async fn chat_history(&self) -> ClientResult<Vec<ChatMessage>> {
        let response = self.authed(Method::GET, "/chats", |r| r).await?;
        decode(response).await
    }

    pub async fn send_message(&self, content: &str) -> ClientResult<ChatMessage> {
        if content.trim().is_empty() {
            return Err(ClientError::Validation(
                "message must not be empty".to_string(),
            ));
        }

        let body = ChatMessageSend {
            content: content.to_string(),
        };
        let response = self
            .authed(Method::POST, "/chat", |r| r.json(&body))
            .await?;
        decode(response).await
    }

    // ============================================
    // Plumbing
    // ============================================

    async fn start_session(&self, auth: &AuthResponse) -> ClientResult<()> {
        let session = Session::new(
            auth.access_token.clone(),
            auth.token_type.clone(),
            self.config.session_lifetime_days,
        );
        self.store.save(&session).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.base.url(path))
    }

    /// Send an authenticated request and map error statuses
    async fn authed<F>(&self, method: Method, path: &str, attach: F) -> ClientResult<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let session = self.session().await?;

        let request = attach(
            self.request(method.clone(), path)
                .header(AUTHORIZATION, session.authorization()),
        );
        let response = self.send(&method, path, request).await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response).await;
        match status {
            StatusCode::UNAUTHORIZED => {
                tracing::info!(path, %message, "Token rejected, clearing session");
                self.store.clear().await?;
                Err(ClientError::SessionExpired(message))
            }
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
            _ => Err(ClientError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        request: RequestBuilder,
    ) -> ClientResult<Response> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();

        let result = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await;

        match result {
            Ok(response) => {
                tracing::debug!(
                    request_id = %request_id,
                    %method,
                    path,
                    status = response.status().as_u16(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "API request"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    %method,
                    path,
                    error = %e,
                    "API request failed"
                );
                Err(e.into())
            }
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Message from a failed response: the `detail` field when the body is
/// FastAPI-style JSON, the raw body otherwise, the status text as last resort
async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorDetail>(&text) {
        Ok(detail) => detail.message(),
        Err(_) if !text.trim().is_empty() => text,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    fn offline_client() -> FriendClient {
        FriendClient::new(
            ClientConfig {
                // Nothing listens here; validation and session checks must
                // fail before any request is made.
                base: ApiBase::parse("http://127.0.0.1:9").unwrap(),
                request_timeout: Duration::from_millis(200),
                session_lifetime_days: DEFAULT_LIFETIME_DAYS,
            },
            Arc::new(MemorySessionStore::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_default_client_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base.as_str(), "http://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.session_lifetime_days, 7);
    }

    #[tokio::test]
    async fn test_login_required_without_session() {
        let client = offline_client();
        assert!(matches!(
            client.friends().await,
            Err(ClientError::LoginRequired)
        ));
        assert!(matches!(
            client.chat_history().await,
            Err(ClientError::LoginRequired)
        ));
    }

    #[tokio::test]
    async fn test_validation_before_request() {
        let client = offline_client();
        assert!(matches!(
            client.create_friend("   ").await,
            Err(ClientError::Validation(_))
        ));
        assert!(matches!(
            client.send_message("\n").await,
            Err(ClientError::Validation(_))
        ));
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert!(matches!(
            client.add_conversation(1, " ", date).await,
            Err(ClientError::Validation(_))
        ));
        assert!(matches!(
            client.register(" ", "a@example.com", "pw").await,
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn test_session_lifetime_must_be_in_range() {
        for days in [0, -1, 3651, i64::MAX] {
            let result = FriendClient::new(
                ClientConfig {
                    session_lifetime_days: days,
                    ..ClientConfig::default()
                },
                Arc::new(MemorySessionStore::new()),
            );
            assert!(
                matches!(result, Err(ClientError::Validation(_))),
                "{} days accepted",
                days
            );
        }
    }

    #[tokio::test]
    async fn test_logout_without_session() {
        let client = offline_client();
        assert!(!client.logout().await.unwrap());
    }
}
