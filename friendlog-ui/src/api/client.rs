//! HTTP API Client
//!
//! Functions for communicating with the friendlog REST API. Every
//! authenticated call reads the token cookie first and fails with
//! [`FetchError::LoginRequired`] when it is missing; a `401` answer removes
//! the cookie.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::fmt;

use super::session;
use super::types::*;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Local storage key for a user-chosen API base URL
const API_URL_KEY: &str = "friendlog_api_url";

/// Get the API base URL: local storage, then the build-time
/// `FRIENDLOG_API_URL`, then the default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten());

    resolve_api_base(stored.as_deref(), option_env!("FRIENDLOG_API_URL"))
}

/// Set the API base URL in local storage; an empty URL resets it
pub fn set_api_base(url: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let url = url.trim();
        if url.is_empty() {
            let _ = storage.remove_item(API_URL_KEY);
        } else {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

/// Pick the first non-blank candidate and normalize it
pub fn resolve_api_base(stored: Option<&str>, build_time: Option<&str>) -> String {
    let url = [stored, build_time]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE);

    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

fn url(path: &str) -> String {
    format!("{}{}", get_api_base(), path)
}

// ============ Errors ============

#[derive(Clone, Debug, PartialEq)]
pub enum FetchError {
    /// No token cookie
    LoginRequired,
    /// Backend rejected the token; the cookie has been removed
    Unauthorized(String),
    NotFound(String),
    Api { status: u16, message: String },
    Network(String),
    Parse(String),
}

impl FetchError {
    /// Whether the page should send the user to `/login`
    pub fn needs_login(&self) -> bool {
        matches!(self, FetchError::LoginRequired | FetchError::Unauthorized(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::LoginRequired => write!(f, "Not logged in"),
            FetchError::Unauthorized(m) => write!(f, "Invalid credentials: {}", m),
            FetchError::NotFound(m) => write!(f, "Not found: {}", m),
            FetchError::Api { status, message } => write!(f, "Error {}: {}", status, message),
            FetchError::Network(m) => write!(f, "Network error: {}", m),
            FetchError::Parse(m) => write!(f, "Parse error: {}", m),
        }
    }
}

impl From<gloo_net::Error> for FetchError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => FetchError::Parse(e.to_string()),
            other => FetchError::Network(other.to_string()),
        }
    }
}

// ============ Plumbing ============

fn authorized(builder: RequestBuilder) -> Result<RequestBuilder, FetchError> {
    let token = session::get_token().ok_or(FetchError::LoginRequired)?;
    Ok(builder.header("Authorization", &format!("Bearer {}", token)))
}

async fn error_message(response: Response) -> String {
    let status_text = response.status_text();
    let text = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorDetail>(&text) {
        Ok(detail) => detail.message(),
        Err(_) if !text.trim().is_empty() => text,
        Err(_) => status_text,
    }
}

async fn check(response: Response) -> Result<Response, FetchError> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let url = response.url();
    let message = error_message(response).await;
    web_sys::console::error_1(&format!("{} failed ({}): {}", url, status, message).into());

    match status {
        401 => {
            session::clear_token();
            Err(FetchError::Unauthorized(message))
        }
        404 => Err(FetchError::NotFound(message)),
        _ => Err(FetchError::Api { status, message }),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    response
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))
}

// ============ Auth ============

/// Log in and store the token cookie
pub async fn login(email: &str, password: &str) -> Result<(), FetchError> {
    let response = Request::post(&url("/auth/login"))
        .json(&serde_json::json!({ "email": email, "password": password }))?
        .send()
        .await?;

    let response = check(response).await?;
    let auth: AuthResponse = decode(response).await?;
    session::set_token(&auth.access_token);
    Ok(())
}

/// Create an account and store the token cookie
pub async fn register(name: &str, email: &str, password: &str) -> Result<(), FetchError> {
    let response = Request::post(&url("/auth/register"))
        .json(&serde_json::json!({ "name": name, "email": email, "password": password }))?
        .send()
        .await?;

    let response = check(response).await?;
    let auth: AuthResponse = decode(response).await?;
    session::set_token(&auth.access_token);
    Ok(())
}

/// Best-effort backend logout; the cookie is removed regardless
pub async fn logout() {
    if let Ok(request) = authorized(Request::post(&url("/auth/logout"))) {
        let _ = request.send().await;
    }
    session::clear_token();
}

// ============ Friends ============

pub async fn fetch_friends() -> Result<Vec<Friend>, FetchError> {
    let response = authorized(Request::get(&url("/friends/")))?.send().await?;
    decode(check(response).await?).await
}

pub async fn create_friend(name: &str) -> Result<Friend, FetchError> {
    let response = authorized(Request::post(&url("/friends/")))?
        .json(&serde_json::json!({ "name": name }))?
        .send()
        .await?;
    decode(check(response).await?).await
}

pub async fn fetch_friend_details(friend_id: i64) -> Result<FriendDetails, FetchError> {
    let response = authorized(Request::get(&url(&format!("/friends/{}", friend_id))))?
        .send()
        .await?;
    decode(check(response).await?).await
}

/// Replace the friend's attribute list
pub async fn update_attributes(
    friend_id: i64,
    attributes: &[FriendAttribute],
) -> Result<(), FetchError> {
    let response = authorized(Request::put(&url(&format!("/friends/{}", friend_id))))?
        .json(&serde_json::json!({ "attributes": attributes }))?
        .send()
        .await?;
    check(response).await?;
    Ok(())
}

pub async fn add_conversation(
    friend_id: i64,
    context: &str,
    conversation_date: &str,
) -> Result<(), FetchError> {
    let response = authorized(Request::post(&url(&format!(
        "/friends/{}/conversations",
        friend_id
    ))))?
    .json(&serde_json::json!({
        "context": context,
        "conversation_date": conversation_date,
    }))?
    .send()
    .await?;
    check(response).await?;
    Ok(())
}

// ============ Chat ============

pub async fn fetch_chat_history() -> Result<Vec<ChatMessage>, FetchError> {
    let response = authorized(Request::get(&url("/chats")))?.send().await?;
    decode(check(response).await?).await
}

pub async fn send_message(content: &str) -> Result<ChatMessage, FetchError> {
    let response = authorized(Request::post(&url("/chat")))?
        .json(&serde_json::json!({ "content": content }))?
        .send()
        .await?;
    decode(check(response).await?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_base_order() {
        assert_eq!(
            resolve_api_base(Some("https://stored.example.com/"), Some("https://build.example.com")),
            "https://stored.example.com"
        );
        assert_eq!(
            resolve_api_base(Some("  "), Some("https://build.example.com/api/")),
            "https://build.example.com/api"
        );
        assert_eq!(resolve_api_base(None, None), DEFAULT_API_BASE);
    }

    #[test]
    fn test_needs_login() {
        assert!(FetchError::LoginRequired.needs_login());
        assert!(FetchError::Unauthorized("x".to_string()).needs_login());
        assert!(!FetchError::Network("down".to_string()).needs_login());
    }
}
