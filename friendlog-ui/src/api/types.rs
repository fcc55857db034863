//! Records exchanged with the backend

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Friend {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FriendAttribute {
    pub attribute_name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Conversation {
    pub context: String,
    pub conversation_date: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FriendDetails {
    pub friend_name: String,
    #[serde(default)]
    pub attributes: Vec<FriendAttribute>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

/// Chat message with the assistant's reply, as the backend returns it
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub response: Option<ChatResponse>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub final_answer: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
}

/// FastAPI error body
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
