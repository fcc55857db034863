//! Data Model
//!
//! Records exchanged with the friendlog backend. Field names match the
//! backend's JSON exactly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked friend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

/// Free-form key/value pair describing a friend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendAttribute {
    pub attribute_name: String,
    pub value: String,
}

impl FriendAttribute {
    pub fn new(attribute_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            value: value.into(),
        }
    }
}

/// Logged conversation with a friend.
///
/// Conversations have no identifier of their own; they are addressed by
/// their position in [`FriendDetails::conversations`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub context: String,
    pub conversation_date: String,
}

/// Everything the detail page shows for one friend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendDetails {
    pub friend_name: String,
    #[serde(default)]
    pub attributes: Vec<FriendAttribute>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

impl FriendDetails {
    /// Conversation at `index`, if any
    pub fn conversation(&self, index: usize) -> Option<&Conversation> {
        self.conversations.get(index)
    }
}

/// Chat message as sent by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageSend {
    pub content: String,
}

/// Chat message as returned by the backend, with the assistant's reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub response: Option<ChatResponse>,
}

impl ChatMessage {
    /// The assistant's answer, when one has been produced
    pub fn answer(&self) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|r| r.final_answer.as_deref())
    }
}

/// Assistant reply attached to a chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub final_answer: Option<String>,
    pub created_at: String,
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Answer to login and register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateFriendRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateAttributesRequest {
    pub attributes: Vec<FriendAttribute>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationInput {
    pub context: String,
    #[serde(with = "date_format")]
    pub conversation_date: NaiveDate,
}

/// FastAPI-style error body: `{"detail": ...}`
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Human-readable message: string details as-is, anything else as JSON
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

mod date_format {
    use chrono::NaiveDate;
    use serde::Serializer;

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friend_details_defaults() {
        let details: FriendDetails = serde_json::from_str(r#"{"friend_name": "Aki"}"#).unwrap();
        assert_eq!(details.friend_name, "Aki");
        assert!(details.attributes.is_empty());
        assert!(details.conversation(0).is_none());
    }

    #[test]
    fn test_chat_message_without_response() {
        let msg: ChatMessage = serde_json::from_str(
            r#"{"content": "hello", "created_at": "2024-08-10T11:02:00", "response": null}"#,
        )
        .unwrap();
        assert!(msg.response.is_none());
        assert_eq!(msg.answer(), None);
    }

    #[test]
    fn test_chat_message_answer() {
        let msg: ChatMessage = serde_json::from_str(
            r#"{
                "content": "what does Aki like?",
                "created_at": "2024-08-10T11:02:00",
                "response": {"final_answer": "Aki likes hiking.", "created_at": "2024-08-10T11:02:03"}
            }"#,
        )
        .unwrap();
        assert_eq!(msg.answer(), Some("Aki likes hiking."));
    }

    #[test]
    fn test_auth_response_token_type_default() {
        let auth: AuthResponse = serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(auth.token_type, "bearer");
        assert!(auth.id.is_none());
    }

    #[test]
    fn test_conversation_input_date_format() {
        let input = ConversationInput {
            context: "Lunch at the station".to_string(),
            conversation_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["conversation_date"], "2024-08-01");
    }

    #[test]
    fn test_error_detail_message() {
        let detail: ErrorDetail =
            serde_json::from_str(r#"{"detail": "Could not validate credentials"}"#).unwrap();
        assert_eq!(detail.message(), "Could not validate credentials");

        let detail: ErrorDetail =
            serde_json::from_str(r#"{"detail": [{"loc": ["body", "email"]}]}"#).unwrap();
        assert!(detail.message().contains("email"));
    }
}
