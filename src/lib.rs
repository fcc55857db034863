//! # Friendlog
//!
//! Client library for the friendlog backend: keep track of friends, what
//! you know about them, and the conversations you had, and ask the
//! assistant questions about them.
//!
//! ## Modules
//!
//! - [`endpoint`]: API base-URL resolution
//! - [`session`]: Bearer-token persistence (7-day lifetime)
//! - [`client`]: REST client for auth, friends, conversations and chat
//! - [`attributes`]: Local editing of a friend's attribute list
//! - [`models`]: Records exchanged with the backend
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use friendlog::{ApiBase, Config, FriendClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let client = FriendClient::from_config(&config, ApiBase::resolve(None, &config)?)?;
//!
//!     client.login("me@example.com", "secret").await?;
//!
//!     for friend in client.friends().await? {
//!         let details = client.friend_details(friend.id).await?;
//!         println!("{}: {} attributes", details.friend_name, details.attributes.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod attributes;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod models;
pub mod session;

pub use attributes::{AttributeDraft, DraftError};
pub use client::{ClientConfig, ClientError, ClientResult, FriendClient};
pub use config::{Config, ConfigError, LoggingConfig};
pub use endpoint::{ApiBase, DEFAULT_API_URL};
pub use models::{
    AuthResponse, ChatMessage, ChatResponse, Conversation, Friend, FriendAttribute, FriendDetails,
};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionError, SessionStore};
