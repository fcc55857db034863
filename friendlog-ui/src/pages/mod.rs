//! Pages
//!
//! Top-level page components for each route.

pub mod add_conversation;
pub mod chat;
pub mod conversation_detail;
pub mod create_friend;
pub mod friend_detail;
pub mod home;
pub mod login;
pub mod mypage;
pub mod register;

pub use add_conversation::AddConversation;
pub use chat::Chat;
pub use conversation_detail::ConversationDetail;
pub use create_friend::CreateFriend;
pub use friend_detail::FriendDetail;
pub use home::Home;
pub use login::Login;
pub use mypage::MyPage;
pub use register::Register;

use leptos::*;
use leptos_router::*;
use std::str::FromStr;

/// Route parameter parsed as `T`; `None` when missing or malformed
pub(crate) fn use_param<T>(key: &'static str) -> Memo<Option<T>>
where
    T: FromStr + Clone + PartialEq + 'static,
{
    let params = use_params_map();
    create_memo(move |_| params.with(|p| p.get(key).and_then(|v| v.parse::<T>().ok())))
}
