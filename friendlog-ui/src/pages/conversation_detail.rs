//! Conversation Detail Page
//!
//! A conversation has no id of its own; it is addressed by its position in
//! the friend's conversation list.

use leptos::*;
use leptos_router::*;

use crate::api::{self, Conversation, FetchError};
use crate::components::{ErrorMessage, Loading};
use crate::pages::use_param;

#[component]
pub fn ConversationDetail() -> impl IntoView {
    let navigate = use_navigate();
    let friend_id = use_param::<i64>("id");
    let index = use_param::<usize>("index");

    let (conversation, set_conversation) = create_signal(None::<Conversation>);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let ids = (friend_id.get(), index.get());
        let navigate = navigate.clone();
        set_loading.set(true);

        spawn_local(async move {
            let (Some(id), Some(index)) = ids else {
                set_error.set(Some("Invalid conversation ID".to_string()));
                set_loading.set(false);
                return;
            };

            match api::fetch_friend_details(id).await {
                Ok(details) => match details.conversations.get(index) {
                    Some(c) => {
                        set_conversation.set(Some(c.clone()));
                        set_error.set(None);
                    }
                    None => set_error.set(Some("Conversation not found".to_string())),
                },
                Err(e) if e.needs_login() => navigate("/login", Default::default()),
                Err(FetchError::NotFound(_)) => {
                    set_error.set(Some("Conversation not found".to_string()))
                }
                Err(_) => set_error.set(Some("Failed to fetch conversation details".to_string())),
            }
            set_loading.set(false);
        });
    });

    let back = move || {
        friend_id
            .get()
            .map(|id| format!("/friend/{}", id))
            .unwrap_or_else(|| "/home".to_string())
    };

    view! {
        {move || {
            if loading.get() {
                return view! { <Loading /> }.into_view();
            }
            if let Some(e) = error.get() {
                return view! { <ErrorMessage message=e /> }.into_view();
            }
            let Some(c) = conversation.get() else {
                return view! {}.into_view();
            };

            view! {
                <div class="space-y-4">
                    <A href=back class="text-blue-600">"‹ Back to Friend Details"</A>
                    <h1 class="text-2xl font-bold text-gray-900">"Conversation Detail"</h1>
                    <div class="bg-white shadow sm:rounded-lg">
                        <div class="px-4 py-5 sm:px-6">
                            <h3 class="text-lg font-medium text-gray-900">{c.conversation_date}</h3>
                        </div>
                        <dl class="border-t border-gray-200 px-4 py-5 sm:grid sm:grid-cols-3 sm:gap-4 sm:px-6">
                            <dt class="text-sm font-medium text-gray-500">"Context"</dt>
                            <dd class="mt-1 text-sm text-gray-900 whitespace-pre-wrap sm:mt-0 sm:col-span-2">
                                {c.context}
                            </dd>
                        </dl>
                    </div>
                </div>
            }.into_view()
        }}
    }
}
