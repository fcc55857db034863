//! Home Page
//!
//! The friend list.

use leptos::*;
use leptos_router::*;

use crate::api::{self, Friend};
use crate::components::{ErrorMessage, Loading};

#[component]
pub fn Home() -> impl IntoView {
    let navigate = use_navigate();

    let (friends, set_friends) = create_signal(Vec::<Friend>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    // Fetch friends on mount
    create_effect(move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::fetch_friends().await {
                Ok(list) => set_friends.set(list),
                Err(e) if e.needs_login() => navigate("/login", Default::default()),
                Err(_) => {
                    set_error.set(Some("An error occurred while fetching friends.".to_string()))
                }
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-gray-900">"Friends"</h1>
                <A
                    href="/create-friend"
                    class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white rounded-lg font-medium"
                >
                    "+ Add friend"
                </A>
            </div>

            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_view()
                } else if let Some(e) = error.get() {
                    view! { <ErrorMessage message=e /> }.into_view()
                } else {
                    let list = friends.get();
                    if list.is_empty() {
                        view! {
                            <p class="text-center text-gray-500 py-12">
                                "No friends yet. Add your first one!"
                            </p>
                        }.into_view()
                    } else {
                        view! {
                            <ul class="bg-white shadow rounded-lg divide-y divide-gray-200">
                                {list.into_iter().map(|friend| view! {
                                    <FriendRow friend=friend />
                                }).collect_view()}
                            </ul>
                        }.into_view()
                    }
                }
            }}
        </div>
    }
}

#[component]
fn FriendRow(friend: Friend) -> impl IntoView {
    view! {
        <li>
            <A
                href=format!("/friend/{}", friend.id)
                class="flex items-center justify-between px-4 py-4 hover:bg-gray-50"
            >
                <span class="text-lg font-medium text-gray-900">{friend.name}</span>
                <span class="text-gray-400">"›"</span>
            </A>
        </li>
    }
}
