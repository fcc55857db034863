//! Friend Detail Page
//!
//! Shows a friend's attributes and logged conversations. Attributes are
//! edited locally and saved as a whole list.

use leptos::*;
use leptos_router::*;

use crate::api::{self, Conversation, FriendAttribute, FriendDetails};
use crate::components::{ErrorMessage, Loading};
use crate::pages::use_param;
use crate::state::global::GlobalState;

#[component]
pub fn FriendDetail() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let friend_id = use_param::<i64>("id");

    let details = create_rw_signal(None::<FriendDetails>);
    let editing = create_rw_signal(Vec::<FriendAttribute>::new());
    let (is_editing, set_is_editing) = create_signal(false);
    let (saving, set_saving) = create_signal(false);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);

    // Fetch details on mount and whenever the route's friend changes
    let navigate_for_fetch = navigate.clone();
    create_effect(move |_| {
        let id = friend_id.get();
        let navigate = navigate_for_fetch.clone();
        set_loading.set(true);

        spawn_local(async move {
            let Some(id) = id else {
                set_error.set(Some("Invalid friend ID".to_string()));
                set_loading.set(false);
                return;
            };

            match api::fetch_friend_details(id).await {
                Ok(d) => {
                    editing.set(d.attributes.clone());
                    details.set(Some(d));
                    set_error.set(None);
                }
                Err(e) if e.needs_login() => navigate("/login", Default::default()),
                Err(_) => set_error.set(Some("Failed to fetch friend details".to_string())),
            }
            set_loading.set(false);
        });
    });

    let on_cancel = move |_: web_sys::MouseEvent| {
        editing.set(
            details.with_untracked(|d| d.as_ref().map(|d| d.attributes.clone()).unwrap_or_default()),
        );
        set_is_editing.set(false);
    };

    let on_save = move |_: web_sys::MouseEvent| {
        let Some(id) = friend_id.get_untracked() else {
            return;
        };
        let attributes = cleaned(editing.get_untracked());

        set_saving.set(true);
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::update_attributes(id, &attributes).await {
                Ok(()) => {
                    editing.set(attributes.clone());
                    details.update(|d| {
                        if let Some(d) = d {
                            d.attributes = attributes;
                        }
                    });
                    set_is_editing.set(false);
                    state.show_success("Friend details updated successfully.");
                }
                Err(e) if e.needs_login() => navigate("/login", Default::default()),
                Err(_) => state.show_error("Failed to update friend details"),
            }
            set_saving.set(false);
        });
    };

    view! {
        {move || {
            if loading.get() {
                return view! { <Loading /> }.into_view();
            }
            if let Some(e) = error.get() {
                return view! { <ErrorMessage message=e /> }.into_view();
            }
            let Some(d) = details.get() else {
                return view! {}.into_view();
            };
            let id = friend_id.get().unwrap_or_default();
            let on_save = on_save.clone();

            view! {
                <div class="space-y-6">
                    <A href="/home" class="text-blue-600">"‹ Back to Friends"</A>
                    <h1 class="text-2xl font-bold text-indigo-400">{d.friend_name.clone()}</h1>

                    <section class="bg-white shadow sm:rounded-lg">
                        <div class="px-4 py-5 sm:px-6 flex justify-between items-center">
                            <h3 class="text-lg font-medium text-gray-900">"Friend Details"</h3>
                            {move || (!is_editing.get()).then(|| view! {
                                <button on:click=move |_| set_is_editing.set(true) class="text-blue-600">
                                    "✎ Edit"
                                </button>
                            })}
                        </div>

                        {move || {
                            if is_editing.get() {
                                view! { <AttributeEditor editing=editing /> }.into_view()
                            } else {
                                view! {
                                    <AttributeList attributes=details.with(|d| {
                                        d.as_ref().map(|d| d.attributes.clone()).unwrap_or_default()
                                    }) />
                                }.into_view()
                            }
                        }}

                        {move || is_editing.get().then(|| view! {
                            <div class="px-4 py-4 flex justify-end space-x-2 border-t border-gray-200">
                                <button
                                    on:click=on_cancel
                                    class="px-4 py-2 bg-gray-200 text-gray-700 rounded-md"
                                >
                                    "Cancel"
                                </button>
                                <button
                                    on:click=on_save.clone()
                                    disabled=move || saving.get()
                                    class="px-4 py-2 bg-indigo-600 disabled:bg-gray-400 text-white rounded-md"
                                >
                                    {move || if saving.get() { "Saving..." } else { "Save" }}
                                </button>
                            </div>
                        })}
                    </section>

                    <ConversationList friend_id=id conversations=d.conversations />
                </div>
            }.into_view()
        }}
    }
}

/// Read-only attribute table
#[component]
fn AttributeList(attributes: Vec<FriendAttribute>) -> impl IntoView {
    if attributes.is_empty() {
        return view! {
            <p class="px-4 py-5 sm:px-6 text-gray-500">"No attributes yet."</p>
        }
        .into_view();
    }

    view! {
        <dl class="border-t border-gray-200">
            {attributes.into_iter().map(|a| view! {
                <div class="px-4 py-4 sm:grid sm:grid-cols-3 sm:gap-4 sm:px-6 odd:bg-gray-50">
                    <dt class="text-sm font-medium text-gray-500">{a.attribute_name}</dt>
                    <dd class="mt-1 text-sm text-gray-900 sm:mt-0 sm:col-span-2">{a.value}</dd>
                </div>
            }).collect_view()}
        </dl>
    }
    .into_view()
}

/// Editable attribute rows
#[component]
fn AttributeEditor(editing: RwSignal<Vec<FriendAttribute>>) -> impl IntoView {
    // Re-render the rows only when one is added or removed, so inputs keep focus
    let count = create_memo(move |_| editing.with(Vec::len));

    view! {
        <div class="border-t border-gray-200 px-4 py-4 space-y-3">
            {move || (0..count.get()).map(|index| view! {
                <AttributeEditRow index=index editing=editing />
            }).collect_view()}

            <button
                on:click=move |_| editing.update(|list| list.push(FriendAttribute {
                    attribute_name: String::new(),
                    value: String::new(),
                }))
                class="text-blue-600"
            >
                "+ Add attribute"
            </button>
        </div>
    }
}

#[component]
fn AttributeEditRow(index: usize, editing: RwSignal<Vec<FriendAttribute>>) -> impl IntoView {
    let field = move |f: fn(&FriendAttribute) -> &String| {
        editing.with(|list| list.get(index).map(|a| f(a).clone()).unwrap_or_default())
    };

    let on_delete = move |_: web_sys::MouseEvent| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Are you sure you want to delete this attribute?").ok())
            .unwrap_or(false);
        if confirmed {
            editing.update(|list| {
                if index < list.len() {
                    list.remove(index);
                }
            });
        }
    };

    view! {
        <div class="flex space-x-2 items-center">
            <input
                type="text"
                placeholder="Attribute"
                prop:value=move || field(|a| &a.attribute_name)
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    editing.update(|list| {
                        if let Some(a) = list.get_mut(index) {
                            a.attribute_name = v;
                        }
                    });
                }
                class="w-1/3 px-2 py-1 border border-gray-300 rounded text-black"
            />
            <input
                type="text"
                placeholder="Value"
                prop:value=move || field(|a| &a.value)
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    editing.update(|list| {
                        if let Some(a) = list.get_mut(index) {
                            a.value = v;
                        }
                    });
                }
                class="flex-grow px-2 py-1 border border-gray-300 rounded text-black"
            />
            <button on:click=on_delete class="text-red-600" title="Delete">"🗑"</button>
        </div>
    }
}

/// Conversations, each linking to its detail page by position
#[component]
fn ConversationList(friend_id: i64, conversations: Vec<Conversation>) -> impl IntoView {
    view! {
        <section class="bg-white shadow sm:rounded-lg">
            <div class="px-4 py-5 sm:px-6 flex justify-between items-center">
                <h3 class="text-lg font-medium text-gray-900">"Conversations"</h3>
                <A href=format!("/friend/{}/add-conversation", friend_id) class="text-blue-600">
                    "+ Add"
                </A>
            </div>
            {if conversations.is_empty() {
                view! {
                    <p class="px-4 pb-5 sm:px-6 text-gray-500">"No conversations yet."</p>
                }.into_view()
            } else {
                view! {
                    <ul class="border-t border-gray-200 divide-y divide-gray-200">
                        {conversations.into_iter().enumerate().map(|(index, c)| view! {
                            <li>
                                <A
                                    href=format!("/friend/{}/conversation/{}", friend_id, index)
                                    class="block px-4 py-4 sm:px-6 hover:bg-gray-50"
                                >
                                    <p class="text-sm text-gray-500">{c.conversation_date}</p>
                                    <p class="text-gray-900 truncate">{c.context}</p>
                                </A>
                            </li>
                        }).collect_view()}
                    </ul>
                }.into_view()
            }}
        </section>
    }
}

/// Attributes worth saving: rows with a blank name are dropped
fn cleaned(attributes: Vec<FriendAttribute>) -> Vec<FriendAttribute> {
    attributes
        .into_iter()
        .filter(|a| !a.attribute_name.trim().is_empty())
        .map(|a| FriendAttribute {
            attribute_name: a.attribute_name.trim().to_string(),
            value: a.value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, value: &str) -> FriendAttribute {
        FriendAttribute {
            attribute_name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_cleaned_drops_blank_names() {
        let result = cleaned(vec![
            attr(" hobby ", "hiking"),
            attr("", "orphan value"),
            attr("   ", ""),
            attr("job", ""),
        ]);
        assert_eq!(result, vec![attr("hobby", "hiking"), attr("job", "")]);
    }
}
