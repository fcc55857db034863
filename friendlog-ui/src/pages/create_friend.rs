//! Create Friend Page

use leptos::*;
use leptos_router::*;

use crate::api;

#[component]
pub fn CreateFriend() -> impl IntoView {
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let n = name.get();
        if n.trim().is_empty() {
            set_error.set(Some("Please enter a name.".to_string()));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::create_friend(n.trim()).await {
                Ok(_) => navigate("/home", Default::default()),
                Err(e) if e.needs_login() => navigate("/login", Default::default()),
                Err(_) => set_error.set(Some(
                    "An error occurred while creating friend.".to_string(),
                )),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="space-y-4">
            <A href="/home" class="text-blue-600">"‹ Back to Friends"</A>
            <h1 class="text-2xl font-bold text-gray-900">"Add a Friend"</h1>

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm font-medium text-gray-700">"Name"</label>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        class="mt-1 block w-full px-3 py-2 border border-gray-300 rounded-md text-black"
                    />
                </div>

                {move || error.get().map(|e| view! { <p class="text-red-500">{e}</p> })}

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full py-2 px-4 bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-400
                           text-white rounded-md font-medium"
                >
                    {move || if submitting.get() { "Creating..." } else { "Create Friend" }}
                </button>
            </form>
        </div>
    }
}
