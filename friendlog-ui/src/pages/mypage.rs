//! My Page
//!
//! Logout and the backend URL setting.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::global::GlobalState;

#[component]
pub fn MyPage() -> impl IntoView {
    let navigate = use_navigate();
    let (logging_out, set_logging_out) = create_signal(false);

    let on_logout = move |_: web_sys::MouseEvent| {
        set_logging_out.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            api::logout().await;
            navigate("/login", Default::default());
        });
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-gray-900">"My Page"</h1>

            <ApiSettings />

            <button
                on:click=on_logout
                disabled=move || logging_out.get()
                class="bg-red-500 hover:bg-red-600 disabled:bg-gray-400 text-white px-4 py-2 rounded"
            >
                "Logout"
            </button>
        </div>
    }
}

/// Backend URL stored in this browser
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());

    let state_for_save = state.clone();
    let save_url = move |_: web_sys::MouseEvent| {
        api::set_api_base(&api_url.get_untracked());
        set_api_url.set(api::get_api_base());
        state_for_save.show_success("API URL saved");
    };

    let reset_url = move |_: web_sys::MouseEvent| {
        api::set_api_base("");
        set_api_url.set(api::get_api_base());
        state.show_success("API URL reset");
    };

    view! {
        <section class="bg-white shadow rounded-lg p-6">
            <h2 class="text-lg font-medium text-gray-900 mb-4">"API Connection"</h2>
            <label class="block text-sm text-gray-500 mb-2">"Backend URL"</label>
            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| set_api_url.set(event_target_value(&ev))
                    class="flex-1 px-3 py-2 border border-gray-300 rounded-md text-black"
                />
                <button
                    on:click=save_url
                    class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 text-white rounded-md"
                >
                    "Save"
                </button>
                <button
                    on:click=reset_url
                    class="px-4 py-2 bg-gray-200 hover:bg-gray-300 text-gray-700 rounded-md"
                >
                    "Reset"
                </button>
            </div>
            <p class="mt-2 text-xs text-gray-400">
                "Default: " {api::DEFAULT_API_BASE}
            </p>
        </section>
    }
}
