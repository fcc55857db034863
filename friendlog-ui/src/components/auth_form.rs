//! Login / Register Form
//!
//! Shared form for both auth pages. On success the token cookie is set and
//! the user lands on `/home`.

use leptos::*;
use leptos_router::*;

use crate::api;

/// Email/password form; `is_login = false` adds a name field and registers
#[component]
pub fn AuthForm(is_login: bool) -> impl IntoView {
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let (n, e, p) = (name.get(), email.get(), password.get());
        if e.trim().is_empty() || p.is_empty() || (!is_login && n.trim().is_empty()) {
            set_error.set(Some("Please fill in all fields.".to_string()));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = if is_login {
                api::login(e.trim(), &p).await
            } else {
                api::register(n.trim(), e.trim(), &p).await
            };

            match result {
                Ok(()) => navigate("/home", Default::default()),
                Err(err) => {
                    let message = if is_login { "Login failed" } else { "Registration failed" };
                    set_error.set(Some(format!("{}: {}", message, err)));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-6">
            {(!is_login).then(|| view! {
                <Field label="Name" kind="text" value=name set_value=set_name />
            })}
            <Field label="Email address" kind="email" value=email set_value=set_email />
            <Field label="Password" kind="password" value=password set_value=set_password />

            {move || error.get().map(|e| view! {
                <p class="text-sm text-red-600">{e}</p>
            })}

            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full flex justify-center py-2 px-4 rounded-md shadow-sm text-sm font-medium
                       text-white bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-400"
            >
                {move || match (submitting.get(), is_login) {
                    (true, _) => "Please wait...",
                    (false, true) => "Sign in",
                    (false, false) => "Register",
                }}
            </button>
        </form>
    }
}

#[component]
fn Field(
    label: &'static str,
    kind: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700">{label}</label>
            <input
                type=kind
                required=true
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
                class="mt-1 block w-full px-3 py-2 border border-gray-300 rounded-md shadow-sm
                       text-black focus:outline-none focus:ring-indigo-500 focus:border-indigo-500"
            />
        </div>
    }
}
