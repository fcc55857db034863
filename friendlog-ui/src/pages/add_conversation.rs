//! Add Conversation Page

use chrono::NaiveDate;
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::pages::use_param;

#[component]
pub fn AddConversation() -> impl IntoView {
    let navigate = use_navigate();
    let friend_id = use_param::<i64>("id");

    let (context, set_context) = create_signal(String::new());
    let (date, set_date) = create_signal(today());
    let (submitting, set_submitting) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if !api::has_token() {
            navigate("/login", Default::default());
            return;
        }
        let Some(id) = friend_id.get_untracked() else {
            set_error.set(Some("Invalid friend ID".to_string()));
            return;
        };
        let text = context.get_untracked();
        if text.trim().is_empty() {
            set_error.set(Some("Please describe the conversation.".to_string()));
            return;
        }
        let Some(day) = parse_date(&date.get_untracked()) else {
            set_error.set(Some("Please pick a valid date.".to_string()));
            return;
        };

        set_submitting.set(true);
        set_error.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            let date = day.format("%Y-%m-%d").to_string();
            match api::add_conversation(id, text.trim(), &date).await {
                Ok(()) => navigate(&format!("/friend/{}", id), Default::default()),
                Err(e) if e.needs_login() => navigate("/login", Default::default()),
                Err(_) => set_error.set(Some(
                    "An error occurred while creating the conversation.".to_string(),
                )),
            }
            set_submitting.set(false);
        });
    };

    let back = move || {
        friend_id
            .get()
            .map(|id| format!("/friend/{}", id))
            .unwrap_or_else(|| "/home".to_string())
    };

    view! {
        <div class="space-y-4">
            <A href=back class="text-blue-600">"‹ Back to Friend Details"</A>
            <h1 class="text-2xl font-bold text-gray-900">"Add New Conversation"</h1>

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label for="context" class="block text-sm font-medium text-gray-700">"Context"</label>
                    <textarea
                        id="context"
                        rows="4"
                        prop:value=move || context.get()
                        on:input=move |ev| set_context.set(event_target_value(&ev))
                        class="mt-1 block w-full px-3 py-2 border border-gray-300 rounded-md text-black"
                    />
                </div>
                <div>
                    <label for="conversation-date" class="block text-sm font-medium text-gray-700">
                        "Conversation Date"
                    </label>
                    <input
                        id="conversation-date"
                        type="date"
                        prop:value=move || date.get()
                        on:input=move |ev| set_date.set(event_target_value(&ev))
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
                    {move || if submitting.get() { "Creating..." } else { "Create Conversation" }}
                </button>
            </form>
        </div>
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Date from an `<input type="date">` value (`YYYY-MM-DD`)
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-09"), NaiveDate::from_ymd_opt(2024, 3, 9));
        assert_eq!(parse_date(" 2024-03-09 "), NaiveDate::from_ymd_opt(2024, 3, 9));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("03/09/2024"), None);
    }
}
