//! Chat Page
//!
//! Conversation with the assistant. Past exchanges are loaded on mount.

use leptos::*;
use leptos_router::*;

use crate::api::{self, ChatMessage};
use crate::state::global::GlobalState;

/// Shown when the assistant returned no answer
const NO_ANSWER: &str = "(no answer)";

/// One speech bubble
#[derive(Clone, Debug, PartialEq)]
struct Bubble {
    text: String,
    /// Sent by the user rather than the assistant
    sent: bool,
}

impl Bubble {
    fn sent(text: impl Into<String>) -> Self {
        Self { text: text.into(), sent: true }
    }

    fn answer(message: &ChatMessage) -> Self {
        let text = message
            .response
            .as_ref()
            .and_then(|r| r.final_answer.clone())
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| NO_ANSWER.to_string());
        Self { text, sent: false }
    }
}

/// Question and answer bubbles for each stored exchange, oldest first
fn bubbles(history: &[ChatMessage]) -> Vec<Bubble> {
    history
        .iter()
        .flat_map(|m| [Bubble::sent(m.content.clone()), Bubble::answer(m)])
        .collect()
}

/// Stored exchanges followed by bubbles added while the history was loading
fn with_history(history: &[ChatMessage], pending: Vec<Bubble>) -> Vec<Bubble> {
    let mut all = bubbles(history);
    all.extend(pending);
    all
}

#[component]
pub fn Chat() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let messages = create_rw_signal(Vec::<Bubble>::new());
    let (input, set_input) = create_signal(String::new());
    let (sending, set_sending) = create_signal(false);

    // Load history on mount
    let navigate_for_history = navigate.clone();
    let state_for_history = state.clone();
    create_effect(move |_| {
        let navigate = navigate_for_history.clone();
        let state = state_for_history.clone();
        spawn_local(async move {
            match api::fetch_chat_history().await {
                Ok(history) => messages.update(|m| *m = with_history(&history, std::mem::take(m))),
                Err(e) if e.needs_login() => navigate("/login", Default::default()),
                Err(_) => state.show_error("Failed to load chat history"),
            }
        });
    });

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || sending.get_untracked() {
            return;
        }

        messages.update(|m| m.push(Bubble::sent(text.clone())));
        set_input.set(String::new());
        set_sending.set(true);

        let navigate = navigate.clone();
        let state = state.clone();
        spawn_local(async move {
            match api::send_message(text.trim()).await {
                Ok(reply) => messages.update(|m| m.push(Bubble::answer(&reply))),
                Err(e) if e.needs_login() => navigate("/login", Default::default()),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to send message: {}", e).into());
                    state.show_error("Failed to send message");
                }
            }
            set_sending.set(false);
        });
    };
    let send_on_enter = send.clone();

    view! {
        <div class="space-y-4 pb-20">
            {move || messages.get().into_iter().map(|b| {
                let (row, bubble) = if b.sent {
                    ("flex justify-end", "bg-blue-500 text-white")
                } else {
                    ("flex justify-start", "bg-white text-gray-900 shadow")
                };
                view! {
                    <div class=row>
                        <div class=format!("max-w-xs lg:max-w-md px-4 py-2 rounded-lg whitespace-pre-wrap {}", bubble)>
                            {b.text}
                        </div>
                    </div>
                }
            }).collect_view()}

            {move || sending.get().then(|| view! {
                <div class="flex justify-start text-gray-400">"..."</div>
            })}
        </div>

        <div class="fixed bottom-16 left-0 right-0 bg-white p-4 border-t border-gray-200">
            <div class="flex space-x-2">
                <input
                    type="text"
                    placeholder="Type a message..."
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            send_on_enter();
                        }
                    }
                    class="flex-grow px-4 py-2 border rounded-full text-black"
                />
                <button
                    on:click=move |_| send()
                    disabled=move || sending.get()
                    class="px-4 py-2 bg-blue-500 hover:bg-blue-600 disabled:bg-gray-400 text-white rounded-full"
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChatResponse;

    fn message(content: &str, answer: Option<&str>) -> ChatMessage {
        ChatMessage {
            content: content.to_string(),
            created_at: "2024-05-01T10:00:00".to_string(),
            response: Some(ChatResponse {
                final_answer: answer.map(str::to_string),
                created_at: "2024-05-01T10:00:02".to_string(),
            }),
        }
    }

    #[test]
    fn test_bubbles_interleave_question_and_answer() {
        let history = vec![
            message("What does Aki like?", Some("Hiking and coffee.")),
            message("Birthday?", None),
        ];

        assert_eq!(
            bubbles(&history),
            vec![
                Bubble::sent("What does Aki like?"),
                Bubble { text: "Hiking and coffee.".to_string(), sent: false },
                Bubble::sent("Birthday?"),
                Bubble { text: NO_ANSWER.to_string(), sent: false },
            ]
        );
    }

    #[test]
    fn test_history_keeps_messages_sent_while_loading() {
        let history = vec![message("Earlier question", Some("Earlier answer"))];
        let pending = vec![
            Bubble::sent("New question"),
            Bubble { text: "New answer".to_string(), sent: false },
        ];

        let merged = with_history(&history, pending);
        let texts: Vec<&str> = merged.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(
            texts,
            ["Earlier question", "Earlier answer", "New question", "New answer"]
        );
    }

    #[test]
    fn test_answer_without_response() {
        let mut m = message("hi", Some("hello"));
        m.response = None;
        assert_eq!(Bubble::answer(&m).text, NO_ANSWER);
    }
}
