//! Toast Notification Component
//!
//! Shows the success and error messages held in [`GlobalState`].

use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed top-4 left-4 right-4 z-50 space-y-2 max-w-md mx-auto">
            {move || {
                state.success.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Success />
                })
            }}

            {move || {
                state.error.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Error />
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastVariant {
    Success,
    Error,
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    variant: ToastVariant,
) -> impl IntoView {
    let class = match variant {
        ToastVariant::Success => "bg-green-100 border-green-400 text-green-700",
        ToastVariant::Error => "bg-red-100 border-red-400 text-red-700",
    };

    view! {
        <div class=format!("border px-4 py-3 rounded shadow {}", class) role="alert">
            <span class="block sm:inline">{message}</span>
        </div>
    }
}
