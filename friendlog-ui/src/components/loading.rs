//! Loading and Error States

use leptos::*;

/// Full-page loading message
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center h-64 text-gray-500">
            "Loading..."
        </div>
    }
}

/// Full-page error message
#[component]
pub fn ErrorMessage(
    #[prop(into)]
    message: String,
) -> impl IntoView {
    view! {
        <div class="flex justify-center items-center h-64 text-red-500">
            {message}
        </div>
    }
}
