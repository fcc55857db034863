//! Navigation Component
//!
//! Bottom navigation bar shown on every page.

use leptos::*;
use leptos_router::*;

/// Bottom navigation bar
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="fixed bottom-0 left-0 right-0 bg-white shadow-lg border-t border-gray-200">
            <div class="max-w-screen-xl mx-auto px-4">
                <div class="flex justify-around">
                    <NavLink href="/home" icon="🏠" label="Home" />
                    <NavLink href="/chat" icon="💬" label="Chat" />
                    <NavLink href="/mypage" icon="👤" label="My Page" />
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    icon: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="flex flex-col items-center py-3 px-4 text-gray-500 hover:text-indigo-600 transition-colors"
            active_class="text-indigo-600"
        >
            <span class="text-xl">{icon}</span>
            <span class="text-xs font-semibold">{label}</span>
        </A>
    }
}
