//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Nav, Toast};
use crate::pages::{
    AddConversation, Chat, ConversationDetail, CreateFriend, FriendDetail, Home, Login, MyPage,
    Register,
};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-100 text-gray-900 flex flex-col">
                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Root />
                        <Route path="/login" view=Login />
                        <Route path="/register" view=Register />
                        <Route path="/home" view=Home />
                        <Route path="/create-friend" view=CreateFriend />
                        <Route path="/friend/:id" view=FriendDetail />
                        <Route path="/friend/:id/add-conversation" view=AddConversation />
                        <Route path="/friend/:id/conversation/:index" view=ConversationDetail />
                        <Route path="/chat" view=Chat />
                        <Route path="/mypage" view=MyPage />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <AppNav />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Entry route: friends when logged in, the login form otherwise
#[component]
fn Root() -> impl IntoView {
    let target = if api::has_token() { "/home" } else { "/login" };
    view! { <Redirect path=target /> }
}

/// Bottom navigation, hidden on the logged-out pages
#[component]
fn AppNav() -> impl IntoView {
    let location = use_location();
    let show = move || !is_public_path(&location.pathname.get());

    view! { <Show when=show><Nav /></Show> }
}

fn is_public_path(path: &str) -> bool {
    matches!(path.trim_end_matches('/'), "" | "/login" | "/register")
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/home"
                class="px-6 py-3 bg-indigo-600 hover:bg-indigo-700 text-white rounded-lg font-medium"
            >
                "Go to Friends"
            </A>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_public_path() {
        assert!(is_public_path("/"));
        assert!(is_public_path("/login"));
        assert!(is_public_path("/register/"));
        assert!(!is_public_path("/home"));
        assert!(!is_public_path("/friend/3"));
    }
}
