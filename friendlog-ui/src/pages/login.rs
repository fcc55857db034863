//! Login Page

use leptos::*;
use leptos_router::*;

use crate::components::AuthForm;

#[component]
pub fn Login() -> impl IntoView {
    view! {
        <div class="flex flex-col justify-center py-12">
            <div class="max-w-md w-full mx-auto">
                <h2 class="mt-6 text-center text-3xl font-extrabold text-gray-900 mb-8">
                    "Sign in to your account"
                </h2>
                <div class="bg-white py-8 px-4 shadow sm:rounded-lg sm:px-10">
                    <AuthForm is_login=true />
                    <p class="mt-6 text-center text-gray-900">
                        "No account yet? "
                        <A href="/register" class="font-medium text-indigo-600 hover:text-indigo-500">
                            "Register"
                        </A>
                    </p>
                </div>
            </div>
        </div>
    }
}
