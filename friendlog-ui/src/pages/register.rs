//! Register Page

use leptos::*;
use leptos_router::*;

use crate::components::AuthForm;

#[component]
pub fn Register() -> impl IntoView {
    view! {
        <div class="flex flex-col justify-center py-12">
            <div class="max-w-md w-full mx-auto">
                <h2 class="mt-6 text-center text-3xl font-extrabold text-gray-900">
                    "Create a new account"
                </h2>
                <div class="mt-8 bg-white py-8 px-4 shadow sm:rounded-lg sm:px-10">
                    <AuthForm is_login=false />
                    <p class="mt-6 text-center text-gray-900">
                        "Already have an account? "
                        <A href="/login" class="font-medium text-indigo-600 hover:text-indigo-500">
                            "Sign in"
                        </A>
                    </p>
                </div>
            </div>
        </div>
    }
}
