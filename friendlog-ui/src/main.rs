//! Friendlog Web App
//!
//! Keep notes about your friends and ask the assistant about them, built
//! with Leptos (WASM).
//!
//! # Pages
//!
//! - Login / register
//! - Friend list and friend creation
//! - Friend details with attribute editing
//! - Conversation log
//! - Chat with the assistant
//! - My page (logout, API URL)
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the friendlog backend over HTTP; the login token
//! lives in the `auth_token` cookie.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
