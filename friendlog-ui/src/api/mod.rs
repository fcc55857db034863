//! Backend API
//!
//! Base-URL resolution, the session cookie, and fetch wrappers for every
//! backend endpoint.

pub mod client;
pub mod session;
pub mod types;

pub use client::*;
pub use session::has_token;
pub use types::*;
