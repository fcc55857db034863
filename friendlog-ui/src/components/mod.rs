//! UI Components
//!
//! Reusable components shared by the pages.

pub mod auth_form;
pub mod loading;
pub mod nav;
pub mod toast;

pub use auth_form::AuthForm;
pub use loading::{ErrorMessage, Loading};
pub use nav::Nav;
pub use toast::Toast;
