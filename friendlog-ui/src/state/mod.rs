//! State Management
//!
//! Global application state shared by all pages.

pub mod global;
