//! Request middleware and extractors.

pub mod auth;

pub use auth::{RequireAuth, clear_session_cookies, session_cookies};
