//! Core types for Clementine Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod color;
pub mod email;
pub mod id;
pub mod password;
pub mod price;
pub mod status;

pub use color::DisplayColor;
pub use email::{Email, EmailError};
pub use id::*;
pub use password::{PasswordPolicyError, validate_password_strength};
pub use price::Price;
pub use status::*;
