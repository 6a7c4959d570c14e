//! Clementine Core - Shared types library.
//!
//! This crate provides common types used across all Clementine Market
//! components:
//! - `server` - The e-commerce backend API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails,
//!   statuses, and the password strength policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
