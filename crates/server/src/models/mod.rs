//! Domain types.
//!
//! These types represent validated domain objects separate from database
//! row types and from the JSON shapes the routes expose.

pub mod cart;
pub mod comment;
pub mod order;
pub mod user;

pub use cart::{CartLine, ProductSnapshot};
pub use comment::Comment;
pub use order::{Order, OrderLineItem};
pub use user::User;
