//! Comment system module
//!
//! Gerrit comment records, their identity, and per-file collections.

pub mod model;
pub mod identity;
pub mod builder;
pub mod store;

pub use model::*;
pub use identity::{equals, hash_code, CommentKey};
pub use builder::CommentBuilder;
pub use store::CommentStore;
