//! gr-core - Core library for gr-helper
//!
//! Gerrit review comments: decoding, structural identity for use as map and
//! set keys, and per-file collections that merge drafts with published
//! comments.

pub mod error;
pub mod types;
pub mod config;
pub mod comment;

pub use error::{GrError, Result};
pub use types::*;
