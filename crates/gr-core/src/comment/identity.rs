//! Structural identity for comments
//!
//! Gerrit comment records have no equality of their own, yet they are used as
//! map keys and compared for deduplication. Identity is defined over seven
//! fields: `id`, `line`, `in_reply_to`, `message`, `path`, `side` and
//! `updated`. Everything else on the record is ignored. Records of different
//! [`CommentKind`](super::model::CommentKind) are never equal.
//!
//! `hash_code` reproduces the classic `31 * result + field` accumulation so
//! the values are stable across processes and platforms.

use super::model::Comment;
use crate::types::{CommentId, Side};
use chrono::{DateTime, Utc};
use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

const MULTIPLIER: i32 = 31;

/// Whether two comments are the same for identity purposes
pub fn equals(a: &Comment, b: &Comment) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    if a.kind != b.kind {
        return false;
    }

    a.line == b.line
        && a.id == b.id
        && a.in_reply_to == b.in_reply_to
        && a.message == b.message
        && a.path == b.path
        && a.side == b.side
        && a.updated == b.updated
}

/// Hash code consistent with [`equals`]
///
/// Field order is fixed: id, path, side, line, in_reply_to, message, updated.
/// Absent fields contribute 0.
pub fn hash_code(comment: &Comment) -> i32 {
    let mut result: i32 = 0;
    result = accumulate(result, id_hash(&comment.id));
    result = accumulate(result, comment.path.as_deref().map_or(0, string_hash));
    result = accumulate(result, comment.side.map_or(0, side_hash));
    result = accumulate(result, comment.line as i32);
    result = accumulate(result, comment.in_reply_to.as_ref().map_or(0, id_hash));
    result = accumulate(result, comment.message.as_deref().map_or(0, string_hash));
    result = accumulate(result, comment.updated.as_ref().map_or(0, timestamp_hash));
    result
}

fn accumulate(result: i32, contribution: i32) -> i32 {
    result.wrapping_mul(MULTIPLIER).wrapping_add(contribution)
}

/// 31-polynomial over UTF-16 code units
fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(MULTIPLIER).wrapping_add(unit as i32))
}

fn id_hash(id: &CommentId) -> i32 {
    string_hash(id.as_str())
}

fn side_hash(side: Side) -> i32 {
    match side {
        Side::Old => 1,
        Side::New => 2,
    }
}

/// Folds epoch milliseconds into 32 bits
fn timestamp_hash(ts: &DateTime<Utc>) -> i32 {
    let millis = ts.timestamp_millis();
    (millis ^ ((millis as u64) >> 32) as i64) as i32
}

/// Map and set key for a comment
///
/// Wraps an owned `Comment` or any borrow of one (`&Comment`, `Rc<Comment>`,
/// ...), with equality from [`equals`] and hashing from [`hash_code`].
#[derive(Debug, Clone)]
pub struct CommentKey<C = Comment>(C);

impl<C: Borrow<Comment>> CommentKey<C> {
    /// Wrap a comment
    pub fn new(comment: C) -> Self {
        CommentKey(comment)
    }

    /// The wrapped comment
    pub fn comment(&self) -> &Comment {
        self.0.borrow()
    }

    /// Unwrap the comment
    pub fn into_inner(self) -> C {
        self.0
    }
}

impl<C: Borrow<Comment>> From<C> for CommentKey<C> {
    fn from(comment: C) -> Self {
        CommentKey::new(comment)
    }
}

impl<C: Borrow<Comment>, D: Borrow<Comment>> PartialEq<CommentKey<D>> for CommentKey<C> {
    fn eq(&self, other: &CommentKey<D>) -> bool {
        equals(self.comment(), other.comment())
    }
}

impl<C: Borrow<Comment>> Eq for CommentKey<C> {}

impl<C: Borrow<Comment>> Hash for CommentKey<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(hash_code(self.comment()));
    }
}
