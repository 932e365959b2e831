//! Comment data models

use crate::types::{gerrit_timestamp, CommentId, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Gerrit review comment
///
/// The record carries no identity of its own (no `PartialEq`/`Hash`); use
/// [`CommentKey`](super::identity::CommentKey) to put it into maps and sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Which Gerrit record this was decoded from or will be sent as
    #[serde(skip)]
    pub kind: CommentKind,
    /// Comment identifier
    pub id: CommentId,
    /// File path, absent when the path is the key of the surrounding map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Revision side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    /// Line number; 0 means a file-level comment
    #[serde(default)]
    pub line: u32,
    /// Character range within the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<CommentRange>,
    /// Parent comment for replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<CommentId>,
    /// Comment text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Last modification time
    #[serde(
        default,
        with = "gerrit_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
    /// Author; Gerrit leaves this out for the caller's own drafts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AccountInfo>,
    /// Whether the thread is still open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unresolved: Option<bool>,
}

impl Comment {
    /// Whether this is a server-side comment the current user wrote and has not published
    pub fn is_own_draft(&self) -> bool {
        self.kind == CommentKind::Info && self.author.is_none()
    }

    /// Name to show next to the comment
    pub fn author_name(&self) -> &str {
        match &self.author {
            Some(author) => author.name.as_deref().unwrap_or("Unknown"),
            None => "Myself",
        }
    }

    /// Whether this comment starts a thread
    pub fn is_root(&self) -> bool {
        self.in_reply_to.is_none()
    }

    /// Copy into a review input record, the form drafts take when a review is posted
    pub fn to_input(&self) -> Comment {
        Comment {
            kind: CommentKind::Input,
            id: self.id.clone(),
            path: self.path.clone(),
            side: self.side,
            line: self.line,
            range: self.range.clone(),
            in_reply_to: self.in_reply_to.clone(),
            message: self.message.clone(),
            updated: self.updated,
            author: None,
            unresolved: None,
        }
    }
}

/// Concrete Gerrit record a comment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentKind {
    /// `CommentInfo`, as returned by the server
    Info,
    /// `CommentInput`, as sent with a review
    Input,
}

impl Default for CommentKind {
    fn default() -> Self {
        CommentKind::Info
    }
}

/// Character range a comment covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRange {
    pub start_line: u32,
    pub start_character: u32,
    pub end_line: u32,
    pub end_character: u32,
}

/// Gerrit account attached to a comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(rename = "_account_id", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
