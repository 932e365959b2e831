//! Comment builder for fluent API

use super::model::{AccountInfo, Comment, CommentKind, CommentRange};
use crate::error::{GrError, Result};
use crate::types::{CommentId, Side};
use chrono::{DateTime, Utc};

/// Builder for creating comments with fluent API
pub struct CommentBuilder {
    kind: CommentKind,
    id: String,
    path: Option<String>,
    side: Option<Side>,
    line: u32,
    range: Option<CommentRange>,
    in_reply_to: Option<String>,
    message: Option<String>,
    updated: Option<DateTime<Utc>>,
    author: Option<AccountInfo>,
    unresolved: Option<bool>,
}

impl CommentBuilder {
    /// Create a new builder for a server-side comment with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Info,
            id: id.into(),
            path: None,
            side: None,
            line: 0,
            range: None,
            in_reply_to: None,
            message: None,
            updated: None,
            author: None,
            unresolved: None,
        }
    }

    /// Set the record kind
    pub fn kind(mut self, kind: CommentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Build a review input record instead of a server-side one
    pub fn input(self) -> Self {
        self.kind(CommentKind::Input)
    }

    /// Set the file path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the revision side
    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Set the line number
    pub fn line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    /// Set the character range
    pub fn range(mut self, range: CommentRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Mark as a reply to another comment
    pub fn in_reply_to(mut self, parent: impl Into<String>) -> Self {
        self.in_reply_to = Some(parent.into());
        self
    }

    /// Set the comment text
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the last modification time
    pub fn updated(mut self, updated: DateTime<Utc>) -> Self {
        self.updated = Some(updated);
        self
    }

    /// Set author
    pub fn author(mut self, author: AccountInfo) -> Self {
        self.author = Some(author);
        self
    }

    /// Set the unresolved flag
    pub fn unresolved(mut self, unresolved: bool) -> Self {
        self.unresolved = Some(unresolved);
        self
    }

    /// Build the comment
    pub fn build(self) -> Result<Comment> {
        let id = CommentId::new(self.id)?;
        let in_reply_to = self
            .in_reply_to
            .map(CommentId::new)
            .transpose()
            .map_err(|e| e.with_context("Invalid parent comment"))?;

        if let Some(range) = &self.range {
            if range.start_line > range.end_line {
                return Err(GrError::Validation(format!(
                    "Range starts after it ends ({} > {})",
                    range.start_line, range.end_line
                )));
            }
        }

        Ok(Comment {
            kind: self.kind,
            id,
            path: self.path,
            side: self.side,
            line: self.line,
            range: self.range,
            in_reply_to,
            message: self.message,
            updated: self.updated,
            author: self.author,
            unresolved: self.unresolved,
        })
    }
}
