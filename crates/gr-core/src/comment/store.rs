//! Per-file comment collection with identity-based deduplication

use super::identity::{equals, hash_code};
use super::model::Comment;
use crate::config::CommentsConfig;
use crate::error::Result;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// Comments of one revision grouped by file path
///
/// Membership is decided by comment identity, so the same comment fetched
/// twice (e.g. as a draft and again in a published listing) is stored once.
/// A comment without a path takes the path it is filed under, which makes
/// comments on different files distinct.
#[derive(Debug, Clone)]
pub struct CommentStore {
    by_path: BTreeMap<String, Vec<Comment>>,
    /// Stored comments per hash code
    hashes: HashMap<i32, usize>,
    deduplicate: bool,
}

impl CommentStore {
    /// Create an empty store that drops duplicates
    pub fn new() -> Self {
        Self::with_config(&CommentsConfig::default())
    }

    /// Create an empty store following the given settings
    pub fn with_config(config: &CommentsConfig) -> Self {
        Self {
            by_path: BTreeMap::new(),
            hashes: HashMap::new(),
            deduplicate: config.deduplicate,
        }
    }

    /// Decode a Gerrit `{"path": [comment, ...]}` listing
    pub fn parse_listing(json: &str) -> Result<BTreeMap<String, Vec<Comment>>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a store from a Gerrit comment listing
    pub fn from_json(json: &str, config: &CommentsConfig) -> Result<Self> {
        let listing = Self::parse_listing(json)?;
        let mut store = Self::with_config(config);
        store.extend(listing);
        Ok(store)
    }

    /// Combine drafts and published comments, drafts first
    pub fn merge<D, P>(drafts: D, published: P, config: &CommentsConfig) -> Self
    where
        D: IntoIterator<Item = (String, Vec<Comment>)>,
        P: IntoIterator<Item = (String, Vec<Comment>)>,
    {
        let mut store = Self::with_config(config);
        if config.include_drafts {
            store.extend(drafts);
        }
        let draft_count = store.len();
        if config.include_published {
            store.extend(published);
        }
        info!(
            "Merged {} comments ({} drafts) across {} files",
            store.len(),
            draft_count,
            store.by_path.len()
        );
        store
    }

    /// Add every comment of a listing
    pub fn extend(&mut self, listing: impl IntoIterator<Item = (String, Vec<Comment>)>) {
        for (path, comments) in listing {
            for comment in comments {
                self.insert(path.clone(), comment);
            }
        }
    }

    /// Add a comment under a path; returns false if it was dropped as a duplicate
    pub fn insert(&mut self, path: impl Into<String>, mut comment: Comment) -> bool {
        let path = path.into();
        if comment.path.is_none() {
            comment.path = Some(path.clone());
        }

        if self.deduplicate && self.contains_resolved(&comment) {
            debug!(
                "Skipping duplicate comment {} on {}:{} ({})",
                comment.id,
                path,
                comment.line,
                comment.side.map_or("-", |side| side.to_short_string())
            );
            return false;
        }

        *self.hashes.entry(hash_code(&comment)).or_default() += 1;
        self.by_path.entry(path).or_default().push(comment);
        true
    }

    /// Whether an identical comment is stored; a path-less comment is looked up as if filed under `path`
    pub fn contains(&self, path: &str, comment: &Comment) -> bool {
        self.contains_resolved(&resolve(path, comment))
    }

    fn contains_resolved(&self, comment: &Comment) -> bool {
        self.hashes.contains_key(&hash_code(comment))
            && self
                .by_path
                .values()
                .flatten()
                .any(|stored| equals(stored, comment))
    }

    /// Remove one comment identical to `comment` from a path
    pub fn remove(&mut self, path: &str, comment: &Comment) -> Option<Comment> {
        let comment = resolve(path, comment);
        let comments = self.by_path.get_mut(path)?;
        let pos = comments.iter().position(|c| equals(c, &comment))?;
        let removed = comments.remove(pos);
        if comments.is_empty() {
            self.by_path.remove(path);
        }

        let hash = hash_code(&removed);
        if let Some(count) = self.hashes.get_mut(&hash) {
            *count -= 1;
            if *count == 0 {
                self.hashes.remove(&hash);
            }
        }
        Some(removed)
    }

    /// Comments stored under a path
    pub fn get_by_path(&self, path: &str) -> &[Comment] {
        self.by_path.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Paths that have comments, in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.by_path.keys().map(String::as_str)
    }

    /// All comments with their paths
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Comment)> {
        self.by_path
            .iter()
            .flat_map(|(path, comments)| comments.iter().map(move |c| (path.as_str(), c)))
    }

    /// Total number of stored comments
    pub fn len(&self) -> usize {
        self.by_path.values().map(Vec::len).sum()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.by_path.clear();
        self.hashes.clear();
    }

    /// Comments as review input records, grouped by path
    pub fn to_review_input(&self) -> BTreeMap<String, Vec<Comment>> {
        self.by_path
            .iter()
            .map(|(path, comments)| {
                (
                    path.clone(),
                    comments.iter().map(Comment::to_input).collect(),
                )
            })
            .collect()
    }
}

/// The comment as stored under `path`
fn resolve<'a>(path: &str, comment: &'a Comment) -> Cow<'a, Comment> {
    if comment.path.is_some() {
        return Cow::Borrowed(comment);
    }
    let mut filed = comment.clone();
    filed.path = Some(path.to_string());
    Cow::Owned(filed)
}

impl Default for CommentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::builder::CommentBuilder;
    use crate::comment::model::CommentKind;
    use crate::types::Side;
    use pretty_assertions::assert_eq;

    fn comment(id: &str, line: u32) -> Comment {
        CommentBuilder::new(id)
            .line(line)
            .side(Side::New)
            .message(format!("comment {}", id))
            .build()
            .unwrap()
    }

    fn listing(entries: &[(&str, Vec<Comment>)]) -> Vec<(String, Vec<Comment>)> {
        entries
            .iter()
            .map(|(path, comments)| (path.to_string(), comments.clone()))
            .collect()
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = CommentStore::new();
        assert!(store.is_empty());

        assert!(store.insert("a.rs", comment("c1", 1)));
        assert!(store.insert("a.rs", comment("c2", 2)));
        assert!(store.insert("b.rs", comment("c3", 3)));

        assert_eq!(store.len(), 3);
        assert_eq!(store.get_by_path("a.rs").len(), 2);
        assert_eq!(store.get_by_path("missing.rs").len(), 0);
        assert_eq!(store.paths().collect::<Vec<_>>(), vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_insert_drops_duplicates() {
        let mut store = CommentStore::new();
        assert!(store.insert("a.rs", comment("c1", 1)));
        assert!(!store.insert("a.rs", comment("c1", 1)));
        assert!(store.insert("a.rs", comment("c1", 2)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_same_comment_on_another_file_is_kept() {
        let mut store = CommentStore::new();
        assert!(store.insert("a.rs", comment("c1", 1)));
        assert!(store.insert("b.rs", comment("c1", 1)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_by_path("b.rs")[0].path.as_deref(), Some("b.rs"));
        assert!(store.contains("a.rs", &comment("c1", 1)));
        assert!(store.contains("b.rs", &comment("c1", 1)));
        assert!(!store.contains("c.rs", &comment("c1", 1)));
    }

    #[test]
    fn test_explicit_path_wins_over_listing_key() {
        let mut store = CommentStore::new();
        let mut explicit = comment("c1", 1);
        explicit.path = Some("a.rs".to_string());

        assert!(store.insert("a.rs", comment("c1", 1)));
        assert!(!store.insert("other.rs", explicit.clone()));
        assert!(store.contains("anything.rs", &explicit));
    }

    #[test]
    fn test_insert_keeps_duplicates_when_disabled() {
        let config = CommentsConfig {
            deduplicate: false,
            ..Default::default()
        };
        let mut store = CommentStore::with_config(&config);
        assert!(store.insert("a.rs", comment("c1", 1)));
        assert!(store.insert("a.rs", comment("c1", 1)));
        assert_eq!(store.len(), 2);

        store.remove("a.rs", &comment("c1", 1)).unwrap();
        assert!(store.contains("a.rs", &comment("c1", 1)));
        store.remove("a.rs", &comment("c1", 1)).unwrap();
        assert!(!store.contains("a.rs", &comment("c1", 1)));
    }

    #[test]
    fn test_remove() {
        let mut store = CommentStore::new();
        store.insert("a.rs", comment("c1", 1));

        assert!(store.remove("b.rs", &comment("c1", 1)).is_none());
        assert!(store.remove("a.rs", &comment("c1", 2)).is_none());

        let removed = store.remove("a.rs", &comment("c1", 1)).unwrap();
        assert_eq!(removed.id.as_str(), "c1");
        assert_eq!(removed.path.as_deref(), Some("a.rs"));
        assert!(store.is_empty());
        assert!(!store.contains("a.rs", &removed));
    }

    #[test]
    fn test_merge_drafts_first() {
        let drafts = listing(&[("a.rs", vec![comment("d1", 4)])]);
        let published = listing(&[
            ("a.rs", vec![comment("p1", 1)]),
            ("b.rs", vec![comment("p2", 2)]),
        ]);

        let store = CommentStore::merge(drafts, published, &CommentsConfig::default());
        let ids: Vec<_> = store
            .get_by_path("a.rs")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["d1", "p1"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_merge_respects_config() {
        let drafts = listing(&[("a.rs", vec![comment("d1", 4)])]);
        let published = listing(&[("a.rs", vec![comment("p1", 1)])]);

        let only_published = CommentsConfig {
            include_drafts: false,
            ..Default::default()
        };
        let store = CommentStore::merge(drafts.clone(), published.clone(), &only_published);
        assert_eq!(store.len(), 1);
        assert!(store.contains("a.rs", &comment("p1", 1)));

        let only_drafts = CommentsConfig {
            include_published: false,
            ..Default::default()
        };
        let store = CommentStore::merge(drafts, published, &only_drafts);
        assert_eq!(store.len(), 1);
        assert!(store.contains("a.rs", &comment("d1", 4)));
    }

    #[test]
    fn test_merge_drops_comment_seen_in_both() {
        let drafts = listing(&[("a.rs", vec![comment("c1", 1)])]);
        let published = listing(&[("a.rs", vec![comment("c1", 1), comment("c2", 2)])]);

        let store = CommentStore::merge(drafts, published, &CommentsConfig::default());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "a.rs": [
                {"id": "c1", "line": 3, "message": "first", "updated": "2024-01-02 03:04:05.000000000"},
                {"id": "c2", "line": 0, "in_reply_to": "c1", "message": "file level"}
            ],
            "/COMMIT_MSG": [
                {"id": "c3", "line": 7, "side": "REVISION"}
            ]
        }"#;

        let store = CommentStore::from_json(json, &CommentsConfig::default()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.paths().collect::<Vec<_>>(), vec!["/COMMIT_MSG", "a.rs"]);
        assert_eq!(store.get_by_path("/COMMIT_MSG")[0].side, Some(Side::New));

        let pairs: Vec<_> = store.iter().map(|(p, c)| (p, c.id.as_str())).collect();
        assert_eq!(pairs, vec![("/COMMIT_MSG", "c3"), ("a.rs", "c1"), ("a.rs", "c2")]);
    }

    #[test]
    fn test_from_json_keeps_identical_comments_on_different_files() {
        let json = r#"{
            "a.rs": [{"id": "x", "line": 1, "message": "nit"}],
            "b.rs": [{"id": "x", "line": 1, "message": "nit"}]
        }"#;

        let store = CommentStore::from_json(json, &CommentsConfig::default()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.paths().collect::<Vec<_>>(), vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_from_json_invalid() {
        let config = CommentsConfig::default();
        assert!(CommentStore::from_json("not json", &config).is_err());
        assert!(CommentStore::from_json(r#"{"a.rs": [{"line": 1}]}"#, &config).is_err());
    }

    #[test]
    fn test_to_review_input() {
        let mut store = CommentStore::new();
        store.insert("a.rs", comment("c1", 1));
        store.insert("b.rs", comment("c2", 2));

        let input = store.to_review_input();
        assert_eq!(input.len(), 2);
        assert!(input
            .values()
            .flatten()
            .all(|c| c.kind == CommentKind::Input));
        assert_eq!(input["a.rs"][0].id.as_str(), "c1");
        assert_eq!(input["a.rs"][0].path.as_deref(), Some("a.rs"));
        assert!(!store.contains("a.rs", &input["a.rs"][0]));
    }

    #[test]
    fn test_clear() {
        let mut store = CommentStore::new();
        store.insert("a.rs", comment("c1", 1));
        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains("a.rs", &comment("c1", 1)));
    }
}
