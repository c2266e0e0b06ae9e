use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub answered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub parent_id: Option<ItemId>,
}

impl Item {
    pub fn new(id: impl Into<String>, content: impl Into<serde_json::Value>) -> Self {
        Self {
            id: ItemId::new(id),
            content: content.into(),
            answered_at: None,
            likes_count: 0,
            parent_id: None,
        }
    }

    pub fn answered_at(mut self, instant: DateTime<Utc>) -> Self {
        self.answered_at = Some(instant);
        self
    }

    pub fn with_likes(mut self, likes_count: u64) -> Self {
        self.likes_count = likes_count;
        self
    }

    pub fn comment_on(mut self, parent: &ItemId) -> Self {
        self.parent_id = Some(parent.clone());
        self
    }
}

/// Parent id -> number of direct children. Built from a flat item list; a
/// parent never owns its comments.
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    counts: HashMap<ItemId, u64>,
}

impl CommentIndex {
    pub fn from_items(items: &[Item]) -> Self {
        let mut counts: HashMap<ItemId, u64> = HashMap::new();
        for item in items {
            if let Some(parent_id) = item.parent_id.as_ref() {
                // an item is never its own comment
                if parent_id == &item.id {
                    continue;
                }
                *counts.entry(parent_id.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    pub fn comments_count(&self, id: &ItemId) -> u64 {
        self.counts.get(id).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    items: Vec<Item>,
    comments: CommentIndex,
}

impl CandidateSet {
    pub fn new(items: Vec<Item>) -> Self {
        let comments = CommentIndex::from_items(&items);
        Self { items, comments }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn comments(&self) -> &CommentIndex {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
