//! In-Memory Store Implementations
//!
//! `MemoryContentStore` and `MemoryRatingStore` back the projection layer
//! without an external CMS or database. They serve integration tests,
//! benchmarks, and embedders that assemble pages programmatically.
//!
//! Nodes are indexed by id and by path; lookups hand out clones so each
//! projection works on an independent node instance.

use crate::models::{CommentId, ContentNode};
use crate::stores::{ContentStore, RatingStore};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct ContentIndex {
    by_id: HashMap<String, ContentNode>,
    id_by_path: HashMap<String, String>,
}

/// Content store backed by an in-memory index.
///
/// # Examples
///
/// ```rust
/// use pagecast_core::models::{ContentNode, FieldType};
/// use pagecast_core::stores::{ContentStore, MemoryContentStore};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let store = MemoryContentStore::new();
/// store
///     .insert(ContentNode::new("1001", "/about/").with_field(
///         "site_title",
///         FieldType::Scalar,
///         json!("About"),
///     ))
///     .await;
///
/// assert!(store.lookup("1001").await.unwrap().is_some());
/// assert!(store.lookup_path("/about/").await.unwrap().is_some());
/// assert!(store.lookup("missing").await.unwrap().is_none());
/// # });
/// ```
#[derive(Default)]
pub struct MemoryContentStore {
    index: RwLock<ContentIndex>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node, indexing it by id and path.
    pub async fn insert(&self, node: ContentNode) {
        let mut index = self.index.write().await;
        index.id_by_path.insert(node.path.clone(), node.id.clone());
        index.by_id.insert(node.id.clone(), node);
    }

    /// Remove a node by id. Returns the removed node, if any.
    pub async fn remove(&self, id: &str) -> Option<ContentNode> {
        let mut index = self.index.write().await;
        let node = index.by_id.remove(id)?;
        index.id_by_path.remove(&node.path);
        Some(node)
    }

    /// Number of stored nodes.
    pub async fn len(&self) -> usize {
        self.index.read().await.by_id.len()
    }

    /// Whether the store holds no nodes.
    pub async fn is_empty(&self) -> bool {
        self.index.read().await.by_id.is_empty()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn lookup(&self, id: &str) -> Result<Option<ContentNode>> {
        Ok(self.index.read().await.by_id.get(id).cloned())
    }

    async fn lookup_path(&self, path: &str) -> Result<Option<ContentNode>> {
        let index = self.index.read().await;
        Ok(index
            .id_by_path
            .get(path)
            .and_then(|id| index.by_id.get(id))
            .cloned())
    }

    async fn lookup_many(&self, ids: &[String]) -> Result<Vec<Option<ContentNode>>> {
        // Single lock acquisition instead of one per id; output order and
        // content match the default sequential implementation exactly.
        let index = self.index.read().await;
        Ok(ids.iter().map(|id| index.by_id.get(id).cloned()).collect())
    }
}

/// Rating store backed by an in-memory map.
#[derive(Default)]
pub struct MemoryRatingStore {
    ratings: RwLock<HashMap<CommentId, f64>>,
}

impl MemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rating for a comment id.
    pub async fn insert(&self, id: CommentId, rating: f64) {
        self.ratings.write().await.insert(id, rating);
    }
}

#[async_trait]
impl RatingStore for MemoryRatingStore {
    async fn batch_query(&self, ids: &[CommentId]) -> Result<HashMap<CommentId, f64>> {
        let ratings = self.ratings.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| ratings.get(id).map(|rating| (*id, *rating)))
            .collect())
    }
}
