//! ContentStore Trait - Content Backend Abstraction
//!
//! The projection layer never talks to a CMS or database directly; it goes
//! through `ContentStore`. The trait keeps the projector testable against an
//! in-memory backend and leaves persistence, caching, and wire protocols to
//! the implementation.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: implementations may sit on an embedded database or a
//!    network service, so every method is async
//! 2. **Not-found is not an error**: `Ok(None)` means the identifier resolves
//!    to nothing; `Err(_)` means the backend itself failed
//! 3. **Error Handling**: `anyhow::Result` at the seam, classified into
//!    typed errors by the projection layer
//!
//! # Examples
//!
//! ```rust,no_run
//! use pagecast_core::stores::{ContentStore, MemoryContentStore};
//! use pagecast_core::models::ContentNode;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = MemoryContentStore::new();
//!     store.insert(ContentNode::new("1001", "/about/")).await;
//!
//!     let store: Arc<dyn ContentStore> = Arc::new(store);
//!     match store.lookup("1001").await? {
//!         Some(node) => println!("found {}", node.path),
//!         None => println!("not found"),
//!     }
//!     Ok(())
//! }
//! ```

use crate::models::ContentNode;
use anyhow::Result;
use async_trait::async_trait;

/// Abstraction over the content backend supplying pages.
///
/// Implementations must be `Send + Sync` so a projector can be shared across
/// async tasks.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Look up a page by its stable identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(node))` if the page exists
    /// - `Ok(None)` if it does not (not an error)
    /// - `Err(_)` if the backend is unreachable or erroring
    async fn lookup(&self, id: &str) -> Result<Option<ContentNode>>;

    /// Look up a page by its hierarchical path, e.g. `"/blog/launch/"`.
    ///
    /// Same return contract as [`lookup`](Self::lookup).
    async fn lookup_path(&self, path: &str) -> Result<Option<ContentNode>>;

    /// Look up several pages at once, preserving input order.
    ///
    /// The default implementation issues one `lookup` round trip per id.
    /// Backends with a cheaper batch path may override it; overrides must
    /// return exactly the nodes the sequential version would, in the same
    /// order, so batched and sequential projection produce identical output.
    async fn lookup_many(&self, ids: &[String]) -> Result<Vec<Option<ContentNode>>> {
        let mut nodes = Vec::with_capacity(ids.len());
        for id in ids {
            nodes.push(self.lookup(id).await?);
        }
        Ok(nodes)
    }
}
