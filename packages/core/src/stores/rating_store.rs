//! RatingStore Trait - Comment Rating Backend
//!
//! Comment fields join against an external rating table. The store takes a
//! typed sequence of comment ids and returns whatever ratings exist; ids
//! without a rating are simply absent from the map. Passing ids as a typed
//! slice (rather than splicing them into a query string) keeps untrusted
//! input out of the backend's query text.

use crate::models::CommentId;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Abstraction over the rating backend for comment fields.
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Fetch ratings for a batch of comment ids in one round trip.
    ///
    /// # Returns
    ///
    /// A map holding an entry for every id that has a rating. Ids with no
    /// rating are omitted, never defaulted to zero.
    async fn batch_query(&self, ids: &[CommentId]) -> Result<HashMap<CommentId, f64>>;
}
