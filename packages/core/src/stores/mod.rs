//! Store Layer
//!
//! This module defines the collaborator seams the projection layer consumes:
//!
//! - `ContentStore` - resolves identifiers and paths to content nodes
//! - `RatingStore` - batch-resolves comment ids to numeric ratings
//! - `MemoryContentStore` / `MemoryRatingStore` - in-memory implementations
//!   for tests, benchmarks, and embedders without an external backend
//!
//! Both traits return `anyhow::Result` at the seam; the projection layer
//! classifies failures (fatal root lookup vs. skippable child lookup).

mod content_store;
mod memory;
mod rating_store;

pub use content_store::ContentStore;
pub use memory::{MemoryContentStore, MemoryRatingStore};
pub use rating_store::RatingStore;
