//! Projection Error Types
//!
//! Only a failure to look up the root page is fatal to a projection. A
//! missing page is not an error (it is the 404 envelope), failed child
//! lookups are skipped, and a failed rating query degrades to an empty
//! rating map. Those policies live in the projector; this module defines
//! what can actually surface to the caller.

use thiserror::Error;

/// Errors surfaced by [`PageProjector`](crate::projection::PageProjector).
#[derive(Error, Debug)]
pub enum ProjectionError {
    /// The content store failed while resolving the root page. No partial
    /// envelope is emitted in this case.
    #[error("Lookup failed for {target}: {context}")]
    LookupFailed { target: String, context: String },
}

impl ProjectionError {
    /// Create a lookup failed error from a store-layer failure.
    pub fn lookup_failed(target: impl Into<String>, source: &anyhow::Error) -> Self {
        Self::LookupFailed {
            target: target.into(),
            context: format!("{source:#}"),
        }
    }
}
