//! Pagecast Core - Field Projection Engine
//!
//! This crate projects hierarchical content pages - a template of typed
//! fields plus raw values - into flat, JSON-shaped export envelopes. Field
//! serialization dispatches on a per-field type tag, recursing into the
//! content store for fields that reference other pages and joining comment
//! fields against a rating store.
//!
//! # Architecture
//!
//! - **Typed dispatch**: field types are a closed enum; each variant has one
//!   resolver and new types are added as variants, not string comparisons
//! - **Explicit collaborators**: the content store and rating store are
//!   injected trait objects, never ambient globals
//! - **Fixed envelope contract**: `200 OK` with data/timestamps, or a bare
//!   `404 NOT FOUND`; transport-level status codes stay in the transport
//! - **Scoped read mode**: a projection reads raw stored values and restores
//!   the node's formatting mode before returning
//!
//! # Modules
//!
//! - [`models`] - data structures (ContentNode, FieldDescriptor, Envelope)
//! - [`stores`] - collaborator traits and in-memory implementations
//! - [`projection`] - the projector, per-type resolvers, and configuration

pub mod models;
pub mod projection;
pub mod stores;

// Re-export commonly used types
pub use models::*;
pub use projection::*;
pub use stores::*;
