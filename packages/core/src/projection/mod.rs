//! Projection Layer
//!
//! This module turns content nodes into export envelopes:
//!
//! - `PageProjector` - orchestrates a projection request end to end
//! - `ProjectionConfig` - key prefix and file URL constants
//! - `ProjectionError` - what can surface to the caller (only a failed root
//!   lookup; everything else degrades and continues)
//!
//! Per-type resolution rules live in the private `resolvers` module and are
//! dispatched by the projector on each field's type tag.

mod config;
mod error;
mod projector;
mod resolvers;

pub use config::ProjectionConfig;
pub use error::ProjectionError;
pub use projector::PageProjector;
