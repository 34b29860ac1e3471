//! Data Models
//!
//! This module contains the core data structures used throughout Pagecast:
//!
//! - `ContentNode` - a page with its template's typed fields and raw values
//! - `FieldDescriptor` / `FieldType` - per-field projection metadata
//! - `Envelope` - the status + data wrapper returned for every projection
//! - `ImageDescriptor` - storage shape of a single attached image

mod envelope;
mod field;
mod node;

pub use envelope::{Envelope, STATUS_NOT_FOUND, STATUS_OK};
pub use field::{CommentId, FieldDescriptor, FieldType, ImageDescriptor};
pub use node::{ContentNode, ValidationError};
