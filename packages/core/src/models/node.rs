//! Content Node Model
//!
//! `ContentNode` is the in-memory representation of a page handed over by the
//! content store: a stable identifier, a hierarchical path, timestamps, the
//! template's ordered field descriptors, and the raw field values.
//!
//! # Output Formatting
//!
//! Every value slot keeps the raw stored value and, optionally, a
//! display-rendered variant. The `output_formatting` flag selects which one
//! `get_value` returns. The projection layer checks the node out into raw
//! mode for the duration of a projection and restores the previous mode
//! before returning, so a store handing out shared node instances never
//! observes a leaked toggle.
//!
//! # Examples
//!
//! ```rust
//! use pagecast_core::models::{ContentNode, FieldType};
//! use serde_json::json;
//!
//! let node = ContentNode::new("1001", "/about/")
//!     .with_field("site_title", FieldType::Scalar, json!("About us"))
//!     .with_formatted_value("site_title", json!("<h1>About us</h1>"));
//!
//! // Display mode is the default
//! assert_eq!(node.get_value("site_title"), Some(json!("<h1>About us</h1>")));
//!
//! let mut node = node;
//! let previous = node.set_output_formatting(false);
//! assert!(previous);
//! assert_eq!(node.get_value("site_title"), Some(json!("About us")));
//! ```

use crate::models::field::{FieldDescriptor, FieldType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

fn default_output_formatting() -> bool {
    true
}

/// Validation errors for ContentNode construction
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Duplicate field declared in template: {0}")]
    DuplicateField(String),

    #[error("Structural field cannot carry a value: {0}")]
    StructuralValue(String),
}

/// One field's stored value, with an optional display-rendered variant.
///
/// The formatted variant is what an end-user-facing renderer would emit
/// (entity-encoded markup, formatted dates). Projection always reads the raw
/// variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    raw: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    formatted: Option<Value>,
}

/// A page as supplied by the content store.
///
/// Nodes are transient: the projector borrows one mutably for the duration
/// of a single projection and never persists it. The `&mut` borrow also
/// guarantees at most one in-flight projection owns a given node instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    /// Stable page identifier
    pub id: String,

    /// Hierarchical path, e.g. `"/blog/2014/launch/"`
    pub path: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,

    /// Ordered field descriptors declared by the page's template
    template: Vec<FieldDescriptor>,

    /// Raw (and optionally formatted) values keyed by field name
    values: HashMap<String, FieldValue>,

    /// Current read mode; `true` returns display-rendered values
    #[serde(default = "default_output_formatting")]
    output_formatting: bool,
}

impl ContentNode {
    /// Create an empty node with the current time as both timestamps.
    ///
    /// Field declarations are added with [`with_field`](Self::with_field);
    /// builders keep fixture setup terse in tests and store implementations.
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            path: path.into(),
            created_at: now,
            modified_at: now,
            template: Vec::new(),
            values: HashMap::new(),
            output_formatting: true,
        }
    }

    /// Override both timestamps (builder).
    pub fn with_timestamps(
        mut self,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        self.created_at = created_at;
        self.modified_at = modified_at;
        self
    }

    /// Declare a field with its raw stored value (builder).
    ///
    /// Declaration order is preserved and becomes the projection output
    /// order.
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        raw: Value,
    ) -> Self {
        let name = name.into();
        self.values.insert(
            name.clone(),
            FieldValue {
                raw,
                formatted: None,
            },
        );
        self.template.push(FieldDescriptor::new(name, field_type));
        self
    }

    /// Declare a structural marker field with no value (builder).
    pub fn with_structural(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.template.push(FieldDescriptor::new(name, field_type));
        self
    }

    /// Attach a display-rendered variant to an already-declared field
    /// (builder). Unknown field names are ignored.
    pub fn with_formatted_value(mut self, name: &str, formatted: Value) -> Self {
        if let Some(slot) = self.values.get_mut(name) {
            slot.formatted = Some(formatted);
        }
        self
    }

    /// Ordered field descriptors declared by the template.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.template
    }

    /// Read a field value in the current output mode.
    ///
    /// Returns the formatted variant when formatting is on and one exists,
    /// otherwise the raw stored value. `None` for undeclared field names.
    pub fn get_value(&self, name: &str) -> Option<Value> {
        let slot = self.values.get(name)?;
        if self.output_formatting {
            if let Some(formatted) = &slot.formatted {
                return Some(formatted.clone());
            }
        }
        Some(slot.raw.clone())
    }

    /// Current output formatting mode.
    pub fn output_formatting(&self) -> bool {
        self.output_formatting
    }

    /// Switch the output mode, returning the previous mode.
    ///
    /// Callers toggling the mode are responsible for restoring the returned
    /// value before handing the node back.
    pub fn set_output_formatting(&mut self, on: bool) -> bool {
        std::mem::replace(&mut self.output_formatting, on)
    }

    /// Validate node structure.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if:
    /// - `id` is empty
    /// - the template declares the same field name twice
    /// - a structural marker carries a value
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }

        let mut seen = std::collections::HashSet::new();
        for field in &self.template {
            if !seen.insert(field.name.as_str()) {
                return Err(ValidationError::DuplicateField(field.name.clone()));
            }
            if field.field_type.is_structural() && self.values.contains_key(&field.name) {
                return Err(ValidationError::StructuralValue(field.name.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_creation() {
        let node = ContentNode::new("1001", "/about/").with_field(
            "site_title",
            FieldType::Scalar,
            json!("About"),
        );

        assert_eq!(node.id, "1001");
        assert_eq!(node.path, "/about/");
        assert_eq!(node.fields().len(), 1);
        assert!(node.output_formatting());
        assert!(node.validate().is_ok());
    }

    #[test]
    fn test_get_value_respects_output_mode() {
        let mut node = ContentNode::new("1", "/")
            .with_field("site_body", FieldType::Scalar, json!("raw text"))
            .with_formatted_value("site_body", json!("<p>raw text</p>"));

        assert_eq!(node.get_value("site_body"), Some(json!("<p>raw text</p>")));

        let previous = node.set_output_formatting(false);
        assert!(previous);
        assert_eq!(node.get_value("site_body"), Some(json!("raw text")));

        node.set_output_formatting(previous);
        assert_eq!(node.get_value("site_body"), Some(json!("<p>raw text</p>")));
    }

    #[test]
    fn test_get_value_falls_back_to_raw_without_formatted_variant() {
        let node =
            ContentNode::new("1", "/").with_field("site_count", FieldType::Scalar, json!(3));

        // Formatting on, but no formatted variant stored
        assert_eq!(node.get_value("site_count"), Some(json!(3)));
        assert_eq!(node.get_value("missing"), None);
    }

    #[test]
    fn test_set_output_formatting_returns_previous() {
        let mut node = ContentNode::new("1", "/");
        assert!(node.set_output_formatting(false));
        assert!(!node.set_output_formatting(false));
        assert!(!node.set_output_formatting(true));
        assert!(node.output_formatting());
    }

    #[test]
    fn test_template_declaration_order_preserved() {
        let node = ContentNode::new("1", "/")
            .with_field("site_title", FieldType::Scalar, json!("t"))
            .with_structural("site_meta_open", FieldType::FieldsetOpen)
            .with_field("site_body", FieldType::Scalar, json!("b"))
            .with_structural("site_meta_close", FieldType::FieldsetClose);

        let names: Vec<&str> = node.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["site_title", "site_meta_open", "site_body", "site_meta_close"]
        );
    }

    #[test]
    fn test_validation_rejects_empty_id() {
        let node = ContentNode::new("", "/");
        assert!(matches!(
            node.validate(),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn test_validation_rejects_duplicate_fields() {
        let node = ContentNode::new("1", "/")
            .with_field("site_title", FieldType::Scalar, json!("a"))
            .with_field("site_title", FieldType::Scalar, json!("b"));

        assert!(matches!(
            node.validate(),
            Err(ValidationError::DuplicateField(_))
        ));
    }

    #[test]
    fn test_node_serialization_round_trip() {
        let node = ContentNode::new("42", "/blog/")
            .with_field("site_title", FieldType::Scalar, json!("Launch"))
            .with_formatted_value("site_title", json!("<h1>Launch</h1>"));

        let json = serde_json::to_string(&node).unwrap();
        let deserialized: ContentNode = serde_json::from_str(&json).unwrap();

        assert_eq!(node, deserialized);
        assert!(deserialized.output_formatting());
    }
}
