//! Field Descriptors and Type Tags
//!
//! A page's template declares an ordered list of fields. Each field carries a
//! type tag that selects how its raw value is projected into the export
//! envelope (see [`crate::projection`]).
//!
//! The tag set is a closed enum: adding a new field type means adding a
//! variant and a matching resolver arm, never widening a stringly-typed
//! conditional chain.

use serde::{Deserialize, Serialize};

/// Identifier for a comment record in the rating store.
pub type CommentId = i64;

/// Type tag for a template field.
///
/// Tags select the projection strategy:
///
/// - `Repeater` - pipe-delimited list of child page ids, projected
///   recursively and keyed by id
/// - `Reference` - pipe-delimited list of referenced page ids, projected
///   recursively into a positional array
/// - `Image` - ordered image descriptors, projected into absolute file URLs
/// - `Comments` - comment records joined against the rating store
/// - `FieldsetOpen` / `FieldsetClose` - structural template markers with no
///   value of their own
/// - `Scalar` - fallback for everything else; the raw value passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Repeater,
    Reference,
    Image,
    Comments,
    FieldsetOpen,
    FieldsetClose,
    Scalar,
}

impl FieldType {
    /// Structural markers organize a template visually and carry no
    /// serializable value. Projection skips them entirely.
    ///
    /// Both fieldset markers count: a close marker is the same kind of
    /// grouping construct as the open marker it pairs with.
    pub fn is_structural(&self) -> bool {
        matches!(self, FieldType::FieldsetOpen | FieldType::FieldsetClose)
    }
}

/// Metadata naming a field and its type tag, declared by a page's template.
///
/// Descriptors are immutable once declared; the declaration order is the
/// output order of the projected `data` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field name as declared by the template (prefix included)
    pub name: String,

    /// Type tag selecting the projection strategy
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// A single image attached to an image field, in sleep (storage) shape.
///
/// The storage layer persists the bare filename under the `data` key; the
/// projection layer turns it into an absolute URL rooted at the page's file
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Stored filename, e.g. `"header.jpg"`
    #[serde(rename = "data")]
    pub filename: String,

    /// Free-form description / alt text
    #[serde(default)]
    pub description: String,
}

impl ImageDescriptor {
    pub fn new(filename: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structural_markers() {
        assert!(FieldType::FieldsetOpen.is_structural());
        assert!(FieldType::FieldsetClose.is_structural());
        assert!(!FieldType::Repeater.is_structural());
        assert!(!FieldType::Reference.is_structural());
        assert!(!FieldType::Image.is_structural());
        assert!(!FieldType::Comments.is_structural());
        assert!(!FieldType::Scalar.is_structural());
    }

    #[test]
    fn test_field_type_serialization() {
        assert_eq!(
            serde_json::to_value(FieldType::FieldsetOpen).unwrap(),
            json!("fieldsetOpen")
        );
        assert_eq!(
            serde_json::to_value(FieldType::Repeater).unwrap(),
            json!("repeater")
        );

        let tag: FieldType = serde_json::from_value(json!("comments")).unwrap();
        assert_eq!(tag, FieldType::Comments);
    }

    #[test]
    fn test_image_descriptor_sleep_shape() {
        // Storage shape keeps the filename under "data"
        let image: ImageDescriptor =
            serde_json::from_value(json!({"data": "a.jpg", "description": "Header"})).unwrap();
        assert_eq!(image.filename, "a.jpg");
        assert_eq!(image.description, "Header");

        // Description is optional in storage
        let bare: ImageDescriptor = serde_json::from_value(json!({"data": "b.jpg"})).unwrap();
        assert_eq!(bare.description, "");
    }
}
