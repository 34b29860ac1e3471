//! Per-Type Field Resolvers
//!
//! The non-recursive half of field resolution: pure functions that turn a
//! raw field value into its envelope representation. The projector owns the
//! dispatch table (one arm per `FieldType`) and the recursive repeater /
//! reference resolution; everything here is plain data-in data-out, which
//! keeps the per-type rules unit-testable without stores.

use crate::models::{CommentId, ImageDescriptor};
use crate::projection::config::ProjectionConfig;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Empty-value test used by the repeater skip rule.
///
/// Mirrors loose falsiness: null, `false`, numeric zero, the empty string,
/// and empty collections all count as empty. A populated child entry with
/// any other value is kept.
pub(crate) fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Parse a child-id list field value.
///
/// The stored shape is a pipe-delimited string (`"1020|1021"`); a JSON array
/// of strings or numbers is accepted as well. Blank segments are dropped, so
/// an empty stored value yields no ids.
pub(crate) fn id_list(raw: &Value) -> Vec<String> {
    match raw {
        Value::String(s) => s
            .split('|')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Scalar fallback: the raw value passes through under the output key.
pub(crate) fn resolve_scalar(data: &mut Map<String, Value>, key: &str, raw: Value) {
    data.insert(key.to_string(), raw);
}

/// Image fields: each stored descriptor becomes `{path, description}` with
/// the path rooted at the page's file directory. Zero images leaves the key
/// absent.
pub(crate) fn resolve_image(
    config: &ProjectionConfig,
    page_id: &str,
    data: &mut Map<String, Value>,
    key: &str,
    raw: Value,
) {
    let images: Vec<ImageDescriptor> = match serde_json::from_value(raw) {
        Ok(images) => images,
        Err(error) => {
            tracing::warn!("Malformed image payload for field {key}: {error}");
            return;
        }
    };

    if images.is_empty() {
        return;
    }

    let entries: Vec<Value> = images
        .iter()
        .map(|image| {
            let mut entry = Map::new();
            entry.insert(
                "path".to_string(),
                Value::String(config.file_url(page_id, &image.filename)),
            );
            entry.insert(
                "description".to_string(),
                Value::String(image.description.clone()),
            );
            Value::Object(entry)
        })
        .collect();

    data.insert(key.to_string(), Value::Array(entries));
}

/// Parse a comments field value into its record list.
///
/// Records travel as JSON objects; anything else in the list is dropped with
/// a warning rather than aborting the field.
pub(crate) fn comment_list(raw: Value) -> Vec<Map<String, Value>> {
    let items = match raw {
        Value::Array(items) => items,
        other => {
            if !value_is_empty(&other) {
                tracing::warn!("Malformed comments payload: expected an array");
            }
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            other => {
                tracing::warn!("Dropping non-object comment record: {other}");
                None
            }
        })
        .collect()
}

/// Collect the ids of comment records for the rating batch query.
pub(crate) fn comment_ids(comments: &[Map<String, Value>]) -> Vec<CommentId> {
    comments
        .iter()
        .filter_map(|record| record.get("id").and_then(Value::as_i64))
        .collect()
}

/// Comments: attach each record's rating (only where one exists) and insert
/// the running average ahead of the record list.
///
/// The average divides the sum of found ratings by the total comment count;
/// with no comments it is `null` rather than a division by zero.
pub(crate) fn resolve_comments(
    data: &mut Map<String, Value>,
    key: &str,
    mut comments: Vec<Map<String, Value>>,
    ratings: &HashMap<CommentId, f64>,
) {
    let mut total = 0.0;
    for record in &mut comments {
        let Some(id) = record.get("id").and_then(Value::as_i64) else {
            continue;
        };
        if let Some(rating) = ratings.get(&id) {
            total += rating;
            record.insert("ratings".to_string(), Value::from(*rating));
        }
    }

    let average = if comments.is_empty() {
        Value::Null
    } else {
        Value::from(total / comments.len() as f64)
    };

    data.insert("average".to_string(), average);
    data.insert(
        key.to_string(),
        Value::Array(comments.into_iter().map(Value::Object).collect()),
    );
}

/// Fold one recursively projected repeater child into a single entry value.
///
/// Per-entry empty values are dropped. A populated `image` field wins the
/// whole entry; otherwise the remaining entries form an object. `None` means
/// the child contributed nothing usable and is skipped entirely.
pub(crate) fn fold_repeater_child(child_data: Map<String, Value>) -> Option<Value> {
    let mut entry = Map::new();
    let mut image = None;

    for (child_key, value) in child_data {
        if value_is_empty(&value) {
            continue;
        }
        if child_key == "image" {
            image = Some(value);
        } else {
            entry.insert(child_key, value);
        }
    }

    match image {
        Some(image) => Some(image),
        None if entry.is_empty() => None,
        None => Some(Value::Object(entry)),
    }
}
