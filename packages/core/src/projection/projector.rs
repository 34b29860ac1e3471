//! Page Projector - Recursive Field Projection
//!
//! `PageProjector` orchestrates a projection request: it checks the node out
//! into raw read mode, walks the template's field descriptors in declared
//! order, dispatches each to the resolver matching its type tag, and wraps
//! the accumulated `data` map in the status envelope.
//!
//! Repeater and reference fields recurse: each child id is looked up in the
//! content store and projected with the same machinery, depth-first and
//! sequentially, before the parent continues. Comment fields join against
//! the rating store with a single batch query per field.
//!
//! # Error policy
//!
//! - Root page missing: the 404 envelope, never an error
//! - Root lookup failing: fatal, no partial envelope
//! - Child lookup failing or child projection unusable: that child is
//!   skipped with a warning and the projection continues
//! - Rating query failing: ratings treated as absent, projection continues

use crate::models::{ContentNode, Envelope, FieldType};
use crate::projection::config::ProjectionConfig;
use crate::projection::error::ProjectionError;
use crate::projection::resolvers;
use crate::stores::{ContentStore, RatingStore};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future for the recursive projection entry point.
type ProjectionFuture<'a> = Pin<Box<dyn Future<Output = Result<Envelope, ProjectionError>> + Send + 'a>>;

/// Projects content nodes into flat JSON export envelopes.
///
/// The projector holds its collaborators explicitly - no ambient globals -
/// so one instance can serve any number of sequential projection requests
/// against the same stores.
///
/// # Examples
///
/// ```rust,no_run
/// use pagecast_core::projection::{PageProjector, ProjectionConfig};
/// use pagecast_core::stores::{MemoryContentStore, MemoryRatingStore};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let projector = PageProjector::new(
///         Arc::new(MemoryContentStore::new()),
///         Arc::new(MemoryRatingStore::new()),
///         ProjectionConfig::default().with_host_base("https://example.com"),
///     );
///
///     let envelope = projector.project_path("/about/").await?;
///     println!("{}", serde_json::to_string(&envelope)?);
///     Ok(())
/// }
/// ```
pub struct PageProjector {
    content: Arc<dyn ContentStore>,
    ratings: Arc<dyn RatingStore>,
    config: ProjectionConfig,
}

impl PageProjector {
    pub fn new(
        content: Arc<dyn ContentStore>,
        ratings: Arc<dyn RatingStore>,
        config: ProjectionConfig,
    ) -> Self {
        Self {
            content,
            ratings,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Look up a page by id and project it.
    ///
    /// A missing page yields the 404 envelope. A store failure on this root
    /// lookup is fatal and surfaces as [`ProjectionError::LookupFailed`];
    /// no partial envelope is emitted.
    pub async fn project_id(&self, id: &str) -> Result<Envelope, ProjectionError> {
        match self.content.lookup(id).await {
            Ok(Some(mut node)) => self.project(&mut node).await,
            Ok(None) => Ok(Envelope::not_found()),
            Err(error) => Err(ProjectionError::lookup_failed(id, &error)),
        }
    }

    /// Look up a page by hierarchical path and project it.
    ///
    /// Same contract as [`project_id`](Self::project_id).
    pub async fn project_path(&self, path: &str) -> Result<Envelope, ProjectionError> {
        match self.content.lookup_path(path).await {
            Ok(Some(mut node)) => self.project(&mut node).await,
            Ok(None) => Ok(Envelope::not_found()),
            Err(error) => Err(ProjectionError::lookup_failed(path, &error)),
        }
    }

    /// Project an already-looked-up node.
    ///
    /// The node's output formatting mode is forced off for the duration and
    /// restored on every exit path, so the caller gets the node back exactly
    /// as it was handed over.
    pub async fn project(&self, node: &mut ContentNode) -> Result<Envelope, ProjectionError> {
        self.project_inner(node, &[]).await
    }

    /// Project a node, seeding `data` with extra fields read directly from
    /// the node by name before the template walk. `"path"` and `"id"` read
    /// the node's own attributes; any other name reads a template field.
    pub async fn project_with_fields(
        &self,
        node: &mut ContentNode,
        extra_fields: &[&str],
    ) -> Result<Envelope, ProjectionError> {
        self.project_inner(node, extra_fields).await
    }

    /// Recursive projection entry point. Boxed so repeater and reference
    /// resolution can re-enter it for child nodes.
    fn project_inner<'a>(
        &'a self,
        node: &'a mut ContentNode,
        extra_fields: &'a [&'a str],
    ) -> ProjectionFuture<'a> {
        Box::pin(async move {
            // Scoped checkout of the read mode: raw values for the whole
            // projection, previous mode restored on both exit paths.
            let previous = node.set_output_formatting(false);
            let result = self.project_fields(node, extra_fields).await;
            node.set_output_formatting(previous);
            result
        })
    }

    async fn project_fields(
        &self,
        node: &ContentNode,
        extra_fields: &[&str],
    ) -> Result<Envelope, ProjectionError> {
        let mut data = Map::new();

        for name in extra_fields {
            if let Some(value) = intrinsic_value(node, name) {
                data.insert((*name).to_string(), value);
            }
        }

        for field in node.fields() {
            if field.field_type.is_structural() {
                continue;
            }

            let key = self.config.output_key(&field.name);
            let raw = node.get_value(&field.name).unwrap_or(Value::Null);

            match field.field_type {
                FieldType::Repeater => self.resolve_repeater(&mut data, key, raw).await,
                FieldType::Reference => self.resolve_reference(&mut data, key, raw).await,
                FieldType::Image => {
                    resolvers::resolve_image(&self.config, &node.id, &mut data, key, raw)
                }
                FieldType::Comments => self.resolve_comments(&mut data, key, raw).await,
                FieldType::FieldsetOpen | FieldType::FieldsetClose => continue,
                FieldType::Scalar => resolvers::resolve_scalar(&mut data, key, raw),
            }
        }

        Ok(Envelope::ok(node.created_at, node.modified_at, data))
    }

    /// Repeater fields: recursively project each child id and fold the
    /// usable ones in, keyed by id. Children projecting to nothing are
    /// skipped, so the output is sparse rather than one entry per id.
    /// Duplicate ids overwrite earlier entries.
    async fn resolve_repeater(&self, data: &mut Map<String, Value>, key: &str, raw: Value) {
        let ids = resolvers::id_list(&raw);
        let mut entries = Map::new();

        for id in &ids {
            let Some(mut child) = self.lookup_child(id).await else {
                continue;
            };
            let child_data = match self.project_inner(&mut child, &[]).await {
                Ok(envelope) => envelope.into_data(),
                Err(error) => {
                    tracing::warn!("Skipping repeater child {id}: {error}");
                    continue;
                }
            };
            if let Some(entry) = resolvers::fold_repeater_child(child_data) {
                entries.insert(id.clone(), entry);
            }
        }

        if !entries.is_empty() {
            data.insert(key.to_string(), Value::Object(entries));
        }
    }

    /// Reference fields: one positional entry per referenced id, each the
    /// flattened data of the referenced page projected with its `path`.
    /// Unlike repeaters, an entry is written even when the referenced page
    /// projects to nothing - a missing or failed child keeps its position as
    /// an empty object.
    async fn resolve_reference(&self, data: &mut Map<String, Value>, key: &str, raw: Value) {
        let ids = resolvers::id_list(&raw);
        let mut entries = Vec::with_capacity(ids.len());

        for id in &ids {
            let entry = match self.lookup_child(id).await {
                Some(mut child) => match self.project_inner(&mut child, &["path"]).await {
                    Ok(envelope) => Value::Object(envelope.into_data()),
                    Err(error) => {
                        tracing::warn!("Referenced page {id} failed to project: {error}");
                        Value::Object(Map::new())
                    }
                },
                None => Value::Object(Map::new()),
            };
            entries.push(entry);
        }

        data.insert(key.to_string(), Value::Array(entries));
    }

    /// Comments fields: batch-query the rating store with the record ids,
    /// then delegate the attach-and-average step to the pure resolver. A
    /// failed rating query degrades to an empty map.
    async fn resolve_comments(&self, data: &mut Map<String, Value>, key: &str, raw: Value) {
        let comments = resolvers::comment_list(raw);
        let ids = resolvers::comment_ids(&comments);

        let ratings = match self.ratings.batch_query(&ids).await {
            Ok(ratings) => ratings,
            Err(error) => {
                tracing::warn!("Rating query failed, continuing without ratings: {error:#}");
                HashMap::new()
            }
        };

        resolvers::resolve_comments(data, key, comments, &ratings);
    }

    /// Child lookup with the skip-on-failure policy: a store error during
    /// recursive resolution drops that child's contribution instead of
    /// aborting the whole projection.
    async fn lookup_child(&self, id: &str) -> Option<ContentNode> {
        match self.content.lookup(id).await {
            Ok(node) => {
                if node.is_none() {
                    tracing::debug!("Child page {id} not found");
                }
                node
            }
            Err(error) => {
                tracing::warn!("Child lookup failed for {id}, skipping: {error:#}");
                None
            }
        }
    }
}

/// Read an extra field directly from the node. `path` and `id` are node
/// attributes rather than template fields.
fn intrinsic_value(node: &ContentNode, name: &str) -> Option<Value> {
    match name {
        "path" => Some(Value::String(node.path.clone())),
        "id" => Some(Value::String(node.id.clone())),
        _ => node.get_value(name),
    }
}
