//! Projection Configuration
//!
//! Caller-supplied constants the projector needs beyond its stores: the
//! field-name prefix to strip from output keys, and the two URL pieces that
//! root image paths.

use serde::{Deserialize, Serialize};

/// Configuration for a [`PageProjector`](crate::projection::PageProjector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    /// Prefix stripped from field names to form output keys, e.g. `"site_"`.
    /// Display naming only; stripping is applied at most once per key.
    pub field_prefix: String,

    /// Scheme and host for image URLs, e.g. `"https://example.com"`.
    /// Derived from the serving transport by the embedding layer.
    pub host_base: String,

    /// Path prefix under which page files are served, e.g.
    /// `"/site/assets/files/"`. Must carry leading and trailing slashes.
    pub files_base_url: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            field_prefix: "site_".to_string(),
            host_base: String::new(),
            files_base_url: "/site/assets/files/".to_string(),
        }
    }
}

impl ProjectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field-name prefix (builder).
    pub fn with_field_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.field_prefix = prefix.into();
        self
    }

    /// Set the scheme + host for image URLs (builder).
    pub fn with_host_base(mut self, host_base: impl Into<String>) -> Self {
        self.host_base = host_base.into();
        self
    }

    /// Set the files path prefix (builder).
    pub fn with_files_base_url(mut self, files_base_url: impl Into<String>) -> Self {
        self.files_base_url = files_base_url.into();
        self
    }

    /// Derive the output key for a field name.
    ///
    /// Strips the configured prefix once if present, otherwise returns the
    /// name unchanged. Idempotent for names that do not repeat the prefix.
    pub fn output_key<'a>(&self, name: &'a str) -> &'a str {
        if self.field_prefix.is_empty() {
            return name;
        }
        name.strip_prefix(&self.field_prefix).unwrap_or(name)
    }

    /// Build the absolute URL for a file attached to a page.
    pub fn file_url(&self, page_id: &str, filename: &str) -> String {
        format!(
            "{}{}{}/{}",
            self.host_base, self.files_base_url, page_id, filename
        )
    }
}
