//! Performance benchmarks for page projection
//!
//! Run with: `cargo bench -p pagecast-core`
//!
//! These benchmarks measure the critical path:
//! - Flat scalar projection
//! - Recursive repeater fan-out over in-memory lookups
//! - Comment rating joins

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecast_core::models::{ContentNode, FieldType};
use pagecast_core::projection::{PageProjector, ProjectionConfig};
use pagecast_core::stores::{MemoryContentStore, MemoryRatingStore};
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Build a projector over a page with `child_count` repeater children and a
/// rated comment thread.
async fn setup_projector(child_count: usize) -> PageProjector {
    let content = MemoryContentStore::new();
    let ratings = MemoryRatingStore::new();

    let child_ids: Vec<String> = (0..child_count).map(|i| format!("{}", 100 + i)).collect();
    for id in &child_ids {
        content
            .insert(
                ContentNode::new(id.clone(), format!("/slides/{id}/"))
                    .with_field("site_title", FieldType::Scalar, json!(format!("Slide {id}")))
                    .with_field("site_body", FieldType::Scalar, json!("Body text")),
            )
            .await;
    }

    let comments: Vec<_> = (0..20)
        .map(|i| json!({"id": i, "text": format!("Comment {i}")}))
        .collect();
    for i in 0..20 {
        ratings.insert(i, (i % 5) as f64 + 1.0).await;
    }

    content
        .insert(
            ContentNode::new("1", "/")
                .with_field("site_title", FieldType::Scalar, json!("Home"))
                .with_field("site_body", FieldType::Scalar, json!("Welcome"))
                .with_field(
                    "site_slides",
                    FieldType::Repeater,
                    json!(child_ids.join("|")),
                )
                .with_field("site_comments", FieldType::Comments, json!(comments))
                .with_field(
                    "site_image",
                    FieldType::Image,
                    json!([{"data": "hero.jpg", "description": "Hero"}]),
                ),
        )
        .await;

    PageProjector::new(
        Arc::new(content),
        Arc::new(ratings),
        ProjectionConfig::default().with_host_base("https://example.com"),
    )
}

fn bench_flat_projection(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let projector = rt.block_on(setup_projector(0));

    c.bench_function("project_flat_page", |b| {
        b.iter(|| {
            rt.block_on(async {
                let envelope = projector.project_id(black_box("1")).await.unwrap();
                black_box(envelope)
            })
        })
    });
}

fn bench_repeater_fanout(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let projector = rt.block_on(setup_projector(50));

    c.bench_function("project_page_50_children", |b| {
        b.iter(|| {
            rt.block_on(async {
                let envelope = projector.project_id(black_box("1")).await.unwrap();
                black_box(envelope)
            })
        })
    });
}

criterion_group!(benches, bench_flat_projection, bench_repeater_fanout);
criterion_main!(benches);
