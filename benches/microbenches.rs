//! Criterion microbenches for the detection and layout stages.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - duplicate suppression on clustered boxes (deduplicate)
//! - layout inference on a form-sized component list (build_layout_tree)
//! - canvas JSON parsing (from_canvas_str)
//! - contour detection on a synthetic edge map (detect_in_edge_map)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use image::{GrayImage, Luma};
use std::hint::black_box;

use sketchlayout::detect::{deduplicate, detect_in_edge_map, DedupOptions, DetectorConfig};
use sketchlayout::ir::io_canvas_json::from_canvas_str;
use sketchlayout::ir::{BBox, Component, ComponentId, ComponentType};
use sketchlayout::layout::{build_layout_tree, LayoutConfig};

const CANVAS_FIXTURE: &str = include_str!("../tests/fixtures/login_canvas.json");

/// A grid of shapes, each detected twice (outer and inner stroke contour).
fn doubled_grid(rows: i32, cols: i32) -> Vec<Component> {
    let mut out = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let outer = BBox::new(c * 150, r * 80, 120, 50);
            let inner = BBox::new(outer.x + 3, outer.y + 3, 114, 44);
            for bbox in [outer, inner] {
                let id = ComponentId::from_index(out.len());
                out.push(Component::new(id, ComponentType::Button, bbox));
            }
        }
    }
    out
}

fn edge_map_with_outlines(count: u32) -> GrayImage {
    let mut edges = GrayImage::new(1200, 100 * count + 40);
    for i in 0..count {
        let (x0, y0, w, h) = (40, 20 + i * 100, 600, 50);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                let inside = x >= x0 + 4 && x < x0 + w - 4 && y >= y0 + 4 && y < y0 + h - 4;
                if !inside {
                    edges.put_pixel(x, y, Luma([255]));
                }
            }
        }
    }
    edges
}

fn bench_dedup(c: &mut Criterion) {
    let components = doubled_grid(10, 8);
    let opts = DedupOptions::default();

    let mut group = c.benchmark_group("dedup");
    group.throughput(Throughput::Elements(components.len() as u64));

    group.bench_function("deduplicate_160", |b| {
        b.iter(|| {
            let outcome = deduplicate(black_box(components.clone()), &opts);
            black_box(outcome)
        })
    });

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let components = deduplicate(doubled_grid(10, 8), &DedupOptions::default()).kept;
    let config = LayoutConfig::default();

    let mut group = c.benchmark_group("layout");
    group.throughput(Throughput::Elements(components.len() as u64));

    group.bench_function("build_layout_tree_80", |b| {
        b.iter(|| {
            let root = build_layout_tree(black_box(&components), &config).unwrap();
            black_box(root)
        })
    });

    group.finish();
}

fn bench_canvas_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas_parse");
    group.throughput(Throughput::Bytes(CANVAS_FIXTURE.len() as u64));

    group.bench_function("from_canvas_str", |b| {
        b.iter(|| {
            let shapes = from_canvas_str(black_box(CANVAS_FIXTURE)).unwrap();
            black_box(shapes)
        })
    });

    group.finish();
}

fn bench_detect(c: &mut Criterion) {
    let edges = edge_map_with_outlines(8);
    let config = DetectorConfig::default();

    let mut group = c.benchmark_group("detect");
    group.throughput(Throughput::Elements(u64::from(edges.width() * edges.height())));

    group.bench_function("detect_in_edge_map", |b| {
        b.iter(|| {
            let detection = detect_in_edge_map(black_box(&edges), &config);
            black_box(detection)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_dedup,
    bench_layout,
    bench_canvas_parse,
    bench_detect
);
criterion_main!(benches);
