//! Criterion microbenches for boxmatch parsing and overlap computation.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Annotation JSON parsing (center+size schema)
//! - IoU matrix computation over synthetic box grids

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use boxmatch::ann::io_json::{from_annotation_json_str, CenterSizeMapper};
use boxmatch::geom::{BBox, Boxes, OverlapCalculator};

// Include test fixtures at compile time (no file I/O during benchmark)
const TRUTH_FIXTURE: &str = include_str!("../tests/fixtures/truth.json");

/// Benchmark annotation JSON parsing from string.
fn bench_annotation_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotation_parse");
    group.throughput(Throughput::Bytes(TRUTH_FIXTURE.len() as u64));

    group.bench_function("from_annotation_json_str", |b| {
        b.iter(|| {
            let set = from_annotation_json_str(black_box(TRUTH_FIXTURE), &CenterSizeMapper)
                .unwrap();
            black_box(set)
        })
    });

    group.finish();
}

/// Builds a grid of `n x n` boxes with 50% linear overlap between
/// horizontal neighbors.
fn grid_boxes(n: usize) -> Boxes {
    let mut boxes = Boxes::new();
    for row in 0..n {
        for col in 0..n {
            let x1 = (col * 10) as f64;
            let y1 = (row * 10) as f64;
            boxes.add_box(BBox::from_edges(x1, y1, x1 + 19.0, y1 + 19.0));
        }
    }
    boxes
}

/// Benchmark the full IoU matrix over two box grids.
fn bench_iou_matrix(c: &mut Criterion) {
    let predictions = grid_boxes(16);
    let truth = grid_boxes(16);

    let mut group = c.benchmark_group("overlap");
    // Throughput based on number of box pairs
    group.throughput(Throughput::Elements(
        (predictions.num() * truth.num()) as u64,
    ));

    group.bench_function("ious_per_truth", |b| {
        b.iter(|| {
            let calculator =
                OverlapCalculator::new(black_box(&predictions), black_box(&truth));
            black_box(calculator.ious_per_truth())
        })
    });

    group.bench_function("maximum_ious", |b| {
        b.iter(|| {
            let calculator =
                OverlapCalculator::new(black_box(&predictions), black_box(&truth));
            black_box(calculator.maximum_ious())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_annotation_parse, bench_iou_matrix);
criterion_main!(benches);
