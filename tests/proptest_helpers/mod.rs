#![allow(dead_code)]

use boxmatch::ann::{AnnotationSet, ImageAnnotation};
use boxmatch::geom::{BBox, BBoxParts, Boxes};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A center+size box seed that resolves to exact integer edges: integer
/// center, even positive length. Keeps round-trips drift-free.
pub type CenterSeed = (i32, i32, u16, u16, u8);

pub fn center_seed_strategy() -> impl Strategy<Value = CenterSeed> {
    (
        -500i32..=500,
        -500i32..=500,
        1u16..=250,
        1u16..=250,
        1u8..=10,
    )
}

/// Builds a labeled box from a center seed. Lengths are doubled so the
/// half-length is integral.
pub fn bbox_from_center_seed(seed: CenterSeed) -> BBox {
    let (cx, cy, half_w, half_h, label) = seed;
    BBox::from_parts(BBoxParts {
        cx: Some(cx as f64),
        cy: Some(cy as f64),
        w: Some(2.0 * half_w as f64),
        h: Some(2.0 * half_h as f64),
        label: Some(label as i64),
        ..Default::default()
    })
    .expect("center seed is a valid parameterization")
}

pub fn arb_boxes(max_boxes: usize) -> BoxedStrategy<Boxes> {
    proptest::collection::vec(center_seed_strategy(), 0..=max_boxes)
        .prop_map(|seeds| seeds.into_iter().map(bbox_from_center_seed).collect())
        .boxed()
}

pub fn arb_annotation_set(max_images: usize, max_boxes: usize) -> BoxedStrategy<AnnotationSet> {
    proptest::collection::vec(arb_boxes(max_boxes), 0..=max_images)
        .prop_map(|all_boxes| {
            all_boxes
                .into_iter()
                .enumerate()
                .map(|(idx, boxes)| ImageAnnotation::new(format!("{}.png", idx + 1), boxes))
                .collect::<Vec<_>>()
                .into()
        })
        .boxed()
}
