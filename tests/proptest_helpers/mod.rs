#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use sketchlayout::ir::{BBox, Component, ComponentId, ComponentType};

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

pub fn arb_component_type() -> BoxedStrategy<ComponentType> {
    prop::sample::select(ComponentType::ALL.to_vec()).boxed()
}

pub fn arb_bbox(max_coord: i32, max_size: i32) -> BoxedStrategy<BBox> {
    (0..max_coord, 0..max_coord, 1..=max_size, 1..=max_size)
        .prop_map(|(x, y, w, h)| BBox::new(x, y, w, h))
        .boxed()
}

/// Components with unique sequential ids and arbitrary (possibly
/// overlapping) boxes.
pub fn arb_components(max_len: usize) -> BoxedStrategy<Vec<Component>> {
    prop::collection::vec((arb_component_type(), arb_bbox(1000, 300)), 0..=max_len)
        .prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (component_type, bbox))| {
                    Component::new(ComponentId::from_index(i), component_type, bbox)
                })
                .collect()
        })
        .boxed()
}

/// Clusters of near-identical boxes, like the outer and inner contours of
/// thick strokes.
pub fn arb_jittered_components(max_shapes: usize) -> BoxedStrategy<Vec<Component>> {
    let shape = (arb_component_type(), arb_bbox(800, 200), 1..4usize, 0..4i32);
    prop::collection::vec(shape, 0..=max_shapes)
        .prop_map(|shapes| {
            let mut out = Vec::new();
            for (component_type, bbox, copies, jitter) in shapes {
                for k in 0..copies as i32 {
                    let d = k * jitter;
                    let jittered = BBox::new(
                        bbox.x + d,
                        bbox.y + d,
                        (bbox.width - 2 * d).max(1),
                        (bbox.height - 2 * d).max(1),
                    );
                    let id = ComponentId::from_index(out.len());
                    out.push(Component::new(id, component_type, jittered));
                }
            }
            out
        })
        .boxed()
}
