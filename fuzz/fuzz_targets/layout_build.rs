//! Fuzz target for layout inference.
//!
//! Every 8 bytes become one component box. Layout must never fail on
//! components with unique ids.
//!
//! Run with:
//!   cargo +nightly fuzz run layout_build

#![no_main]

use libfuzzer_sys::fuzz_target;
use sketchlayout::ir::{BBox, Component, ComponentId, ComponentType};
use sketchlayout::layout::{build_layout_tree, LayoutConfig};

fuzz_target!(|data: &[u8]| {
    let components: Vec<Component> = data
        .chunks_exact(8)
        .take(256)
        .enumerate()
        .map(|(i, c)| {
            let x = i16::from_le_bytes([c[0], c[1]]) as i32;
            let y = i16::from_le_bytes([c[2], c[3]]) as i32;
            let w = u16::from_le_bytes([c[4], c[5]]) as i32 + 1;
            let h = (c[6] as i32) + 1;
            let component_type = ComponentType::ALL[c[7] as usize % ComponentType::ALL.len()];
            Component::new(ComponentId::from_index(i), component_type, BBox::new(x, y, w, h))
        })
        .collect();

    let root = build_layout_tree(&components, &LayoutConfig::default())
        .expect("unique ids always lay out");
    assert_eq!(root.leaf_count(), components.len());
});
