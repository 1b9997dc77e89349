//! Fuzz target for contour detection on arbitrary edge maps.
//!
//! Run with:
//!   cargo +nightly fuzz run edge_map_detect

#![no_main]

use libfuzzer_sys::fuzz_target;
use sketchlayout::detect::fuzz_detect_edge_map;

fuzz_target!(|data: &[u8]| {
    let detection = fuzz_detect_edge_map(data);
    assert_eq!(
        detection.report.component_count(),
        detection.components.len()
    );
});
