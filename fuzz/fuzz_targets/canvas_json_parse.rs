//! Fuzz target for canvas shape JSON parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run canvas_json_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use sketchlayout::ir::io_canvas_json::from_canvas_slice;

fuzz_target!(|data: &[u8]| {
    // Canvas documents are small; skip huge inputs.
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = from_canvas_slice(data);
});
