//! Fuzz target for annotation JSON parsing (corner+size schema).
//!
//! This fuzzer feeds arbitrary byte sequences to the JSON reader,
//! checking for panics, crashes, or hangs.

#![no_main]

use boxmatch::ann::io_json::{from_annotation_json_slice, CornerSizeMapper};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_annotation_json_slice(data, &CornerSizeMapper);
});
