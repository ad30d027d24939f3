#![no_main]

use libfuzzer_sys::fuzz_target;
use lineage_core::source::decode;
use lineage_core::{build_graph, parse_records};

fuzz_target!(|data: &[u8]| {
    let text = decode(data);
    let parsed = parse_records(&text);
    for diagnostic in &parsed.diagnostics {
        assert!(diagnostic.line() >= 1);
    }
    let _ = build_graph(&parsed.records);
});
