#![no_main]

use libfuzzer_sys::fuzz_target;
use lineage_core::source::load_str;
use lineage_search::{DuplicateConfig, find_branches, find_top_k, find_unconnected};

fuzz_target!(|data: &str| {
    let Ok(loaded) = load_str(data) else {
        return;
    };
    let graph = &loaded.graph;
    let ids: Vec<&str> = graph.individual_ids().take(8).collect();

    if let (Some(first), Some(last)) = (ids.first(), ids.last()) {
        // Cycles and dangling children are errors, never panics.
        let _ = find_branches(graph, first, last, [first]);
        let unconnected = find_unconnected(graph, first, false).expect("root is declared");
        assert!(!unconnected.iter().any(|id| id.as_str() == *first));
    }

    let found = find_top_k(graph, &ids, 4, &DuplicateConfig::default()).expect("ids are declared");
    assert!(found.len() <= 4);
});
