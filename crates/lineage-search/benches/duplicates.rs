use std::fmt::Write as _;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lineage_core::{GenealogyGraph, build_graph, parse_records};
use lineage_search::{DuplicateConfig, find_top_k};

const SIZES: [usize; 3] = [250, 1_000, 4_000];

const GIVEN: [&str; 8] = [
    "Lars", "Lene", "Niels", "Nanna", "Peder", "Petra", "Karen", "Kristian",
];
const SURNAMES: [&str; 6] = ["Jensen", "Nielsen", "Hansen", "Pedersen", "Larsen", "Holm"];

/// Deterministic synthetic population with plenty of gate survivors.
fn population(n: usize) -> GenealogyGraph {
    let mut input = String::from("0 HEAD\n");
    for i in 0..n {
        let given = GIVEN[i % GIVEN.len()];
        let surname = SURNAMES[(i / GIVEN.len()) % SURNAMES.len()];
        let sex = if i % 2 == 0 { "M" } else { "F" };
        let _ = writeln!(
            input,
            "0 @I{i}@ INDI\n1 NAME {given} /{surname}/\n1 SEX {sex}\n1 BIRT\n2 DATE {}",
            1850 + (i * 7) % 40
        );
    }
    input.push_str("0 TRLR\n");
    build_graph(&parse_records(&input).records).expect("synthetic graph builds")
}

fn bench_find_top_k(c: &mut Criterion) {
    let mut group = c.benchmark_group("duplicates.find_top_k");
    let cfg = DuplicateConfig::default();

    for n in SIZES {
        let graph = population(n);
        group.throughput(Throughput::Elements((n * (n - 1) / 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| {
                let found = find_top_k(graph, graph.individual_ids(), 10, &cfg)
                    .expect("candidates are graph ids");
                black_box(found.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_top_k);
criterion_main!(benches);
