use std::collections::HashSet;
use std::fmt::Write as _;

use lineage_core::{GenealogyGraph, build_graph, parse_records};
use lineage_search::{DuplicateConfig, find_top_k};
use proptest::prelude::*;

/// `(name, sex, birth)` triples; an empty birth string omits the block.
fn graph_of(people: &[(&str, &str, &str)]) -> GenealogyGraph {
    let mut input = String::from("0 HEAD\n");
    for (i, (name, sex, birth)) in people.iter().enumerate() {
        let _ = writeln!(input, "0 @I{i}@ INDI\n1 NAME {name}\n1 SEX {sex}");
        if !birth.is_empty() {
            let _ = writeln!(input, "1 BIRT\n2 DATE {birth}");
        }
    }
    input.push_str("0 TRLR\n");
    build_graph(&parse_records(&input).records).expect("build")
}

fn all(graph: &GenealogyGraph, k: usize, cfg: &DuplicateConfig) -> Vec<(String, String, u8)> {
    find_top_k(graph, graph.individual_ids(), k, cfg)
        .expect("scan")
        .into_iter()
        .map(|c| (c.name_a, c.name_b, c.score))
        .collect()
}

#[test]
fn lars_and_lars_j_surface() {
    let g = graph_of(&[
        ("Lone", "F", "1900"),
        ("Peder", "M", "1900"),
        ("Anne", "F", "1900"),
        ("Lars", "M", "1900"),
        ("Pande", "F", "1900"),
        ("Niels", "M", "1900"),
        ("Leif", "M", "1900"),
        ("Lars J", "M", "1902"),
    ]);
    let found = all(&g, 3, &DuplicateConfig::default());
    assert_eq!(found[0], ("Lars".to_string(), "Lars J".to_string(), 80));
    // Different initials never pair, however similar.
    assert!(!found.iter().any(|(a, b, _)| a == "Anne" || b == "Anne"));
}

#[test]
fn identical_names_different_gender_do_not_pair() {
    let g = graph_of(&[("Kim Olsen", "M", "1950"), ("Kim Olsen", "F", "1950")]);
    assert!(all(&g, 10, &DuplicateConfig::default()).is_empty());
}

#[test]
fn unknown_gender_does_not_pair() {
    let g = graph_of(&[("Kim Olsen", "M", "1950"), ("Kim Olsen", "U", "1950")]);
    assert!(all(&g, 10, &DuplicateConfig::default()).is_empty());
}

#[test]
fn year_gap_is_strict() {
    let g = graph_of(&[("Ole", "M", "1900"), ("Ole", "M", "1905"), ("Ole", "M", "1904")]);
    let found = find_top_k(&g, g.individual_ids(), 10, &DuplicateConfig::default()).expect("scan");
    let gaps: Vec<Option<u32>> = found.iter().map(|c| c.year_gap).collect();
    assert_eq!(found.len(), 2);
    assert!(gaps.contains(&Some(4)));
    assert!(gaps.contains(&Some(1)));
}

#[test]
fn undated_individuals_need_opt_in() {
    let g = graph_of(&[("Ole", "M", ""), ("Ole", "M", "1900"), ("Ole", "M", "Easter 1900")]);
    assert!(all(&g, 10, &DuplicateConfig::default()).is_empty());

    let permissive = DuplicateConfig {
        require_birth_year: false,
        ..DuplicateConfig::default()
    };
    let found = find_top_k(&g, g.individual_ids(), 10, &permissive).expect("scan");
    assert_eq!(found.len(), 3);
    assert!(found.iter().all(|c| c.year_gap.is_none() && c.score == 100));
}

#[test]
fn initial_gate_ignores_case() {
    let g = graph_of(&[("ane Berg", "F", "1880"), ("Ane Berg", "F", "1881")]);
    let found = all(&g, 10, &DuplicateConfig::default());
    assert_eq!(found, vec![("ane Berg".to_string(), "Ane Berg".to_string(), 100)]);
}

#[test]
fn repeated_candidate_ids_count_once() {
    let g = graph_of(&[("Ole", "M", "1900"), ("Ole", "M", "1901")]);
    let ids = ["@I0@", "@I1@", "@I0@", "@I1@"];
    let found = find_top_k(&g, ids, 10, &DuplicateConfig::default()).expect("scan");
    assert_eq!(found.len(), 1);
}

#[test]
fn unknown_candidate_is_an_error() {
    let g = graph_of(&[("Ole", "M", "1900")]);
    assert!(find_top_k(&g, ["@I0@", "@NOPE@"], 10, &DuplicateConfig::default()).is_err());
}

fn arb_people() -> impl Strategy<Value = Vec<(String, bool, u16)>> {
    proptest::collection::vec(("[AB][a-c]{0,4}", any::<bool>(), 1900u16..1912), 0..24)
}

proptest! {
    #[test]
    fn top_k_invariants(people in arb_people(), k in 0usize..8) {
        let rows: Vec<(String, &str, String)> = people
            .iter()
            .map(|(name, male, year)| (name.clone(), if *male { "M" } else { "F" }, year.to_string()))
            .collect();
        let borrowed: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|(n, s, y)| (n.as_str(), *s, y.as_str()))
            .collect();
        let g = graph_of(&borrowed);
        let found = find_top_k(&g, g.individual_ids(), k, &DuplicateConfig::default())
            .expect("scan");

        prop_assert!(found.len() <= k);
        for pair in found.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        let mut keys = HashSet::new();
        for c in &found {
            prop_assert_ne!(&c.id_a, &c.id_b);
            let key = if c.id_a < c.id_b {
                (c.id_a.clone(), c.id_b.clone())
            } else {
                (c.id_b.clone(), c.id_a.clone())
            };
            prop_assert!(keys.insert(key));
            prop_assert!(c.year_gap.is_some_and(|gap| gap < 5));
            prop_assert!(c.score <= 100);
        }
    }
}
