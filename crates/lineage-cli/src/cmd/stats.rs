//! `lineage stats`: size of the loaded tree and how clean the input was.


use anyhow::Result;
use lineage_core::GenealogyGraph;
use lineage_core::source::LoadedGraph;
use serde::Serialize;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TreeStats {
    pub individuals: usize,
    pub families: usize,
    pub named: usize,
    pub with_birth_year: usize,
    /// Individuals with neither parents nor spouses nor children.
    pub isolated: usize,
    pub diagnostics: usize,
}

fn is_isolated(graph: &GenealogyGraph, id: &str) -> bool {
    graph.get_individual(id).is_some_and(|ind| {
        ind.father_id.is_none()
            && ind.mother_id.is_none()
            && ind.spouse_ids.is_empty()
            && ind.child_ids.is_empty()
    })
}

fn collect_stats(loaded: &LoadedGraph) -> TreeStats {
    let graph = &loaded.graph;
    TreeStats {
        individuals: graph.len(),
        families: graph.family_count(),
        named: graph.individuals().filter(|i| i.name.is_some()).count(),
        with_birth_year: graph
            .individuals()
            .filter(|i| i.birth_year().is_some())
            .count(),
        isolated: graph
            .individual_ids()
            .filter(|id| is_isolated(graph, id))
            .count(),
        diagnostics: loaded.diagnostics.len(),
    }
}

pub fn run_stats(ctx: &Context<'_>) -> Result<()> {
    let loaded = ctx.load()?;
    let stats = collect_stats(&loaded);

    render_mode(
        ctx.output,
        &stats,
        |s, w| {
            writeln!(w, "individuals\t{}", s.individuals)?;
            writeln!(w, "families\t{}", s.families)?;
            writeln!(w, "named\t{}", s.named)?;
            writeln!(w, "with_birth_year\t{}", s.with_birth_year)?;
            writeln!(w, "isolated\t{}", s.isolated)?;
            writeln!(w, "diagnostics\t{}", s.diagnostics)
        },
        |s, w| {
            pretty_section(w, "Tree")?;
            pretty_kv(w, "individuals", s.individuals.to_string())?;
            pretty_kv(w, "families", s.families.to_string())?;
            pretty_kv(w, "named", s.named.to_string())?;
            pretty_kv(w, "born (year)", s.with_birth_year.to_string())?;
            pretty_kv(w, "isolated", s.isolated.to_string())?;
            pretty_kv(w, "malformed", s.diagnostics.to_string())
        },
    )
}
