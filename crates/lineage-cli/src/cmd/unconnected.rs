//! `lineage unconnected`: individuals with no link to a root individual.


use anyhow::{Context as _, Result};
use clap::Args;
use lineage_core::format::Template;
use lineage_search::find_unconnected;
use serde::Serialize;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct UnconnectedArgs {
    /// Root individual, by name or id.
    #[arg(short, long)]
    pub root: String,

    /// Count only ancestors and descendants of the root as connected.
    #[arg(long)]
    pub direct: bool,

    /// Per-individual template.
    #[arg(short, long)]
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UnconnectedEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct UnconnectedReport {
    pub root: String,
    pub direct: bool,
    pub total: usize,
    pub unconnected: Vec<UnconnectedEntry>,
}

pub fn run_unconnected(args: &UnconnectedArgs, ctx: &Context<'_>) -> Result<()> {
    let loaded = ctx.load()?;
    let graph = &loaded.graph;
    let root = ctx.resolve(graph, "root", &args.root)?;

    let ids = find_unconnected(graph, &root.id, args.direct)
        .with_context(|| format!("Failed to flood from {}", root.id))?;

    let template = Template::parse(
        args.template
            .as_deref()
            .unwrap_or(&ctx.config.format.template),
    );
    let unknown = ctx.config.format.unknown.as_str();
    let unconnected = ids
        .into_iter()
        .map(|id| {
            let label = graph
                .get_individual(&id)
                .map_or_else(|| id.clone(), |ind| template.render(ind, unknown));
            UnconnectedEntry { id, label }
        })
        .collect();

    let report = UnconnectedReport {
        root: root.id.clone(),
        direct: args.direct,
        total: graph.len(),
        unconnected,
    };

    render_mode(
        ctx.output,
        &report,
        |report, w| {
            for entry in &report.unconnected {
                writeln!(w, "{}\t{}", entry.id, entry.label)?;
            }
            Ok(())
        },
        |report, w| {
            let mode = if report.direct { "direct line" } else { "any relation" };
            pretty_section(w, "Unconnected individuals")?;
            pretty_kv(w, "root", &report.root)?;
            pretty_kv(w, "mode", mode)?;
            pretty_kv(
                w,
                "count",
                format!("{} of {}", report.unconnected.len(), report.total),
            )?;
            if !report.unconnected.is_empty() {
                writeln!(w)?;
            }
            for entry in &report.unconnected {
                writeln!(w, "  {:<10} {}", entry.id, entry.label)?;
            }
            Ok(())
        },
    )
}
