//! `lineage path`: every line of descent from an ancestor to a descendant.
//!
//! Names are resolved to ids first; each branch is printed descendant first,
//! one individual per step, rendered with the format template. `--dot` emits
//! the union of all branches as a single Graphviz digraph instead.

use std::collections::HashMap;
use std::io::Write;

use anyhow::{Context as _, Result};
use clap::Args;
use lineage_core::GenealogyGraph;
use lineage_core::format::Template;
use lineage_search::{Branch, find_branches};
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Ancestor name or id (e.g. "Anders Holm" or "@I1@").
    #[arg(short, long)]
    pub ancestor: String,

    /// Descendant name or id.
    #[arg(short, long)]
    pub descendant: String,

    /// Only keep branches passing through this individual. Repeatable.
    #[arg(long = "via", value_name = "NAME|ID")]
    pub via: Vec<String>,

    /// Per-individual template (`%n` name, `%g` gender, `%b` birth, `%o` occupation).
    #[arg(short, long)]
    pub template: Option<String>,

    /// Emit a Graphviz digraph of all branches instead of a list.
    #[arg(long)]
    pub dot: bool,
}

#[derive(Debug, Serialize)]
pub struct Step {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct PathReport {
    pub ancestor: String,
    pub descendant: String,
    pub via: Vec<String>,
    /// Descendant first, ancestor last.
    pub branches: Vec<Vec<Step>>,
}

pub fn run_path(args: &PathArgs, ctx: &Context<'_>) -> Result<()> {
    let loaded = ctx.load()?;
    let graph = &loaded.graph;

    let ancestor = ctx.resolve(graph, "ancestor", &args.ancestor)?;
    let descendant = ctx.resolve(graph, "descendant", &args.descendant)?;
    let via = args
        .via
        .iter()
        .map(|q| ctx.resolve(graph, "--via", q).map(|ind| ind.id.clone()))
        .collect::<Result<Vec<_>>>()?;

    let branches = find_branches(graph, &ancestor.id, &descendant.id, &via)
        .with_context(|| format!("Failed to trace {} to {}", ancestor.id, descendant.id))?;

    let template = Template::parse(
        args.template
            .as_deref()
            .unwrap_or(&ctx.config.format.template),
    );
    let unknown = ctx.config.format.unknown.as_str();

    if args.dot {
        let dot = render_dot(graph, &branches, &template, unknown);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write!(out, "{dot}")?;
        return Ok(());
    }

    let report = PathReport {
        ancestor: ancestor.id.clone(),
        descendant: descendant.id.clone(),
        via,
        branches: branches
            .iter()
            .map(|branch| label_branch(graph, branch, &template, unknown))
            .collect(),
    };

    render_mode(
        ctx.output,
        &report,
        |report, w| {
            if report.branches.is_empty() {
                return writeln!(w, "no path");
            }
            for branch in &report.branches {
                let labels: Vec<&str> = branch.iter().map(|s| s.label.as_str()).collect();
                writeln!(w, "{}", labels.join(" -> "))?;
            }
            Ok(())
        },
        |report, w| {
            pretty_section(w, "Lines of descent")?;
            pretty_kv(w, "ancestor", &report.ancestor)?;
            pretty_kv(w, "descendant", &report.descendant)?;
            if !report.via.is_empty() {
                pretty_kv(w, "via", report.via.join(", "))?;
            }
            pretty_kv(w, "branches", report.branches.len().to_string())?;
            if report.branches.is_empty() {
                writeln!(w)?;
                return writeln!(w, "no path");
            }
            for (n, branch) in report.branches.iter().enumerate() {
                writeln!(w)?;
                writeln!(w, "#{}", n + 1)?;
                for (depth, step) in branch.iter().enumerate() {
                    writeln!(w, "  {depth:>3}  {}  {}", step.id, step.label)?;
                }
            }
            Ok(())
        },
    )
}

fn label_branch(
    graph: &GenealogyGraph,
    branch: &Branch,
    template: &Template,
    unknown: &str,
) -> Vec<Step> {
    branch
        .iter()
        .map(|id| Step {
            id: id.clone(),
            label: label_of(graph, id, template, unknown),
        })
        .collect()
}

fn label_of(graph: &GenealogyGraph, id: &str, template: &Template, unknown: &str) -> String {
    graph
        .get_individual(id)
        .map_or_else(|| id.to_string(), |ind| template.render(ind, unknown))
}

/// Union of all branch edges, parent to child, as Graphviz text.
fn render_dot(
    graph: &GenealogyGraph,
    branches: &[Branch],
    template: &Template,
    unknown: &str,
) -> String {
    let mut dot: DiGraph<String, &str> = DiGraph::new();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

    for branch in branches {
        for id in branch {
            nodes
                .entry(id.as_str())
                .or_insert_with(|| dot.add_node(label_of(graph, id, template, unknown)));
        }
        for pair in branch.windows(2) {
            let (child, parent) = (nodes[pair[0].as_str()], nodes[pair[1].as_str()]);
            if !dot.contains_edge(parent, child) {
                dot.add_edge(parent, child, "");
            }
        }
    }

    Dot::with_config(&dot, &[Config::EdgeNoLabel]).to_string()
}
