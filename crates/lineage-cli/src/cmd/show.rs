//! `lineage show`: display one individual with their immediate family.
//!
//! Accepts an id or a name; names go through the same closest-match
//! resolution as the other commands.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use lineage_core::format::Template;
use lineage_core::{GenealogyGraph, Individual};
use serde::Serialize;

use super::Context;
use crate::output::{pretty_kv, pretty_rule, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Individual to display: "@I12@" or a name like "Ane Hansdatter".
    pub query: String,

    /// Template for the heading line.
    #[arg(short, long)]
    pub template: Option<String>,
}

/// A relative as listed under an individual.
#[derive(Debug, Serialize)]
pub struct Relative {
    pub id: String,
    pub name: String,
}

/// Full detail as returned in JSON output.
#[derive(Debug, Serialize)]
pub struct ShowIndividual {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub married_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father: Option<Relative>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother: Option<Relative>,
    pub spouses: Vec<Relative>,
    pub children: Vec<Relative>,
    pub occupations: Vec<String>,
}

fn relative(graph: &GenealogyGraph, id: &str) -> Relative {
    Relative {
        id: id.to_string(),
        name: graph
            .get_individual(id)
            .map_or("(not declared)", Individual::display_name)
            .to_string(),
    }
}

fn build_show(graph: &GenealogyGraph, ind: &Individual, label: String) -> ShowIndividual {
    ShowIndividual {
        id: ind.id.clone(),
        label,
        name: ind.name.clone(),
        gender: ind.gender.map(|g| g.as_str().to_string()),
        birth: ind.birth_date.as_ref().map(ToString::to_string),
        married_name: ind.married_name.clone(),
        father: ind.father_id.as_deref().map(|id| relative(graph, id)),
        mother: ind.mother_id.as_deref().map(|id| relative(graph, id)),
        spouses: ind.spouse_ids.iter().map(|id| relative(graph, id)).collect(),
        children: ind.child_ids.iter().map(|id| relative(graph, id)).collect(),
        occupations: ind.occupations.clone(),
    }
}

fn write_relatives(w: &mut dyn Write, heading: &str, people: &[Relative]) -> std::io::Result<()> {
    if people.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{heading}:")?;
    for p in people {
        writeln!(w, "  {:<10} {}", p.id, p.name)?;
    }
    Ok(())
}

fn render_text(item: &ShowIndividual, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}\t{}", item.id, item.label)?;
    if let Some(ref birth) = item.birth {
        writeln!(w, "birth\t{birth}")?;
    }
    for (key, parent) in [("father", &item.father), ("mother", &item.mother)] {
        if let Some(p) = parent {
            writeln!(w, "{key}\t{}\t{}", p.id, p.name)?;
        }
    }
    for p in &item.spouses {
        writeln!(w, "spouse\t{}\t{}", p.id, p.name)?;
    }
    for p in &item.children {
        writeln!(w, "child\t{}\t{}", p.id, p.name)?;
    }
    for occupation in &item.occupations {
        writeln!(w, "occupation\t{occupation}")?;
    }
    Ok(())
}

fn render_pretty(item: &ShowIndividual, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("{}  {}", item.id, item.label))?;
    pretty_kv(w, "name", item.name.as_deref().unwrap_or("-"))?;
    pretty_kv(w, "gender", item.gender.as_deref().unwrap_or("-"))?;
    pretty_kv(w, "birth", item.birth.as_deref().unwrap_or("-"))?;
    if let Some(ref married) = item.married_name {
        pretty_kv(w, "married", married)?;
    }
    if let Some(ref father) = item.father {
        pretty_kv(w, "father", format!("{} {}", father.id, father.name))?;
    }
    if let Some(ref mother) = item.mother {
        pretty_kv(w, "mother", format!("{} {}", mother.id, mother.name))?;
    }
    if !item.occupations.is_empty() {
        pretty_kv(w, "occupation", item.occupations.join(", "))?;
    }
    write_relatives(w, "Spouses", &item.spouses)?;
    write_relatives(w, "Children", &item.children)?;
    pretty_rule(w)
}

pub fn run_show(args: &ShowArgs, ctx: &Context<'_>) -> Result<()> {
    let loaded = ctx.load()?;
    let graph = &loaded.graph;
    let ind = ctx.resolve(graph, "individual", &args.query)?;

    let template = Template::parse(
        args.template
            .as_deref()
            .unwrap_or(&ctx.config.format.template),
    );
    let label = template.render(ind, &ctx.config.format.unknown);
    let item = build_show(graph, ind, label);

    render_mode(ctx.output, &item, render_text, render_pretty)
}
