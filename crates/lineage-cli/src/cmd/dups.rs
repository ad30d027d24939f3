//! `lineage dups`: the most similar pairs of likely duplicated individuals.


use anyhow::{Context as _, Result};
use clap::Args;
use lineage_search::{DuplicateCandidate, DuplicateConfig, find_top_k};
use serde::Serialize;
use tracing::info;

use super::Context;
use crate::output::{pretty_kv, pretty_rule, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct DupsArgs {
    /// Number of pairs to report (default from config, 10).
    #[arg(short = 'k', long = "top")]
    pub top: Option<usize>,

    /// Birth years must differ by strictly less than this (default 5).
    #[arg(long)]
    pub max_year_gap: Option<u32>,

    /// Also pair individuals with no known birth year.
    #[arg(long)]
    pub allow_undated: bool,
}

#[derive(Debug, Serialize)]
pub struct DupsReport {
    pub scanned: usize,
    pub top: usize,
    pub max_year_gap: u32,
    pub candidates: Vec<DuplicateCandidate>,
}

/// Merge config defaults with flags; flags win.
fn settings(args: &DupsArgs, ctx: &Context<'_>) -> (usize, DuplicateConfig) {
    let mut cfg = DuplicateConfig::from(&ctx.config.duplicates);
    if let Some(gap) = args.max_year_gap {
        cfg.max_year_gap = gap;
    }
    if args.allow_undated {
        cfg.require_birth_year = false;
    }
    (args.top.unwrap_or(ctx.config.duplicates.top_k), cfg)
}

fn gap_text(gap: Option<u32>) -> String {
    gap.map_or_else(|| "?".to_string(), |g| g.to_string())
}

pub fn run_dups(args: &DupsArgs, ctx: &Context<'_>) -> Result<()> {
    let loaded = ctx.load()?;
    let graph = &loaded.graph;
    let (top, cfg) = settings(args, ctx);

    let candidates = find_top_k(graph, graph.individual_ids(), top, &cfg)
        .context("Failed to scan for duplicates")?;
    info!(scanned = graph.len(), found = candidates.len(), "duplicate scan done");

    let report = DupsReport {
        scanned: graph.len(),
        top,
        max_year_gap: cfg.max_year_gap,
        candidates,
    };

    render_mode(
        ctx.output,
        &report,
        |report, w| {
            for c in &report.candidates {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    c.score,
                    c.id_a,
                    c.id_b,
                    c.name_a,
                    c.name_b,
                    gap_text(c.year_gap)
                )?;
            }
            Ok(())
        },
        |report, w| {
            pretty_section(w, "Possible duplicates")?;
            pretty_kv(w, "scanned", report.scanned.to_string())?;
            pretty_kv(w, "year gap", format!("< {}", report.max_year_gap))?;
            pretty_kv(
                w,
                "found",
                format!("{} (top {})", report.candidates.len(), report.top),
            )?;
            if report.candidates.is_empty() {
                return Ok(());
            }
            writeln!(w)?;
            writeln!(w, "{:>5}  {:<28} {:<28} {:>4}", "SCORE", "FIRST", "SECOND", "GAP")?;
            pretty_rule(w)?;
            for c in &report.candidates {
                writeln!(
                    w,
                    "{:>5}  {:<28} {:<28} {:>4}",
                    c.score,
                    format!("{} {}", c.id_a, c.name_a),
                    format!("{} {}", c.id_b, c.name_b),
                    gap_text(c.year_gap)
                )?;
            }
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputMode;
    use lineage_core::config::LineageConfig;

    #[test]
    fn flags_override_config() {
        let config = LineageConfig::default();
        let ctx = Context {
            file: None,
            output: OutputMode::Text,
            quiet: true,
            config: &config,
        };
        let args = DupsArgs {
            top: Some(3),
            max_year_gap: Some(2),
            allow_undated: true,
        };
        let (top, cfg) = settings(&args, &ctx);
        assert_eq!(top, 3);
        assert_eq!(cfg.max_year_gap, 2);
        assert!(!cfg.require_birth_year);

        let defaults = DupsArgs {
            top: None,
            max_year_gap: None,
            allow_undated: false,
        };
        let (top, cfg) = settings(&defaults, &ctx);
        assert_eq!(top, 10);
        assert_eq!(cfg, DuplicateConfig::default());
    }

    #[test]
    fn unknown_gap_renders_as_question_mark() {
        assert_eq!(gap_text(None), "?");
        assert_eq!(gap_text(Some(3)), "3");
    }
}
