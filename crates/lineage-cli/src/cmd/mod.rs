//! Subcommand handlers.
//!
//! Every handler takes its clap `Args` plus a shared [`Context`] and returns
//! `anyhow::Result<()>`; `main` turns errors into a rendered [`CliError`].
//!
//! [`CliError`]: crate::output::CliError

pub mod completions;
pub mod dups;
pub mod path;
pub mod show;
pub mod stats;
pub mod unconnected;

use std::path::Path;

use anyhow::{Context as _, Result};
use lineage_core::config::LineageConfig;
use lineage_core::source::{LoadedGraph, load_graph};
use lineage_core::{GenealogyGraph, Individual};
use lineage_search::{ResolveError, resolve_individual};
use tracing::debug;

use crate::output::OutputMode;

/// Diagnostics printed before the rest are summarised.
const MAX_LISTED_DIAGNOSTICS: usize = 5;

/// Settings shared by every subcommand.
#[derive(Debug)]
pub struct Context<'a> {
    pub file: Option<&'a Path>,
    pub output: OutputMode,
    pub quiet: bool,
    pub config: &'a LineageConfig,
}

impl Context<'_> {
    /// Load the input file, reporting parse diagnostics on stderr.
    pub fn load(&self) -> Result<LoadedGraph> {
        let Some(path) = self.file else {
            anyhow::bail!("no input file: pass --file <PATH> or set LINEAGE_FILE");
        };
        let loaded = load_graph(path)?;
        if !self.quiet {
            report_diagnostics(&loaded);
        }
        Ok(loaded)
    }

    /// Resolve a name or id, attaching which argument it came from.
    pub fn resolve<'g>(
        &self,
        graph: &'g GenealogyGraph,
        what: &str,
        query: &str,
    ) -> Result<&'g Individual> {
        let resolved = resolve_individual(graph, query, self.config.resolve.min_score)
            .map_err(annotate_closest)
            .with_context(|| format!("Failed to resolve {what}"))?;
        debug!(what, query, id = %resolved.individual.id, kind = ?resolved.kind, "resolved");
        Ok(resolved.individual)
    }
}

fn annotate_closest(err: ResolveError) -> anyhow::Error {
    let hint = match &err {
        ResolveError::NoMatch {
            closest: Some((name, score)),
            ..
        } => Some(format!("closest was '{name}' at {score}")),
        _ => None,
    };
    match hint {
        Some(hint) => anyhow::Error::new(err).context(hint),
        None => anyhow::Error::new(err),
    }
}

fn report_diagnostics(loaded: &LoadedGraph) {
    let total = loaded.diagnostics.len();
    if total == 0 {
        return;
    }
    for diagnostic in loaded.diagnostics.iter().take(MAX_LISTED_DIAGNOSTICS) {
        eprintln!("warning: {diagnostic}");
    }
    if total > MAX_LISTED_DIAGNOSTICS {
        eprintln!(
            "warning: {} more malformed line(s) skipped",
            total - MAX_LISTED_DIAGNOSTICS
        );
    }
}
