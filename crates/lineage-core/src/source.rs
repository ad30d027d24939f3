//! Input loading: bytes on disk to a built graph.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::graph::{GenealogyGraph, build_graph};
use crate::record::{Diagnostic, parse_records};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A graph together with the parse diagnostics collected on the way.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: GenealogyGraph,
    pub diagnostics: Vec<Diagnostic>,
}

/// Decode input bytes as UTF-8, replacing invalid sequences with U+FFFD
/// and dropping a leading byte-order mark.
#[must_use]
pub fn decode(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8_lossy(body).into_owned()
}

/// Parse and build from already-decoded text.
///
/// # Errors
///
/// Returns the graph builder's integrity error, if any.
pub fn load_str(input: &str) -> Result<LoadedGraph> {
    let parsed = parse_records(input);
    let graph = build_graph(&parsed.records).context("Failed to build genealogy graph")?;
    Ok(LoadedGraph {
        graph,
        diagnostics: parsed.diagnostics,
    })
}

/// Read, decode, parse and build the file at `path`.
///
/// # Errors
///
/// Fails when the file cannot be read or the graph violates an integrity
/// rule. Malformed lines do not fail the load; they come back in
/// [`LoadedGraph::diagnostics`].
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_graph(path: &Path) -> Result<LoadedGraph> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = decode(&bytes);
    if text.contains(char::REPLACEMENT_CHARACTER) {
        warn!("input contains invalid UTF-8, replaced with U+FFFD");
    }

    let loaded = load_str(&text).with_context(|| format!("Failed to load {}", path.display()))?;
    info!(
        bytes = bytes.len(),
        individuals = loaded.graph.len(),
        diagnostics = loaded.diagnostics.len(),
        "input loaded"
    );
    Ok(loaded)
}
