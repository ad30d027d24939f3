//! Reachability from a root individual.
//!
//! With `direct_only` the reachable set is the root, its ancestors (walking
//! father/mother upward) and its descendants (walking children downward).
//! Otherwise every parent, child and spouse edge is followed in both
//! directions. Ids that edges mention but the graph never declared are
//! skipped.
//!
//! Both modes are breadth-first floods over arena positions with a
//! `Vec<bool>` visited set, so depth never touches the call stack.

use std::collections::VecDeque;

use lineage_core::{GenealogyGraph, Individual, LookupError};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edges {
    Parents,
    Children,
    All,
}

fn neighbors(ind: &Individual, edges: Edges) -> impl Iterator<Item = &str> {
    let up = matches!(edges, Edges::Parents | Edges::All);
    let down = matches!(edges, Edges::Children | Edges::All);
    let sideways = edges == Edges::All;
    ind.parent_ids()
        .filter(move |_| up)
        .chain(ind.child_ids.iter().map(String::as_str).filter(move |_| down))
        .chain(ind.spouse_ids.iter().map(String::as_str).filter(move |_| sideways))
}

fn flood(graph: &GenealogyGraph, start: usize, edges: Edges) -> Vec<bool> {
    let mut visited = vec![false; graph.len()];
    visited[start] = true;
    let mut frontier = VecDeque::from([start]);

    while let Some(idx) = frontier.pop_front() {
        let Some(ind) = graph.individual_at(idx) else {
            continue;
        };
        for next in neighbors(ind, edges).filter_map(|id| graph.index_of(id)) {
            if !visited[next] {
                visited[next] = true;
                frontier.push_back(next);
            }
        }
    }
    visited
}

/// Ids of every individual not reachable from `root_id`, in declaration
/// order.
///
/// # Errors
///
/// Returns [`LookupError::UnknownIndividual`] if `root_id` is not in the
/// graph.
#[instrument(skip(graph))]
pub fn find_unconnected(
    graph: &GenealogyGraph,
    root_id: &str,
    direct_only: bool,
) -> Result<Vec<String>, LookupError> {
    let root = graph
        .index_of(root_id)
        .ok_or_else(|| LookupError::UnknownIndividual(root_id.to_string()))?;

    let reached = if direct_only {
        let up = flood(graph, root, Edges::Parents);
        let down = flood(graph, root, Edges::Children);
        up.into_iter().zip(down).map(|(a, b)| a || b).collect()
    } else {
        flood(graph, root, Edges::All)
    };

    let unconnected: Vec<String> = graph
        .individuals()
        .zip(&reached)
        .filter(|(_, seen)| !**seen)
        .map(|(ind, _)| ind.id.clone())
        .collect();
    debug!(
        reached = reached.iter().filter(|seen| **seen).count(),
        unconnected = unconnected.len(),
        "connectivity flood finished"
    );
    Ok(unconnected)
}
