//! Branch enumeration between an ancestor and a descendant.
//!
//! # Overview
//!
//! [`find_branches`] walks `child_ids` edges depth-first from the ancestor
//! and records every simple descent path that ends at the descendant. The
//! walk does not continue below the descendant. Each [`Branch`] is ordered
//! descendant first, ancestor last.
//!
//! # Design
//!
//! - **Explicit stack**: each frame holds an individual and the position of
//!   its next unvisited child, so depth is bounded by heap, not call stack.
//! - **Cycle guard**: the ids on the current path are kept in a set. Reaching
//!   one of them again means the descent data loops, and the search fails
//!   with [`PathError::DescentCycle`] instead of running forever.
//! - **Every path, not the shortest**: the enumeration is exponential in
//!   pathological multi-marriage graphs. Family trees are sparse enough for
//!   this to be fine in practice.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashSet;

use lineage_core::error::ErrorCode;
use lineage_core::{GenealogyGraph, Individual, LookupError};
use tracing::{debug, instrument};

/// Individual ids from a descendant up to and including the ancestor.
pub type Branch = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// `path` runs from the ancestor to the repeated id, which appears twice.
    #[error("descent cycle: {}", path.join(" -> "))]
    DescentCycle { path: Vec<String> },
}

impl PathError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Lookup(err) => err.error_code(),
            Self::DescentCycle { .. } => ErrorCode::DescentCycle,
        }
    }
}

struct Frame<'g> {
    individual: &'g Individual,
    next_child: usize,
}

/// Every descent path from `ancestor_id` to `descendant_id` that passes
/// through all of `required_ids`.
///
/// An empty result means no such path exists. `find_branches(a, a, [])`
/// yields the single branch `[a]`.
///
/// # Errors
///
/// - [`PathError::Lookup`] if the ancestor, the descendant, a required id,
///   or a child met during the walk is not in the graph.
/// - [`PathError::DescentCycle`] if the walk meets an id already on the
///   current path.
#[instrument(skip(graph, required_ids))]
pub fn find_branches<I, S>(
    graph: &GenealogyGraph,
    ancestor_id: &str,
    descendant_id: &str,
    required_ids: I,
) -> Result<Vec<Branch>, PathError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let root = graph.individual(ancestor_id)?;
    graph.individual(descendant_id)?;

    let mut required: Vec<String> = Vec::new();
    for id in required_ids {
        let id = id.as_ref();
        graph.individual(id)?;
        if !required.iter().any(|r| r == id) {
            required.push(id.to_string());
        }
    }

    let mut branches = descend(graph, root, descendant_id)?;
    let found = branches.len();
    if !required.is_empty() {
        branches.retain(|branch| required.iter().all(|r| branch.contains(r)));
    }
    debug!(found, kept = branches.len(), "branch search finished");
    Ok(branches)
}

fn descend(
    graph: &GenealogyGraph,
    root: &Individual,
    descendant_id: &str,
) -> Result<Vec<Branch>, PathError> {
    if root.id == descendant_id {
        return Ok(vec![vec![root.id.clone()]]);
    }

    let mut branches = Vec::new();
    let mut path: Vec<&str> = vec![root.id.as_str()];
    let mut on_path: HashSet<&str> = HashSet::from([root.id.as_str()]);
    let mut stack = vec![Frame {
        individual: root,
        next_child: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let individual = frame.individual;
        let Some(child_id) = individual.child_ids.get(frame.next_child) else {
            stack.pop();
            if let Some(done) = path.pop() {
                on_path.remove(done);
            }
            continue;
        };
        frame.next_child += 1;

        let child = graph.individual(child_id)?;
        if on_path.contains(child.id.as_str()) {
            let mut cycle: Vec<String> = path.iter().map(ToString::to_string).collect();
            cycle.push(child.id.clone());
            return Err(PathError::DescentCycle { path: cycle });
        }

        if child.id == descendant_id {
            let branch: Branch = std::iter::once(child.id.as_str())
                .chain(path.iter().rev().copied())
                .map(str::to_string)
                .collect();
            branches.push(branch);
            continue;
        }

        path.push(child.id.as_str());
        on_path.insert(child.id.as_str());
        stack.push(Frame {
            individual: child,
            next_child: 0,
        });
    }

    Ok(branches)
}
