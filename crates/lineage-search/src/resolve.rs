//! Human-typed name or id to a graph individual.
//!
//! Tried in order: exact id, case-insensitive exact name, then the closest
//! name by [`ratio`] over lowercased text. The closest match must score at
//! least `min_score`; ties go to the individual declared first.

use lineage_core::error::ErrorCode;
use lineage_core::{GenealogyGraph, Individual};
use serde::Serialize;
use tracing::debug;

use crate::similarity::ratio;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("empty name or id")]
    EmptyQuery,

    #[error("no individual matches '{query}'")]
    NoMatch {
        query: String,
        /// Closest name found and its score, when it fell below the minimum.
        closest: Option<(String, u8)>,
    },
}

impl ResolveError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        ErrorCode::NameNotResolved
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Id,
    ExactName,
    Closest,
}

#[derive(Debug, Clone, Copy)]
pub struct Resolved<'g> {
    pub individual: &'g Individual,
    pub kind: MatchKind,
    /// 100 for id and exact-name matches.
    pub score: u8,
}

/// Resolve `query` to one individual.
///
/// # Errors
///
/// [`ResolveError::EmptyQuery`] for a blank query, [`ResolveError::NoMatch`]
/// when nothing reaches `min_score`.
pub fn resolve_individual<'g>(
    graph: &'g GenealogyGraph,
    query: &str,
    min_score: u8,
) -> Result<Resolved<'g>, ResolveError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ResolveError::EmptyQuery);
    }

    if let Some(individual) = graph.get_individual(query) {
        return Ok(Resolved {
            individual,
            kind: MatchKind::Id,
            score: 100,
        });
    }

    let folded = query.to_lowercase();
    let mut best: Option<(&Individual, u8)> = None;
    for ind in graph.individuals() {
        let Some(name) = ind.name.as_deref() else {
            continue;
        };
        let name = name.to_lowercase();
        if name == folded {
            return Ok(Resolved {
                individual: ind,
                kind: MatchKind::ExactName,
                score: 100,
            });
        }
        let score = ratio(&folded, &name);
        if best.is_none_or(|(_, held)| score > held) {
            best = Some((ind, score));
        }
    }

    match best {
        Some((individual, score)) if score >= min_score => {
            debug!(query, id = %individual.id, score, "resolved by closest name");
            Ok(Resolved {
                individual,
                kind: MatchKind::Closest,
                score,
            })
        }
        other => Err(ResolveError::NoMatch {
            query: query.to_string(),
            closest: other.map(|(ind, score)| (ind.display_name().to_string(), score)),
        }),
    }
}
