//! The genealogy graph arena.
//!
//! # Overview
//!
//! [`GenealogyGraph`] owns every [`Individual`] and [`Family`] in
//! declaration order and indexes them by id. Entities never hold references
//! to each other: parents, spouses and children are ids, resolved through
//! [`GenealogyGraph::individual`] at query time. This matters because the
//! input declares relationships out of order and may point at ids that are
//! never declared at all; such dangling ids surface as [`LookupError`] when
//! a query follows them, not while the graph is built.
//!
//! The graph is built once by [`build`] and never mutated afterwards.
//!
//! ## Submodules
//!
//! - [`build`]: record stream to graph, including the second pass that
//!   resolves parent/child/spouse edges.

pub mod build;

use std::collections::HashMap;

use crate::error::ErrorCode;
use crate::model::{Family, Individual};

pub use build::{BuildError, build_graph};

/// A query named an id that the graph does not contain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("individual '{0}' not found")]
    UnknownIndividual(String),

    #[error("family '{0}' not found")]
    UnknownFamily(String),
}

impl LookupError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownIndividual(_) => ErrorCode::IndividualNotFound,
            Self::UnknownFamily(_) => ErrorCode::FamilyNotFound,
        }
    }
}

/// Read-only arena of individuals and families.
#[derive(Debug, Clone, Default)]
pub struct GenealogyGraph {
    individuals: Vec<Individual>,
    families: Vec<Family>,
    individual_index: HashMap<String, usize>,
    family_index: HashMap<String, usize>,
}

impl GenealogyGraph {
    /// Look up an individual, failing with a typed error.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownIndividual`] if `id` was never declared.
    pub fn individual(&self, id: &str) -> Result<&Individual, LookupError> {
        self.get_individual(id)
            .ok_or_else(|| LookupError::UnknownIndividual(id.to_string()))
    }

    /// Look up a family, failing with a typed error.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownFamily`] if `id` was never declared.
    pub fn family(&self, id: &str) -> Result<&Family, LookupError> {
        self.family_index
            .get(id)
            .map(|&idx| &self.families[idx])
            .ok_or_else(|| LookupError::UnknownFamily(id.to_string()))
    }

    #[must_use]
    pub fn get_individual(&self, id: &str) -> Option<&Individual> {
        self.individual_index.get(id).map(|&idx| &self.individuals[idx])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.individual_index.contains_key(id)
    }

    /// Dense arena position of an individual, stable for the graph's life.
    ///
    /// Traversals use it to keep visited sets as bit vectors.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.individual_index.get(id).copied()
    }

    /// Individual at an arena position returned by [`Self::index_of`].
    #[must_use]
    pub fn individual_at(&self, idx: usize) -> Option<&Individual> {
        self.individuals.get(idx)
    }

    /// Individuals in declaration order.
    pub fn individuals(&self) -> impl ExactSizeIterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Families in declaration order.
    pub fn families(&self) -> impl ExactSizeIterator<Item = &Family> {
        self.families.iter()
    }

    pub fn individual_ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.individuals.iter().map(|ind| ind.id.as_str())
    }

    /// Number of individuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    #[must_use]
    pub fn family_count(&self) -> usize {
        self.families.len()
    }
}
