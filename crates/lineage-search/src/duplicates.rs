//! Bounded top-K near-duplicate search over individuals.
//!
//! # Overview
//!
//! Every unordered pair of distinct candidates is run through three gates
//! before any string work happens:
//!
//! 1. **Gender**: both known and equal.
//! 2. **Birth year**: both resolved and strictly less than
//!    [`DuplicateConfig::max_year_gap`] apart. With
//!    `require_birth_year = false` a pair where either year is missing
//!    passes with `year_gap = None`.
//! 3. **Initial**: both names non-empty and starting with the same letter,
//!    ignoring case.
//!
//! Survivors are scored with [`crate::similarity::ratio`] over the lowercased
//! names and offered to a [`TopK`] holder.
//!
//! # Design
//!
//! - Per-candidate work (lookups, case folding, unary gates) is done once up
//!   front, so the O(n²) pair loop only compares prepared values.
//! - [`TopK`] keeps its entries sorted descending plus a set of unordered
//!   id pairs, so the symmetric-pair check does not scan the entries.
//! - The scan is sequential. A `debug!` event every
//!   [`DuplicateConfig::progress_interval`] rows reports progress.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashSet;

use lineage_core::config::DuplicatesConfig;
use lineage_core::{GenealogyGraph, Gender, Individual, LookupError};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::similarity::ratio;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Gate thresholds for [`find_top_k`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateConfig {
    /// Birth years must differ by strictly less than this.
    pub max_year_gap: u32,
    /// Reject pairs where either birth year is unknown.
    pub require_birth_year: bool,
    /// Outer-loop rows between progress events; `0` disables them.
    pub progress_interval: usize,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self::from(&DuplicatesConfig::default())
    }
}

impl From<&DuplicatesConfig> for DuplicateConfig {
    fn from(cfg: &DuplicatesConfig) -> Self {
        Self {
            max_year_gap: cfg.max_year_gap,
            require_birth_year: cfg.require_birth_year,
            progress_interval: cfg.progress_interval,
        }
    }
}

/// A scored pair of possibly duplicated individuals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCandidate {
    /// Name similarity in `0..=100`.
    pub score: u8,
    pub id_a: String,
    pub id_b: String,
    pub name_a: String,
    pub name_b: String,
    /// `None` only when one side has no birth year and that was allowed.
    pub year_gap: Option<u32>,
}

impl DuplicateCandidate {
    fn pair_key(&self) -> (String, String) {
        pair_key(&self.id_a, &self.id_b)
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

// ---------------------------------------------------------------------------
// TopK
// ---------------------------------------------------------------------------

/// At most `k` candidates, sorted by descending score, no repeated pair.
///
/// Among equal scores, earlier offers stay ahead of later ones.
#[derive(Debug, Clone)]
pub struct TopK {
    k: usize,
    entries: Vec<DuplicateCandidate>,
    pairs: HashSet<(String, String)>,
}

impl TopK {
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            entries: Vec::with_capacity(k),
            pairs: HashSet::with_capacity(k),
        }
    }

    /// Lowest held score once the holder is full.
    #[must_use]
    pub fn floor(&self) -> Option<u8> {
        if self.entries.len() < self.k {
            None
        } else {
            self.entries.last().map(|c| c.score)
        }
    }

    /// Insert `candidate` unless its pair is already held, or the holder is
    /// full and the score does not beat the current lowest.
    pub fn offer(&mut self, candidate: DuplicateCandidate) -> bool {
        if self.k == 0 {
            return false;
        }
        if self.floor().is_some_and(|floor| candidate.score <= floor) {
            return false;
        }
        let key = candidate.pair_key();
        if self.pairs.contains(&key) {
            return false;
        }

        let pos = self
            .entries
            .partition_point(|held| held.score >= candidate.score);
        self.entries.insert(pos, candidate);
        self.pairs.insert(key);

        if self.entries.len() > self.k {
            if let Some(evicted) = self.entries.pop() {
                self.pairs.remove(&evicted.pair_key());
            }
        }
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<DuplicateCandidate> {
        self.entries
    }
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// A candidate that passed the single-individual gates.
struct Prepared<'g> {
    individual: &'g Individual,
    name: &'g str,
    folded: String,
    initial: char,
    gender: Gender,
    year: Option<i32>,
}

impl<'g> Prepared<'g> {
    fn new(individual: &'g Individual, cfg: &DuplicateConfig) -> Option<Self> {
        let gender = individual.gender?;
        let name = individual.name.as_deref().filter(|n| !n.trim().is_empty())?;
        let year = individual.birth_year();
        if cfg.require_birth_year && year.is_none() {
            return None;
        }
        let folded = name.trim().to_lowercase();
        let initial = folded.chars().next()?;
        Some(Self {
            individual,
            name,
            folded,
            initial,
            gender,
            year,
        })
    }

    /// `Some(year_gap)` when the pair passes every gate.
    fn gate(&self, other: &Self, cfg: &DuplicateConfig) -> Option<Option<u32>> {
        if self.gender != other.gender || self.initial != other.initial {
            return None;
        }
        match (self.year, other.year) {
            (Some(a), Some(b)) => {
                let gap = a.abs_diff(b);
                (gap < cfg.max_year_gap).then_some(Some(gap))
            }
            _ if cfg.require_birth_year => None,
            _ => Some(None),
        }
    }
}

/// The `k` most similar gated pairs among `candidate_ids`.
///
/// Repeated candidate ids are considered once.
///
/// # Errors
///
/// Returns [`LookupError::UnknownIndividual`] for a candidate id that is not
/// in the graph.
#[instrument(skip(graph, candidate_ids, cfg))]
pub fn find_top_k<I, S>(
    graph: &GenealogyGraph,
    candidate_ids: I,
    k: usize,
    cfg: &DuplicateConfig,
) -> Result<Vec<DuplicateCandidate>, LookupError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut prepared: Vec<Prepared<'_>> = Vec::new();
    let mut considered = 0usize;
    for id in candidate_ids {
        let id = id.as_ref();
        if !seen.insert(id.to_string()) {
            continue;
        }
        considered += 1;
        if let Some(p) = Prepared::new(graph.individual(id)?, cfg) {
            prepared.push(p);
        }
    }
    debug!(considered, gated_in = prepared.len(), k, "duplicate scan starting");

    let mut top = TopK::new(k);
    let mut compared = 0usize;
    for (i, a) in prepared.iter().enumerate() {
        if cfg.progress_interval > 0 && i > 0 && i % cfg.progress_interval == 0 {
            debug!(rows = i, pairs = compared, held = top.len(), "duplicate scan progress");
        }
        for b in &prepared[i + 1..] {
            let Some(year_gap) = a.gate(b, cfg) else {
                continue;
            };
            compared += 1;
            let score = ratio(&a.folded, &b.folded);
            if top.floor().is_some_and(|floor| score <= floor) {
                continue;
            }
            top.offer(DuplicateCandidate {
                score,
                id_a: a.individual.id.clone(),
                id_b: b.individual.id.clone(),
                name_a: a.name.to_string(),
                name_b: b.name.to_string(),
                year_gap,
            });
        }
    }

    debug!(rows = prepared.len(), pairs = compared, held = top.len(), "duplicate scan finished");
    Ok(top.into_vec())
}
