//! Record stream to [`GenealogyGraph`].
//!
//! # Overview
//!
//! Construction runs in two passes.
//!
//! 1. **Collect.** Records are consumed in order. A level-0 `INDI` opens an
//!    individual container, a level-0 `FAM` opens a family container, and
//!    any other level-0 record closes the open container. Deeper records
//!    populate whichever container is open. Inside an individual, a `BIRT`
//!    record switches the builder into [`SubState::InBirthBlock`] until a
//!    record at the same or a shallower level arrives; the only field read
//!    there is `DATE`.
//! 2. **Resolve.** After the last record, every family pushes its children
//!    onto each declared spouse, sets `father_id`/`mother_id` on each
//!    declared child, and links husband and wife as mutual spouses.
//!
//! Ids that families mention but that were never declared are skipped in
//! pass 2 rather than rejected; queries report them when they follow such
//! an id.
//!
//! # Integrity
//!
//! A second `FAMC` or a second `BIRT` on one individual, or an id declared
//! twice, aborts the build with a [`BuildError`] carrying the offending
//! line. The builder never picks a winner between conflicting values.

use std::collections::HashSet;

use tracing::{debug, info, instrument, trace, warn};

use super::GenealogyGraph;
use crate::error::ErrorCode;
use crate::model::{Date, Family, Gender, Individual, push_unique};
use crate::record::Record;

/// Data-integrity violations that stop graph construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("line {line}: individual '{id}' is declared more than once")]
    DuplicateIndividual { id: String, line: usize },

    #[error("line {line}: family '{id}' is declared more than once")]
    DuplicateFamily { id: String, line: usize },

    #[error(
        "line {line}: individual '{id}' already belongs to parent family '{existing}', found '{found}'"
    )]
    DuplicateParentFamily {
        id: String,
        existing: String,
        found: String,
        line: usize,
    },

    #[error("line {line}: individual '{id}' has a second birth block")]
    DuplicateBirth { id: String, line: usize },
}

impl BuildError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::DuplicateIndividual { .. } => ErrorCode::DuplicateIndividual,
            Self::DuplicateFamily { .. } => ErrorCode::DuplicateFamily,
            Self::DuplicateParentFamily { .. } => ErrorCode::DuplicateParentFamily,
            Self::DuplicateBirth { .. } => ErrorCode::DuplicateBirth,
        }
    }

    /// Line of the record that triggered the violation.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::DuplicateIndividual { line, .. }
            | Self::DuplicateFamily { line, .. }
            | Self::DuplicateParentFamily { line, .. }
            | Self::DuplicateBirth { line, .. } => *line,
        }
    }
}

/// The top-level entity deeper records attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    None,
    Individual(usize),
    Family(usize),
}

/// Parser state inside an individual container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubState {
    Idle,
    /// Inside a `BIRT` block opened at `level`.
    InBirthBlock { level: u32 },
}

/// Incremental builder; feed records with [`GraphBuilder::push`].
#[derive(Debug)]
pub struct GraphBuilder {
    graph: GenealogyGraph,
    container: Container,
    sub: SubState,
    /// Arena positions of individuals that already had a `BIRT` block.
    births_seen: HashSet<usize>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `NAME`/`_MARNM` value with the surname slashes stripped.
///
/// Inner spacing is kept as written.
fn clean_name(raw: &str) -> Option<String> {
    let stripped = raw.replace('/', "");
    let cleaned = stripped.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: GenealogyGraph::default(),
            container: Container::None,
            sub: SubState::Idle,
            births_seen: HashSet::new(),
        }
    }

    /// Consume one record.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] on duplicate ids, a second `FAMC` or a second
    /// `BIRT` for the same individual.
    pub fn push(&mut self, rec: &Record) -> Result<(), BuildError> {
        if let SubState::InBirthBlock { level } = self.sub {
            if rec.level <= level {
                self.sub = SubState::Idle;
            }
        }

        if rec.level == 0 {
            return self.open(rec);
        }

        match self.container {
            Container::None => {
                trace!(line = rec.line, tag = %rec.tag, "record outside any container");
                Ok(())
            }
            Container::Individual(idx) => self.individual_record(idx, rec),
            Container::Family(idx) => {
                self.family_record(idx, rec);
                Ok(())
            }
        }
    }

    fn open(&mut self, rec: &Record) -> Result<(), BuildError> {
        self.sub = SubState::Idle;
        self.container = Container::None;

        let kind = rec.tag.as_str();
        if kind != "INDI" && kind != "FAM" {
            return Ok(());
        }
        let Some(id) = rec.xref.clone() else {
            warn!(line = rec.line, tag = kind, "container without an id, skipping");
            return Ok(());
        };

        let graph = &mut self.graph;
        if kind == "INDI" {
            if graph.individual_index.contains_key(&id) {
                return Err(BuildError::DuplicateIndividual { id, line: rec.line });
            }
            let idx = graph.individuals.len();
            graph.individual_index.insert(id.clone(), idx);
            graph.individuals.push(Individual::new(id));
            self.container = Container::Individual(idx);
        } else {
            if graph.family_index.contains_key(&id) {
                return Err(BuildError::DuplicateFamily { id, line: rec.line });
            }
            let idx = graph.families.len();
            graph.family_index.insert(id.clone(), idx);
            graph.families.push(Family::new(id));
            self.container = Container::Family(idx);
        }
        Ok(())
    }

    fn individual_record(&mut self, idx: usize, rec: &Record) -> Result<(), BuildError> {
        let ind = &mut self.graph.individuals[idx];
        let value = rec.trimmed_value();

        if let SubState::InBirthBlock { .. } = self.sub {
            if rec.tag == "DATE" {
                ind.birth_date = value.map(Date::parse);
            }
            return Ok(());
        }

        match rec.tag.as_str() {
            "NAME" => {
                if ind.name.is_none() {
                    ind.name = value.and_then(clean_name);
                } else {
                    debug!(id = %ind.id, line = rec.line, "keeping first NAME");
                }
            }
            "SEX" => ind.gender = value.and_then(|v| v.parse::<Gender>().ok()),
            "BIRT" => {
                if !self.births_seen.insert(idx) {
                    return Err(BuildError::DuplicateBirth {
                        id: ind.id.clone(),
                        line: rec.line,
                    });
                }
                self.sub = SubState::InBirthBlock { level: rec.level };
            }
            "FAMC" => {
                if let Some(found) = value {
                    if let Some(existing) = &ind.parent_family_id {
                        return Err(BuildError::DuplicateParentFamily {
                            id: ind.id.clone(),
                            existing: existing.clone(),
                            found: found.to_string(),
                            line: rec.line,
                        });
                    }
                    ind.parent_family_id = Some(found.to_string());
                }
            }
            "FAMS" => {
                if let Some(fam) = value {
                    push_unique(&mut ind.family_ids, fam);
                }
            }
            "_MARNM" => ind.married_name = value.and_then(clean_name),
            "OCCU" => {
                if let Some(occupation) = value {
                    ind.occupations.push(occupation.to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn family_record(&mut self, idx: usize, rec: &Record) {
        let fam = &mut self.graph.families[idx];
        let Some(value) = rec.trimmed_value() else {
            return;
        };
        match rec.tag.as_str() {
            "HUSB" => fam.husband_id = Some(value.to_string()),
            "WIFE" => fam.wife_id = Some(value.to_string()),
            "CHIL" => fam.child_ids.push(value.to_string()),
            _ => {}
        }
    }

    /// Run the resolve pass and return the finished graph.
    #[must_use]
    pub fn finish(mut self) -> GenealogyGraph {
        let GenealogyGraph {
            individuals,
            families,
            individual_index,
            ..
        } = &mut self.graph;

        for fam in families.iter() {
            for spouse in fam.spouse_ids() {
                let Some(&sidx) = individual_index.get(spouse) else {
                    debug!(family = %fam.id, spouse, "spouse not declared, no child edges");
                    continue;
                };
                for child in &fam.child_ids {
                    push_unique(&mut individuals[sidx].child_ids, child);
                }
            }

            for child in &fam.child_ids {
                let Some(&cidx) = individual_index.get(child) else {
                    debug!(family = %fam.id, child = %child, "child not declared");
                    continue;
                };
                let ind = &mut individuals[cidx];
                set_parent(&mut ind.father_id, fam.husband_id.as_deref(), &ind.id, &fam.id);
                set_parent(&mut ind.mother_id, fam.wife_id.as_deref(), &ind.id, &fam.id);
            }

            if let (Some(h), Some(w)) = (fam.husband_id.as_deref(), fam.wife_id.as_deref()) {
                if let Some(&hidx) = individual_index.get(h) {
                    push_unique(&mut individuals[hidx].spouse_ids, w);
                }
                if let Some(&widx) = individual_index.get(w) {
                    push_unique(&mut individuals[widx].spouse_ids, h);
                }
            }
        }

        self.graph
    }
}

/// First family to name a parent wins; later disagreements are logged.
fn set_parent(slot: &mut Option<String>, parent: Option<&str>, child: &str, family: &str) {
    let Some(parent) = parent else {
        return;
    };
    match slot.as_deref() {
        None => *slot = Some(parent.to_string()),
        Some(existing) if existing == parent => {}
        Some(existing) => {
            warn!(child, family, existing, ignored = parent, "conflicting parent, keeping first");
        }
    }
}

/// Build a graph from a complete record stream.
///
/// # Errors
///
/// Returns the first [`BuildError`] encountered.
#[instrument(skip(records), fields(records = records.len()))]
pub fn build_graph(records: &[Record]) -> Result<GenealogyGraph, BuildError> {
    let mut builder = GraphBuilder::new();
    for rec in records {
        builder.push(rec)?;
    }
    let graph = builder.finish();
    info!(
        individuals = graph.len(),
        families = graph.family_count(),
        "genealogy graph built"
    );
    Ok(graph)
}
