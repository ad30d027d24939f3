#![forbid(unsafe_code)]
//! lineage-search: read-only queries over a built [`GenealogyGraph`].
//!
//! # Conventions
//!
//! - **Errors**: each query has its own `thiserror` enum; lookups of ids
//!   that are not in the graph surface as [`lineage_core::LookupError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//!
//! [`GenealogyGraph`]: lineage_core::GenealogyGraph

pub mod connectivity;
pub mod duplicates;
pub mod paths;
pub mod resolve;
pub mod similarity;

pub use connectivity::find_unconnected;
pub use duplicates::{DuplicateCandidate, DuplicateConfig, TopK, find_top_k};
pub use paths::{Branch, PathError, find_branches};
pub use resolve::{MatchKind, ResolveError, Resolved, resolve_individual};
