//! lineage-core: GEDCOM records in, genealogy graph out.
//!
//! # Overview
//!
//! ```text
//! bytes ──source::decode──▶ text ──record::parse_records──▶ Vec<Record>
//!       ──graph::build_graph──▶ GenealogyGraph
//! ```
//!
//! [`source::load_graph`] runs the whole chain for a file on disk. The query
//! side (branch search, connectivity, duplicates) lives in `lineage-search`.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums in the library, each mapped to an
//!   [`error::ErrorCode`]; `anyhow::Result` at I/O edges.
//! - **Logging**: `tracing` macros only.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod model;
pub mod record;
pub mod source;

pub use graph::{BuildError, GenealogyGraph, LookupError, build_graph};
pub use model::{Date, Family, Gender, Individual};
pub use record::{Diagnostic, Record, parse_records};
