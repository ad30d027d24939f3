//! Leveled records: the flat stream between raw lines and the graph.

pub mod parser;

pub use parser::{Diagnostic, ParsedRecords, parse_lines, parse_records};

/// One logical `(level, tag, value)` entry of the input.
///
/// A record's `value` may have been assembled from several physical lines
/// (see [`parser`]); `line` is always the line of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Nesting depth; `0` opens a top-level container.
    pub level: u32,
    /// Pointer declared by this record, e.g. `@I1@` on `0 @I1@ INDI`.
    pub xref: Option<String>,
    pub tag: String,
    pub value: Option<String>,
    /// 1-based physical line of the header.
    pub line: usize,
}

impl Record {
    /// The value with surrounding whitespace removed, if any remains.
    #[must_use]
    pub fn trimmed_value(&self) -> Option<&str> {
        self.value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}
