//! Leveled GEDCOM line parser.
//!
//! Turns physical lines into logical [`Record`]s. Every record line has the
//! shape
//!
//! ```text
//! <level> [<xref>] <tag> [<value>]
//! ```
//!
//! where `level` is a non-negative integer, `xref` is an optional `@…@`
//! pointer (as on `0 @I1@ INDI`) and `value` is the rest of the line.
//!
//! # Continuation
//!
//! Exported files wrap long values onto following physical lines without a
//! `CONC`/`CONT` tag. Any line whose first token is not a level integer is
//! therefore glued onto the value of the preceding record, verbatim and
//! without a separator. Such a line before the first record has nothing to
//! continue and is reported as a [`Diagnostic`]. A first token made only of
//! digits is a level even when it overflows; that line is diagnosed, never
//! continued. Whitespace-only lines count as blank and are skipped.
//!
//! Diagnostics never stop the parse; they are logged with [`tracing`] and
//! handed back batched in [`ParsedRecords::diagnostics`].

use tracing::{trace, warn};

use super::Record;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// A recoverable problem found on one physical line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// The line has no leading level integer and no record precedes it.
    #[error("line {line}: expected a level number, found '{raw}'")]
    MissingLevel {
        /// 1-based physical line number.
        line: usize,
        /// The line as read.
        raw: String,
    },

    /// The line has a level but no tag after it.
    #[error("line {line}: level without a tag: '{raw}'")]
    MissingTag {
        /// 1-based physical line number.
        line: usize,
        /// The line as read.
        raw: String,
    },

    /// The leading level is all digits but does not fit a `u32`.
    #[error("line {line}: level number out of range: '{raw}'")]
    LevelOutOfRange {
        /// 1-based physical line number.
        line: usize,
        /// The line as read.
        raw: String,
    },
}

impl Diagnostic {
    /// Physical line the diagnostic refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MissingLevel { line, .. }
            | Self::MissingTag { line, .. }
            | Self::LevelOutOfRange { line, .. } => *line,
        }
    }
}

/// Output of a full parse: records in input order plus every diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecords {
    pub records: Vec<Record>,
    pub diagnostics: Vec<Diagnostic>,
}

// ---------------------------------------------------------------------------
// Line classification
// ---------------------------------------------------------------------------

/// The header fields of a record line, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header<'a> {
    level: u32,
    xref: Option<&'a str>,
    tag: &'a str,
    value: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    Record(Header<'a>),
    /// A level was read but no tag followed it.
    Headless,
    /// The first token is not a level integer.
    Unleveled,
    /// The first token is all digits but overflows the level type.
    Overflowing,
}

/// Split off the first whitespace-delimited token.
///
/// Returns the token and everything after it (starting at the delimiter).
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

fn is_pointer(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('@') && token.ends_with('@')
}

/// Strip the single delimiter that separates the tag from its value.
fn value_of(rest: &str) -> Option<&str> {
    let mut chars = rest.chars();
    let value = match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => rest,
    };
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn classify(line: &str) -> LineKind<'_> {
    let Some((first, rest)) = next_token(line) else {
        return LineKind::Blank;
    };
    let Ok(level) = first.parse::<u32>() else {
        if first.bytes().all(|b| b.is_ascii_digit()) {
            return LineKind::Overflowing;
        }
        return LineKind::Unleveled;
    };
    let Some((second, rest)) = next_token(rest) else {
        return LineKind::Headless;
    };

    let (xref, tag, rest) = if is_pointer(second) {
        match next_token(rest) {
            Some((tag, rest)) => (Some(second), tag, rest),
            None => return LineKind::Headless,
        }
    } else {
        (None, second, rest)
    };

    LineKind::Record(Header {
        level,
        xref,
        tag,
        value: value_of(rest),
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a whole decoded input into records.
///
/// Lines are split with [`str::lines`], so both `\n` and `\r\n` endings are
/// accepted and never become part of a value.
#[must_use]
pub fn parse_records(input: &str) -> ParsedRecords {
    parse_lines(input.lines())
}

/// Parse an ordered sequence of physical lines into records.
///
/// Never fails: malformed lines become [`Diagnostic`]s and parsing resumes
/// at the next line. A record is emitted even when no continuation follows
/// it.
pub fn parse_lines<'a, I>(lines: I) -> ParsedRecords
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = ParsedRecords::default();

    for (i, line) in lines.into_iter().enumerate() {
        let line_no = i + 1;
        match classify(line) {
            LineKind::Blank => {}
            LineKind::Record(header) => out.records.push(Record {
                level: header.level,
                xref: header.xref.map(str::to_string),
                tag: header.tag.to_string(),
                value: header.value.map(str::to_string),
                line: line_no,
            }),
            LineKind::Unleveled => {
                if let Some(prev) = out.records.last_mut() {
                    trace!(line = line_no, tag = %prev.tag, "continuation line");
                    prev.value.get_or_insert_with(String::new).push_str(line);
                } else {
                    warn!(line = line_no, raw = %line, "skipping line without a level number");
                    out.diagnostics.push(Diagnostic::MissingLevel {
                        line: line_no,
                        raw: line.to_string(),
                    });
                }
            }
            LineKind::Headless => {
                warn!(line = line_no, raw = %line, "skipping line without a tag");
                out.diagnostics.push(Diagnostic::MissingTag {
                    line: line_no,
                    raw: line.to_string(),
                });
            }
            LineKind::Overflowing => {
                warn!(line = line_no, raw = %line, "skipping line with an oversized level");
                out.diagnostics.push(Diagnostic::LevelOutOfRange {
                    line: line_no,
                    raw: line.to_string(),
                });
            }
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
