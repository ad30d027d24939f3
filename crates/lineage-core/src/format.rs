//! Per-individual text templates.
//!
//! | Placeholder | Substitution                                   |
//! |-------------|------------------------------------------------|
//! | `%n`        | name                                           |
//! | `%g`        | gender (`M`/`F`)                               |
//! | `%b`        | birth year, or the opaque birth date text      |
//! | `%o`        | first occupation                               |
//!
//! Missing data never fails a render: the caller's `unknown` sentinel is
//! substituted instead. Any other `%` sequence is copied through literally.

use crate::model::{Date, Individual};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Gender,
    Birth,
    Occupation,
}

impl Field {
    const fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Name),
            'g' => Some(Self::Gender),
            'b' => Some(Self::Birth),
            'o' => Some(Self::Occupation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Field(Field),
}

/// A template split into literal text and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    parts: Vec<Part>,
}

impl Template {
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let field = if c == '%' {
                chars.peek().copied().and_then(Field::from_char)
            } else {
                None
            };
            match field {
                Some(field) => {
                    chars.next();
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(Part::Field(field));
                }
                None => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Self { parts }
    }

    #[must_use]
    pub fn render(&self, ind: &Individual, unknown: &str) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Field(Field::Name) => out.push_str(ind.name.as_deref().unwrap_or(unknown)),
                Part::Field(Field::Gender) => {
                    out.push_str(ind.gender.map_or(unknown, |g| g.as_str()));
                }
                Part::Field(Field::Birth) => match &ind.birth_date {
                    Some(Date::Opaque { text }) => out.push_str(text),
                    Some(date) => match date.year() {
                        Some(year) => out.push_str(&year.to_string()),
                        None => out.push_str(unknown),
                    },
                    None => out.push_str(unknown),
                },
                Part::Field(Field::Occupation) => out.push_str(
                    ind.occupations
                        .first()
                        .map_or(unknown, String::as_str),
                ),
            }
        }
        out
    }
}

/// One-shot [`Template::parse`] + [`Template::render`].
#[must_use]
pub fn format_individual(ind: &Individual, template: &str, unknown: &str) -> String {
    Template::parse(template).render(ind, unknown)
}
