//! Birth dates as they appear in GEDCOM exports.
//!
//! Supported literal forms, tried in this order (first match wins):
//!
//! | Form          | Example        | Variant                |
//! |---------------|----------------|------------------------|
//! | `DD Mon YYYY` | `3 MAR 1871`   | [`Date::Day`]          |
//! | `Mon YYYY`    | `MAR 1871`     | [`Date::Month`]        |
//! | `YYYY`        | `1871`         | [`Date::Year`]         |
//! | `ABT YYYY`    | `ABT 1871`     | [`Date::Qualified`]    |
//! | `AFT YYYY`    | `AFT 1871`     | [`Date::Qualified`]    |
//! | `BEF YYYY`    | `BEF 1871`     | [`Date::Qualified`]    |
//!
//! Anything else is kept verbatim as [`Date::Opaque`] and has no year.
//! Month names and qualifiers are matched case-insensitively.

use std::fmt;

use chrono::{Datelike, Month, NaiveDate};
use serde::Serialize;

/// Qualifier on an approximate year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    About,
    After,
    Before,
}

impl Qualifier {
    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "ABT" => Some(Self::About),
            "AFT" => Some(Self::After),
            "BEF" => Some(Self::Before),
            _ => None,
        }
    }

    const fn keyword(self) -> &'static str {
        match self {
            Self::About => "ABT",
            Self::After => "AFT",
            Self::Before => "BEF",
        }
    }
}

/// A parsed date literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Date {
    /// A full calendar day.
    Day { date: NaiveDate },
    /// Month and year, day unknown.
    Month { year: i32, month: u32 },
    /// Year only.
    Year { year: i32 },
    /// `ABT`/`AFT`/`BEF` year.
    Qualified { qualifier: Qualifier, year: i32 },
    /// No supported form matched; the original text.
    Opaque { text: String },
}

fn parse_year(token: &str) -> Option<i32> {
    if token.is_empty() || token.len() > 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn parse_month(token: &str) -> Option<u32> {
    if token.len() != 3 {
        return None;
    }
    token.parse::<Month>().ok().map(|m| m.number_from_month())
}

fn parse_day(token: &str) -> Option<u32> {
    if token.is_empty() || token.len() > 2 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn month_abbrev(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or_else(|| month.to_string(), |m| m.name()[..3].to_ascii_uppercase())
}

impl Date {
    /// Parse a date literal, falling back to [`Date::Opaque`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        Self::day_month_year(&tokens)
            .or_else(|| Self::month_year(&tokens))
            .or_else(|| Self::year_only(&tokens))
            .or_else(|| Self::qualified_year(&tokens))
            .unwrap_or_else(|| Self::Opaque {
                text: raw.trim().to_string(),
            })
    }

    fn day_month_year(tokens: &[&str]) -> Option<Self> {
        let [day, month, year] = tokens else {
            return None;
        };
        let date = NaiveDate::from_ymd_opt(parse_year(year)?, parse_month(month)?, parse_day(day)?)?;
        Some(Self::Day { date })
    }

    fn month_year(tokens: &[&str]) -> Option<Self> {
        let [month, year] = tokens else {
            return None;
        };
        Some(Self::Month {
            year: parse_year(year)?,
            month: parse_month(month)?,
        })
    }

    fn year_only(tokens: &[&str]) -> Option<Self> {
        let [year] = tokens else {
            return None;
        };
        Some(Self::Year {
            year: parse_year(year)?,
        })
    }

    fn qualified_year(tokens: &[&str]) -> Option<Self> {
        let [qualifier, year] = tokens else {
            return None;
        };
        Some(Self::Qualified {
            qualifier: Qualifier::parse(qualifier)?,
            year: parse_year(year)?,
        })
    }

    /// Calendar year, when one was resolved.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::Day { date } => Some(date.year()),
            Self::Month { year, .. } | Self::Year { year } | Self::Qualified { year, .. } => {
                Some(*year)
            }
            Self::Opaque { .. } => None,
        }
    }

    /// Absolute difference in years; `None` unless both sides have a year.
    #[must_use]
    pub fn year_gap(&self, other: &Self) -> Option<u32> {
        Some(self.year()?.abs_diff(other.year()?))
    }

    /// `true` unless the literal was kept opaque.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Opaque { .. })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day { date } => write!(
                f,
                "{} {} {}",
                date.day(),
                month_abbrev(date.month()),
                date.year()
            ),
            Self::Month { year, month } => write!(f, "{} {year}", month_abbrev(*month)),
            Self::Year { year } => write!(f, "{year}"),
            Self::Qualified { qualifier, year } => write!(f, "{} {year}", qualifier.keyword()),
            Self::Opaque { text } => f.write_str(text),
        }
    }
}
