use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::date::Date;

/// Recorded sex. Any other `SEX` value is treated as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" => Ok(Self::Male),
            "F" | "f" => Ok(Self::Female),
            other => Err(format!("unknown sex '{other}'")),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `INDI` container with its resolved relationship edges.
///
/// `father_id`, `mother_id`, `spouse_ids` and `child_ids` are filled in by
/// the second pass of [`crate::graph::build`]; everything else comes
/// straight from the individual's own records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Individual {
    pub id: String,
    /// `NAME` with the surname slashes removed.
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<Date>,
    pub father_id: Option<String>,
    pub mother_id: Option<String>,
    /// Ordered set of spouse ids.
    pub spouse_ids: Vec<String>,
    /// Ordered set of child ids across every family this individual heads.
    pub child_ids: Vec<String>,
    /// `FAMC`.
    pub parent_family_id: Option<String>,
    /// `FAMS` references in file order.
    pub family_ids: Vec<String>,
    /// `_MARNM`.
    pub married_name: Option<String>,
    /// `OCCU` values in file order; repeats are kept.
    pub occupations: Vec<String>,
}

impl Individual {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            gender: None,
            birth_date: None,
            father_id: None,
            mother_id: None,
            spouse_ids: Vec::new(),
            child_ids: Vec::new(),
            parent_family_id: None,
            family_ids: Vec::new(),
            married_name: None,
            occupations: Vec::new(),
        }
    }

    /// Year of birth when the birth date resolved to one.
    #[must_use]
    pub fn birth_year(&self) -> Option<i32> {
        self.birth_date.as_ref().and_then(Date::year)
    }

    /// Name, or the id when the record carries no name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Father then mother, whichever are known.
    pub fn parent_ids(&self) -> impl Iterator<Item = &str> {
        self.father_id
            .as_deref()
            .into_iter()
            .chain(self.mother_id.as_deref())
    }
}
