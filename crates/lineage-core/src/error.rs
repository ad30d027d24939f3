use std::fmt;

/// Machine-readable error codes shared by every lineage crate and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InputUnreadable,
    ConfigParseError,
    IndividualNotFound,
    FamilyNotFound,
    NameNotResolved,
    DuplicateIndividual,
    DuplicateFamily,
    DuplicateParentFamily,
    DuplicateBirth,
    DescentCycle,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InputUnreadable => "E1001",
            Self::ConfigParseError => "E1002",
            Self::IndividualNotFound => "E2001",
            Self::FamilyNotFound => "E2002",
            Self::NameNotResolved => "E2003",
            Self::DuplicateIndividual => "E3001",
            Self::DuplicateFamily => "E3002",
            Self::DuplicateParentFamily => "E3003",
            Self::DuplicateBirth => "E3004",
            Self::DescentCycle => "E4001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InputUnreadable => "Input file could not be read",
            Self::ConfigParseError => "Config file parse error",
            Self::IndividualNotFound => "Individual not found",
            Self::FamilyNotFound => "Family not found",
            Self::NameNotResolved => "Name did not match any individual",
            Self::DuplicateIndividual => "Individual declared twice",
            Self::DuplicateFamily => "Family declared twice",
            Self::DuplicateParentFamily => "Individual has more than one parent family",
            Self::DuplicateBirth => "Individual has more than one birth block",
            Self::DescentCycle => "Descent cycle in input",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InputUnreadable => Some("Check the path passed with --file and its permissions."),
            Self::ConfigParseError => Some("Fix syntax in lineage.toml and retry."),
            Self::IndividualNotFound | Self::FamilyNotFound => {
                Some("Use `lineage show` with a name to look up the right id.")
            }
            Self::NameNotResolved => Some("Try a longer name or pass the @I…@ id directly."),
            Self::DuplicateIndividual
            | Self::DuplicateFamily
            | Self::DuplicateParentFamily
            | Self::DuplicateBirth => {
                Some("Repair the record at the reported line in the GEDCOM export.")
            }
            Self::DescentCycle => {
                Some("An individual is listed as their own ancestor; fix the CHIL/FAMC links.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
