use serde::Serialize;

/// A `FAM` container: up to two spouses and their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Family {
    pub id: String,
    pub husband_id: Option<String>,
    pub wife_id: Option<String>,
    /// `CHIL` references in file order; duplicates are kept as written.
    pub child_ids: Vec<String>,
}

impl Family {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            husband_id: None,
            wife_id: None,
            child_ids: Vec::new(),
        }
    }

    /// Husband and wife ids that are present, husband first.
    pub fn spouse_ids(&self) -> impl Iterator<Item = &str> {
        self.husband_id
            .as_deref()
            .into_iter()
            .chain(self.wife_id.as_deref())
    }
}
