//! Entities stored in the genealogy graph arena.
//!
//! Relationships are held as ids only; see [`crate::graph`] for lookups.

pub mod date;
pub mod family;
pub mod individual;

pub use date::{Date, Qualifier};
pub use family::Family;
pub use individual::{Gender, Individual};

/// Push `id` unless it is already present, keeping first-seen order.
pub(crate) fn push_unique(ids: &mut Vec<String>, id: &str) -> bool {
    if ids.iter().any(|existing| existing == id) {
        return false;
    }
    ids.push(id.to_string());
    true
}
