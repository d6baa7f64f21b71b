use serde::{Deserialize, Serialize};

use crate::errors::EditError;
use crate::validation::patterns::is_blank;

/// The visible portfolio-link slots, blanks included.
///
/// There is always at least one slot, so the user has somewhere to type.
/// Persisted as a plain JSON array under `draftPortfolioLinks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PortfolioLinks {
    slots: Vec<String>,
}

impl Default for PortfolioLinks {
    fn default() -> Self {
        Self {
            slots: vec![String::new()],
        }
    }
}

impl PortfolioLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty slot.
    pub fn add_slot(&mut self) {
        self.slots.push(String::new());
    }

    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<(), EditError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(EditError::LinkIndexOutOfRange { index, len })?;
        *slot = value.into();
        Ok(())
    }

    /// Removes the slot at `index`. Returns `Ok(false)` without changing
    /// anything when it is the last remaining slot.
    pub fn remove(&mut self, index: usize) -> Result<bool, EditError> {
        let len = self.slots.len();
        if index >= len {
            return Err(EditError::LinkIndexOutOfRange { index, len });
        }
        if len == 1 {
            return Ok(false);
        }
        self.slots.remove(index);
        Ok(true)
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// The non-blank links, in slot order.
    pub fn project_for_submission(&self) -> Vec<String> {
        project_for_submission(&self.slots)
    }
}

impl From<Vec<String>> for PortfolioLinks {
    fn from(slots: Vec<String>) -> Self {
        if slots.is_empty() {
            return Self::default();
        }
        Self { slots }
    }
}

impl From<PortfolioLinks> for Vec<String> {
    fn from(links: PortfolioLinks) -> Self {
        links.slots
    }
}

/// Drops blank (whitespace-only) entries, keeping order and the original text
/// of the survivors.
pub fn project_for_submission(links: &[String]) -> Vec<String> {
    links
        .iter()
        .filter(|link| !is_blank(link))
        .cloned()
        .collect()
}
