//! Purchase history.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Append-only sequence of purchased product ids, oldest first.
///
/// Only used as a signal for recommendations. Serializes as a plain JSON
/// array of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseHistory {
    ids: Vec<ProductId>,
}

impl PurchaseHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Append purchased ids in the order given.
    pub fn extend<I: IntoIterator<Item = ProductId>>(&mut self, ids: I) {
        self.ids.extend(ids);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductId> {
        self.ids.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
