//! Favorite products.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A set of favorite product ids.
///
/// Membership is what matters; insertion order is kept only so the persisted
/// array is stable. Serializes as a plain JSON array of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProductId>", into = "Vec<ProductId>")]
pub struct FavoritesSet {
    ids: Vec<ProductId>,
}

impl FavoritesSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Add a product. Returns `false` if it was already a favorite.
    pub fn insert(&mut self, product_id: ProductId) -> bool {
        if self.contains(&product_id) {
            return false;
        }
        self.ids.push(product_id);
        true
    }

    /// Remove a product. Returns whether it was a favorite.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != product_id);
        self.ids.len() != before
    }

    /// Flip membership once. Returns `true` if the product is now a favorite.
    pub fn toggle(&mut self, product_id: ProductId) -> bool {
        if self.remove(&product_id) {
            false
        } else {
            self.ids.push(product_id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.ids.contains(product_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductId> {
        self.ids.iter()
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

impl From<Vec<ProductId>> for FavoritesSet {
    fn from(ids: Vec<ProductId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<FavoritesSet> for Vec<ProductId> {
    fn from(set: FavoritesSet) -> Self {
        set.ids
    }
}

impl FromIterator<ProductId> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_original() {
        let mut set: FavoritesSet = ["p1"].into_iter().map(ProductId::from).collect();
        let original = set.clone();

        assert!(set.toggle(ProductId::from("p7")));
        assert!(set.contains(&ProductId::from("p7")));
        assert!(!set.toggle(ProductId::from("p7")));
        assert_eq!(set, original);
    }

    #[test]
    fn test_insert_is_set_semantics() {
        let mut set = FavoritesSet::new();
        assert!(set.insert(ProductId::from("p1")));
        assert!(!set.insert(ProductId::from("p1")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let set: FavoritesSet = serde_json::from_str(r#"["a","b","a"]"#).expect("valid json");
        assert_eq!(set.len(), 2);
        assert_eq!(
            serde_json::to_string(&set).expect("serialize"),
            r#"["a","b"]"#
        );
    }
}
