use catalog::{Product, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product the user starred, with enough detail to list it without the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub added_at: DateTime<Utc>,
}

/// Starred products in the order they were added. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    items: Vec<Favorite>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted entries. Later duplicates of an id are dropped.
    pub fn from_favorites(favorites: Vec<Favorite>) -> Self {
        let mut items: Vec<Favorite> = Vec::with_capacity(favorites.len());
        for favorite in favorites {
            if !items.iter().any(|f| f.id == favorite.id) {
                items.push(favorite);
            }
        }
        Self { items }
    }

    /// Star `product`, or unstar it if already starred. Returns whether it is
    /// a favorite afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        self.toggle_at(product, Utc::now())
    }

    pub fn toggle_at(&mut self, product: &Product, at: DateTime<Utc>) -> bool {
        if self.remove(&product.id) {
            return false;
        }
        self.items.push(Favorite {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            added_at: at,
        });
        true
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|f| &f.id == id)
    }

    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|f| &f.id != id);
        self.items.len() != before
    }

    pub fn list(&self) -> &[Favorite] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::fixtures::canonical_products;

    #[test]
    fn toggle_adds_then_removes() {
        let products = canonical_products();
        let mut favorites = Favorites::new();

        assert!(favorites.toggle(&products[2]));
        assert!(favorites.contains(&products[2].id));
        assert_eq!(favorites.list()[0].name, products[2].name);
        assert_eq!(favorites.list()[0].price, products[2].price);

        assert!(!favorites.toggle(&products[2]));
        assert!(!favorites.contains(&products[2].id));
        assert!(favorites.is_empty());
    }

    #[test]
    fn list_keeps_insertion_order() {
        let products = canonical_products();
        let mut favorites = Favorites::new();
        favorites.toggle(&products[4]);
        favorites.toggle(&products[0]);
        let ids: Vec<_> = favorites.list().iter().map(|f| f.id.clone()).collect();
        assert_eq!(ids, vec![products[4].id.clone(), products[0].id.clone()]);
    }

    #[test]
    fn remove_reports_whether_anything_was_removed() {
        let products = canonical_products();
        let mut favorites = Favorites::new();
        favorites.toggle(&products[1]);
        assert!(favorites.remove(&products[1].id));
        assert!(!favorites.remove(&products[1].id));
    }

    #[test]
    fn duplicate_persisted_ids_collapse() {
        let products = canonical_products();
        let mut source = Favorites::new();
        source.toggle(&products[0]);
        let entry = source.list()[0].clone();

        let restored = Favorites::from_favorites(vec![entry.clone(), entry]);
        assert_eq!(restored.len(), 1);
    }
}
