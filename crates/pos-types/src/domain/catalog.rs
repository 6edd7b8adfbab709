use serde::{Deserialize, Serialize};

/// A sellable item as served by `GET /api/products`.
///
/// Prices are whole rupiah (no minor units). `stock_quantity` is only
/// meaningful when `is_inventory_managed` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub category_id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    pub name: String,
    pub price: i64,
    pub is_inventory_managed: bool,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    /// Managed products with zero stock cannot be added to the cart.
    pub fn out_of_stock(&self) -> bool {
        self.is_inventory_managed && self.stock_quantity == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// One catalog fetch: the whole product and category listing, replaced
/// wholesale on every load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products visible under a category filter; `None` means "All".
    pub fn products_in(&self, category_id: Option<i64>) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| category_id.map_or(true, |c| p.category_id == c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, category_id: i64) -> Product {
        Product {
            id,
            category_id,
            category_name: None,
            name: format!("P{id}"),
            price: 1000,
            is_inventory_managed: false,
            stock_quantity: 0,
            image_url: None,
        }
    }

    #[test]
    fn all_filter_bypasses_categories() {
        let catalog = Catalog {
            products: vec![product(1, 10), product(2, 20)],
            categories: vec![],
        };
        assert_eq!(catalog.products_in(None).len(), 2);
        let drinks = catalog.products_in(Some(20));
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].id, 2);
    }

    #[test]
    fn out_of_stock_requires_managed_inventory() {
        let mut p = product(1, 10);
        assert!(!p.out_of_stock());
        p.is_inventory_managed = true;
        assert!(p.out_of_stock());
        p.stock_quantity = 3;
        assert!(!p.out_of_stock());
    }

    #[test]
    fn product_deserializes_from_api_shape() {
        let raw = r#"{
            "id": 7,
            "category_id": 2,
            "category_name": "Drinks",
            "name": "Es Teh",
            "price": 5000,
            "is_inventory_managed": true,
            "stock_quantity": 12,
            "image_url": null
        }"#;
        let p: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(p.price, 5000);
        assert_eq!(p.stock_quantity, 12);
        assert!(p.image_url.is_none());
    }
}
