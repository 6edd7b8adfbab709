use pos_types::domain::cart::{format_idr, Cart};
use pos_types::domain::catalog::{Catalog, Product};

/// Grid filter: "All" or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(i64),
}

impl CategoryFilter {
    fn category_id(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Category(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub label: String,
    pub filter: CategoryFilter,
    pub selected: bool,
}

/// One product card in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub product_id: i64,
    pub name: String,
    pub price: String,
    pub image_url: Option<String>,
    /// "Stock: N" for managed, in-stock products.
    pub stock_label: Option<String>,
    /// Disabled, non-clickable card.
    pub out_of_stock: bool,
    /// Current cart quantity badge; zero hides the badge.
    pub in_cart: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub filters: Vec<FilterButton>,
    pub cards: Vec<ProductCard>,
}

fn card(product: &Product, cart: &Cart) -> ProductCard {
    let out_of_stock = product.out_of_stock();
    let stock_label = (product.is_inventory_managed && !out_of_stock)
        .then(|| format!("Stock: {}", product.stock_quantity));
    ProductCard {
        product_id: product.id,
        name: product.name.clone(),
        price: format_idr(product.price),
        image_url: product.image_url.clone(),
        stock_label,
        out_of_stock,
        in_cart: cart.quantity_of(product.id),
    }
}

/// Build the filter row and product grid for the current filter and cart.
pub fn catalog_view(catalog: &Catalog, filter: CategoryFilter, cart: &Cart) -> CatalogView {
    let mut filters = vec![FilterButton {
        label: "All".into(),
        filter: CategoryFilter::All,
        selected: filter == CategoryFilter::All,
    }];
    filters.extend(catalog.categories.iter().map(|c| FilterButton {
        label: c.name.clone(),
        filter: CategoryFilter::Category(c.id),
        selected: filter == CategoryFilter::Category(c.id),
    }));

    let cards = catalog
        .products_in(filter.category_id())
        .into_iter()
        .map(|p| card(p, cart))
        .collect();

    CatalogView { filters, cards }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_types::domain::catalog::Category;

    fn catalog() -> Catalog {
        Catalog {
            products: vec![
                Product {
                    id: 1,
                    category_id: 1,
                    category_name: Some("Food".into()),
                    name: "Nasi Goreng".into(),
                    price: 15_000,
                    is_inventory_managed: true,
                    stock_quantity: 4,
                    image_url: None,
                },
                Product {
                    id: 2,
                    category_id: 1,
                    category_name: Some("Food".into()),
                    name: "Sold Out".into(),
                    price: 9_000,
                    is_inventory_managed: true,
                    stock_quantity: 0,
                    image_url: None,
                },
                Product {
                    id: 3,
                    category_id: 2,
                    category_name: Some("Drinks".into()),
                    name: "Es Teh".into(),
                    price: 5_000,
                    is_inventory_managed: false,
                    stock_quantity: 0,
                    image_url: Some("img/esteh.png".into()),
                },
            ],
            categories: vec![
                Category { id: 1, name: "Food".into() },
                Category { id: 2, name: "Drinks".into() },
            ],
        }
    }

    #[test]
    fn all_filter_first_then_categories() {
        let view = catalog_view(&catalog(), CategoryFilter::All, &Cart::new());
        let labels: Vec<_> = view.filters.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["All", "Food", "Drinks"]);
        assert!(view.filters[0].selected);
        assert_eq!(view.cards.len(), 3);
    }

    #[test]
    fn category_filter_restricts_grid() {
        let view = catalog_view(&catalog(), CategoryFilter::Category(2), &Cart::new());
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].name, "Es Teh");
        assert!(view.filters[2].selected);
    }

    #[test]
    fn stock_and_out_of_stock_markers() {
        let view = catalog_view(&catalog(), CategoryFilter::All, &Cart::new());
        assert_eq!(view.cards[0].stock_label.as_deref(), Some("Stock: 4"));
        assert!(!view.cards[0].out_of_stock);
        assert!(view.cards[1].out_of_stock);
        assert!(view.cards[1].stock_label.is_none());
        // Unmanaged: neither marker.
        assert!(view.cards[2].stock_label.is_none());
        assert!(!view.cards[2].out_of_stock);
    }

    #[test]
    fn cart_quantity_badge() {
        let cat = catalog();
        let mut cart = Cart::new();
        cart.add(cat.product(1).unwrap()).unwrap();
        cart.add(cat.product(1).unwrap()).unwrap();
        let view = catalog_view(&cat, CategoryFilter::All, &cart);
        assert_eq!(view.cards[0].in_cart, 2);
        assert_eq!(view.cards[1].in_cart, 0);
    }

    #[test]
    fn prices_are_formatted() {
        let view = catalog_view(&catalog(), CategoryFilter::All, &Cart::new());
        assert_eq!(view.cards[0].price, "Rp 15.000");
    }
}
